//! Headless example driving a docking UI with scripted pointer input.
//!
//! This example shows how to:
//! - Feed platform events through an `InputState`
//! - Declare windows and place widgets each frame
//! - Drag one window's titlebar onto another to dock it
//! - Replay the draw list into a custom `Renderer`
//!
//! Run with: cargo run -p quay --example headless_dock
//! Set `QUAY_PROFILE=1` to serve puffin data on port 8585.

use quay::prelude::*;
use quay::profiling::{ProfilingBackend, init_profiling};

const CANVAS: Rect = Rect::new(0.0, 0.0, 1280.0, 720.0);

/// Renderer that only tallies what it is asked to draw.
#[derive(Default)]
struct TallyRenderer {
    rects: usize,
    texts: Vec<String>,
    scissor_depth: usize,
}

impl Renderer for TallyRenderer {
    fn push_rect(&mut self, _rect: Rect, _color: Color) {
        self.rects += 1;
    }

    fn push_rounded_rect(&mut self, _rect: Rect, _radius: f32, _color: Color) {
        self.rects += 1;
    }

    fn push_scissor(&mut self, _rect: Rect) {
        self.scissor_depth += 1;
    }

    fn pop_scissor(&mut self) {
        self.scissor_depth = self.scissor_depth.saturating_sub(1);
    }

    fn push_text(&mut self, _position: Vec2, text: &str, _font_size: f32, _color: Color) {
        self.texts.push(text.to_owned());
    }
}

fn build_frame(ui: &mut DockUi, input: FrameInput, clicks: &mut u32) {
    ui.start_frame(input, CANVAS);

    ui.start_window("Scene", Rect::new(80.0, 80.0, 520.0, 400.0));
    let viewport = ui.get_remaining_rect();
    tracing::trace!(?viewport, "scene viewport");
    ui.end_window().ok();

    let inspector = ui.start_window("Inspector", Rect::new(700.0, 120.0, 320.0, 300.0));
    for row in 0..12 {
        let rect = ui.place(Vec2::new(0.0, 22.0), true);
        let response = ui.control(inspector.derive_index("row", row), rect);
        if response.clicked {
            *clicks += 1;
        }
        ui.next_line();
    }
    ui.end_window().ok();

    let draw_list = ui.end_frame();
    let mut renderer = TallyRenderer::default();
    draw_list.replay(&mut renderer);
    tracing::debug!(
        rects = renderer.rects,
        texts = renderer.texts.len(),
        unbalanced_scissors = renderer.scissor_depth,
        "replayed frame"
    );
}

fn main() {
    quay::logging::init();
    if std::env::var_os("QUAY_PROFILE").is_some() {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    let mut ui = DockUi::new(CANVAS);
    let mut input = InputState::new();
    let mut clicks = 0;

    // Settle the initial layout.
    input.on_event(&InputEvent::PointerMoved(Vec2::new(900.0, 131.0)));
    build_frame(&mut ui, input.snapshot(), &mut clicks);

    // Grab blank titlebar space on the inspector and drag it over the
    // scene's right docking gizmo.
    input.on_event(&InputEvent::ButtonDown(MouseButton::Left));
    build_frame(&mut ui, input.snapshot(), &mut clicks);

    let scene_center = Rect::new(80.0, 80.0, 520.0, 400.0).center();
    let gizmo = ui.style().gizmo_size + ui.style().gizmo_gap;
    let target = scene_center + Vec2::new(gizmo, 0.0);
    let start = input.pointer();
    for step in 1..=8 {
        let pointer = start.lerp(target, step as f32 / 8.0);
        input.on_event(&InputEvent::PointerMoved(pointer));
        build_frame(&mut ui, input.snapshot(), &mut clicks);
    }

    input.on_event(&InputEvent::ButtonUp(MouseButton::Left));
    build_frame(&mut ui, input.snapshot(), &mut clicks);
    // The drop is applied at the start of the next frame.
    build_frame(&mut ui, input.snapshot(), &mut clicks);

    let scene = ui.window_group(WindowId::new("Scene"));
    let inspector = ui.window_group(WindowId::new("Inspector"));
    let docked = inspector
        .and_then(|id| ui.tree().group(id))
        .is_some_and(|group| !group.is_root());
    tracing::info!(?scene, ?inspector, docked, "inspector drop finished");

    // Click the first inspector row.
    if let Some(row) = ui.get_container("Inspector").map(|c| c.content_rect()) {
        input.on_event(&InputEvent::PointerMoved(row.position() + Vec2::new(10.0, 10.0)));
        build_frame(&mut ui, input.snapshot(), &mut clicks);
        input.on_event(&InputEvent::ButtonDown(MouseButton::Left));
        build_frame(&mut ui, input.snapshot(), &mut clicks);
        input.on_event(&InputEvent::ButtonUp(MouseButton::Left));
        build_frame(&mut ui, input.snapshot(), &mut clicks);
    }

    tracing::info!(frames = ui.frame_index(), clicks, "headless run complete");
}
