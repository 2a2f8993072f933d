//! Pointer gestures driven through whole frames.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_input::FrameInput;
use quay_test_utils::{MonospaceFont, PointerScript, RecordingRenderer};
use quay_ui::{DockError, DockKind, DockSide, DockUi, SplitAxis, WindowId};

const CANVAS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);
const A_RECT: Rect = Rect::new(100.0, 100.0, 400.0, 300.0);

fn ui() -> DockUi {
    DockUi::new(CANVAS).with_font_metrics(MonospaceFont::default())
}

fn frame(ui: &mut DockUi, input: FrameInput, windows: &[(&str, Rect)]) {
    ui.start_frame(input, CANVAS);
    for (name, rect) in windows {
        ui.start_window(name, *rect);
        ui.end_window().unwrap();
    }
    ui.end_frame();
}

#[test]
fn dragging_a_tab_out_makes_a_floating_group() {
    let windows = [("A", A_RECT), ("B", A_RECT)];
    let mut ui = ui();
    // Over the second tab: titlebar starts at 101, "A" tab is 8 + 2 * 8 wide.
    let mut script = PointerScript::new(Vec2::new(137.0, 112.0));
    frame(&mut ui, script.idle(), &windows);

    let a = ui.window_group(WindowId::new("A")).unwrap();
    let b = ui.window_group(WindowId::new("B")).unwrap();
    ui.tree_mut().combine_leaf_groups(a, b).unwrap();
    frame(&mut ui, script.idle(), &windows);
    assert_eq!(ui.tree().group(a).unwrap().windows().len(), 2);

    frame(&mut ui, script.press(), &windows);
    let tab = WindowId::new("B").derive("tab");
    assert_eq!(ui.interaction().active.owner(), Some(tab));
    assert_eq!(ui.tree().group(a).unwrap().active_window(), Some(WindowId::new("B")));

    frame(&mut ui, script.move_to(Vec2::new(187.0, 212.0)), &windows);
    let floating = ui.window_group(WindowId::new("B")).unwrap();
    assert_ne!(floating, a);
    assert_eq!(ui.dragged_group(), Some(floating));
    assert_eq!(ui.tree().group(a).unwrap().windows(), &[WindowId::new("A")]);
    assert_eq!(ui.tree().root_groups()[0], floating);

    // Away from every gizmo the group follows the pointer.
    frame(&mut ui, script.move_to(Vec2::new(600.0, 450.0)), &windows);
    let rect = ui.tree().group(floating).unwrap().rect();
    assert_eq!(rect.position(), Vec2::new(592.0, 439.0));
    assert!(ui.dock_controller().hot_gizmo().is_none());
    assert_eq!(ui.interaction().dragging.owner(), Some(tab));

    frame(&mut ui, script.release(), &windows);
    assert_eq!(ui.dragged_group(), None);
    assert!(ui.dock_controller().pending().is_none());
    assert!(ui.tree().group(floating).unwrap().is_root());
}

#[test]
fn drop_on_gizmo_is_applied_next_frame() {
    let windows = [("A", A_RECT), ("B", Rect::new(550.0, 100.0, 200.0, 150.0))];
    let mut ui = ui();
    // Blank titlebar space of B, right of its tab.
    let mut script = PointerScript::new(Vec2::new(650.0, 112.0));
    frame(&mut ui, script.idle(), &windows);
    let a = ui.window_group(WindowId::new("A")).unwrap();
    let b = ui.window_group(WindowId::new("B")).unwrap();

    frame(&mut ui, script.press(), &windows);
    // Right gizmo of A: centre (300, 250) shifted by gizmo size plus gap.
    frame(&mut ui, script.move_to(Vec2::new(332.0, 250.0)), &windows);
    assert_eq!(ui.dragged_group(), Some(b));
    assert_eq!(ui.tree().group(b).unwrap().rect().position(), Vec2::new(232.0, 238.0));

    frame(&mut ui, script.idle(), &windows);
    let hot = ui.dock_controller().hot_gizmo().copied().unwrap();
    assert_eq!(hot.target, a);
    assert_eq!(
        hot.kind,
        DockKind::Snap {
            axis: SplitAxis::Vertical,
            side: DockSide::After
        }
    );

    frame(&mut ui, script.release(), &windows);
    let pending = ui.dock_controller().pending().copied().unwrap();
    assert_eq!(pending.group, b);
    assert!(ui.tree().group(b).unwrap().is_root());

    frame(&mut ui, script.idle(), &windows);
    assert!(ui.dock_controller().pending().is_none());
    let root = ui.tree().group(a).unwrap();
    assert_eq!(root.axis(), Some(SplitAxis::Vertical));
    assert_eq!(root.splits()[1].child, b);
    assert_eq!(ui.tree().group(b).unwrap().parent(), Some(a));
}

#[test]
fn splitter_follows_pointer() {
    let windows = [("A", A_RECT), ("B", A_RECT)];
    let mut ui = ui();
    let mut script = PointerScript::new(Vec2::new(300.0, 250.0));
    frame(&mut ui, script.idle(), &windows);
    let a = ui.window_group(WindowId::new("A")).unwrap();
    let b = ui.window_group(WindowId::new("B")).unwrap();
    assert!(ui.tree_mut().snap_group(b, a, SplitAxis::Vertical, DockSide::After));
    frame(&mut ui, script.idle(), &windows);
    assert_eq!(ui.tree().group(a).unwrap().splits()[0].div_position, 300.0);

    frame(&mut ui, script.press(), &windows);
    frame(&mut ui, script.move_to(Vec2::new(340.0, 250.0)), &windows);
    frame(&mut ui, script.release(), &windows);

    let left = ui.tree().group(a).unwrap().splits()[0].child;
    assert!((ui.tree().group(left).unwrap().rect().width - 240.0).abs() < 1e-3);
    assert!((ui.tree().group(b).unwrap().rect().width - 160.0).abs() < 1e-3);
}

#[test]
fn wheel_scrolls_overflowing_window() {
    let log = Rect::new(100.0, 100.0, 300.0, 200.0);
    let mut ui = ui();
    let mut script = PointerScript::new(Vec2::new(200.0, 200.0));
    let run = |ui: &mut DockUi, input: FrameInput| {
        ui.start_frame(input, CANVAS);
        ui.start_window("Log", log);
        for _ in 0..20 {
            ui.place(Vec2::new(50.0, 30.0), false);
            ui.next_line();
        }
        ui.end_window().unwrap();
        ui.end_frame();
    };

    run(&mut ui, script.idle());
    run(&mut ui, script.scroll(Vec2::new(0.0, -40.0)));
    let container = ui.get_container("Log").unwrap();
    assert_eq!(container.scroll_offset_target().y, -40.0);

    run(&mut ui, script.idle());
    let container = ui.get_container("Log").unwrap();
    assert_eq!(container.scroll_offset().y, -20.0);
    assert!(container.needs_scrollbar(quay_ui::ScrollAxis::Vertical));
}

#[test]
fn nested_start_window_is_tolerated() {
    let mut ui = ui();
    frame(&mut ui, FrameInput::default(), &[("A", A_RECT), ("B", A_RECT)]);

    ui.start_frame(FrameInput::default(), CANVAS);
    let a = ui.start_window("A", A_RECT);
    let b = ui.start_window("B", A_RECT);
    assert_ne!(a, b);
    ui.end_window().unwrap();
    assert_eq!(ui.end_window(), Err(DockError::NoOpenWindow));

    // Tab titles come from the group pass at the start of the frame.
    let mut renderer = RecordingRenderer::new();
    ui.end_frame().replay(&mut renderer);
    assert!(renderer.texts().contains(&"A"));
    assert!(renderer.texts().contains(&"B"));
    // Opening B closed A, so every scissor is popped.
    assert!(renderer.scissors_balanced());
    assert_eq!(renderer.max_scissor_depth(), 1);
}

#[test]
fn edge_handle_outside_root_resizes_it() {
    let windows = [("A", A_RECT)];
    let mut ui = ui();
    // Left of A's rect but inside its resize strip; only the fullscreen group is below.
    let mut script = PointerScript::new(Vec2::new(98.0, 250.0));
    frame(&mut ui, script.idle(), &windows);
    let a = ui.window_group(WindowId::new("A")).unwrap();

    frame(&mut ui, script.press(), &windows);
    frame(&mut ui, script.move_to(Vec2::new(78.0, 250.0)), &windows);
    frame(&mut ui, script.release(), &windows);

    assert_eq!(ui.tree().group(a).unwrap().rect(), Rect::new(80.0, 100.0, 420.0, 300.0));
}

#[test]
fn draw_list_scissors_pair_up() {
    let windows = [("A", A_RECT), ("B", Rect::new(550.0, 100.0, 200.0, 150.0))];
    let mut ui = ui();
    frame(&mut ui, FrameInput::default(), &windows);

    ui.start_frame(FrameInput::default(), CANVAS);
    for (name, rect) in windows {
        ui.start_window(name, rect);
        ui.end_window().unwrap();
    }
    let mut renderer = RecordingRenderer::new();
    ui.end_frame().replay(&mut renderer);
    assert!(renderer.scissors_balanced());
    assert_eq!(renderer.max_scissor_depth(), 1);
}
