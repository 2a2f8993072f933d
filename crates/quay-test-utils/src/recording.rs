//! Recording implementation of [`Renderer`] for testing.
//!
//! Calls are stored in submission order so tests can check what was drawn,
//! in which order, and that scissor pushes and pops pair up.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_core::render::{Color, Renderer};

/// Records a draw call for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Rect { rect: Rect, color: Color },
    RoundedRect { rect: Rect, radius: f32, color: Color },
    Text {
        position: Vec2,
        text: String,
        font_size: f32,
    },
    PushScissor(Rect),
    PopScissor,
}

/// Renderer that draws nothing and remembers everything.
///
/// # Example
///
/// ```rust
/// use quay_test_utils::RecordingRenderer;
/// use quay_core::render::{Color, Renderer};
/// use quay_core::geometry::Rect;
///
/// let mut renderer = RecordingRenderer::new();
/// renderer.push_scissor(Rect::new(0.0, 0.0, 10.0, 10.0));
/// renderer.push_rect(Rect::new(1.0, 1.0, 2.0, 2.0), Color::WHITE);
/// renderer.pop_scissor();
///
/// assert_eq!(renderer.count_rects(), 1);
/// assert!(renderer.scissors_balanced());
/// ```
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RenderCall>,
    max_scissor_depth: usize,
    depth: isize,
    underflowed: bool,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, oldest first.
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    pub fn call_count(&self) -> usize {
        self.calls.len()
    }

    /// Count filled rects, rounded or not.
    pub fn count_rects(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, RenderCall::Rect { .. } | RenderCall::RoundedRect { .. }))
            .count()
    }

    /// Every text run drawn, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                RenderCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether every push was popped and no pop came without a push.
    pub fn scissors_balanced(&self) -> bool {
        self.depth == 0 && !self.underflowed
    }

    pub fn max_scissor_depth(&self) -> usize {
        self.max_scissor_depth
    }

    /// Clear recorded calls (useful between frames).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
        self.depth = 0;
        self.max_scissor_depth = 0;
        self.underflowed = false;
    }
}

impl Renderer for RecordingRenderer {
    fn push_rect(&mut self, rect: Rect, color: Color) {
        self.calls.push(RenderCall::Rect { rect, color });
    }

    fn push_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.calls.push(RenderCall::RoundedRect { rect, radius, color });
    }

    fn push_scissor(&mut self, rect: Rect) {
        self.depth += 1;
        self.max_scissor_depth = self.max_scissor_depth.max(self.depth as usize);
        self.calls.push(RenderCall::PushScissor(rect));
    }

    fn pop_scissor(&mut self) {
        self.depth -= 1;
        if self.depth < 0 {
            self.underflowed = true;
        }
        self.calls.push(RenderCall::PopScissor);
    }

    fn push_text(&mut self, position: Vec2, text: &str, font_size: f32, _color: Color) {
        self.calls.push(RenderCall::Text {
            position,
            text: text.to_owned(),
            font_size,
        });
    }
}
