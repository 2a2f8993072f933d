//! Immediate-mode draw list for one frame.
//!
//! Commands are recorded in submission order, each tagged with the layer that
//! was current when it was pushed. [`DrawList::replay`] hands them to a
//! [`Renderer`] sorted by layer; the sort is stable, so submission order is
//! kept within a layer and scissor push/pop pairs stay balanced.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_core::profiling::profile_function;
use quay_core::render::{Color, Renderer};

/// Layer for dock gizmos, drop previews and anything else drawn above every
/// window.
pub const OVERLAY_LAYER: u16 = u16::MAX;

/// High-level draw command for a UI element.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Filled rectangle.
    Rect { rect: Rect, color: Color },
    /// Filled rectangle with rounded corners.
    RoundedRect { rect: Rect, radius: f32, color: Color },
    /// A run of text with its top-left corner at `position`.
    Text {
        position: Vec2,
        text: String,
        font_size: f32,
        color: Color,
    },
    /// Clip subsequent commands to `rect`.
    PushScissor(Rect),
    /// Restore the previous clip.
    PopScissor,
}

/// A command plus the layer it draws on.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub layer: u16,
    pub command: DrawCommand,
}

#[derive(Debug, Clone, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    layer: u16,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.layer = 0;
    }

    /// Layer applied to commands pushed from now on.
    pub fn set_layer(&mut self, layer: u16) {
        self.layer = layer;
    }

    pub fn layer(&self) -> u16 {
        self.layer
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.items.push(DrawItem {
            layer: self.layer,
            command,
        });
    }

    /// Commands in submission order.
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands sorted by layer, lowest first.
    pub fn sorted(&self) -> Vec<&DrawItem> {
        let mut items: Vec<&DrawItem> = self.items.iter().collect();
        items.sort_by_key(|item| item.layer);
        items
    }

    /// Emit every command to `renderer`, lowest layer first.
    pub fn replay(&self, renderer: &mut dyn Renderer) {
        profile_function!();
        for item in self.sorted() {
            match &item.command {
                DrawCommand::Rect { rect, color } => renderer.push_rect(*rect, *color),
                DrawCommand::RoundedRect { rect, radius, color } => {
                    renderer.push_rounded_rect(*rect, *radius, *color)
                }
                DrawCommand::Text {
                    position,
                    text,
                    font_size,
                    color,
                } => renderer.push_text(*position, text, *font_size, *color),
                DrawCommand::PushScissor(rect) => renderer.push_scissor(*rect),
                DrawCommand::PopScissor => renderer.pop_scissor(),
            }
        }
    }
}

impl Renderer for DrawList {
    fn push_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCommand::Rect { rect, color });
    }

    fn push_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        self.push(DrawCommand::RoundedRect { rect, radius, color });
    }

    fn push_scissor(&mut self, rect: Rect) {
        self.push(DrawCommand::PushScissor(rect));
    }

    fn pop_scissor(&mut self) {
        self.push(DrawCommand::PopScissor);
    }

    fn push_text(&mut self, position: Vec2, text: &str, font_size: f32, color: Color) {
        self.push(DrawCommand::Text {
            position,
            text: text.to_owned(),
            font_size,
            color,
        });
    }
}
