//! Hot/active/dragging/selected interaction state machine.
//!
//! Each category is a single-owner [`InteractionChannel`]: at most one
//! [`WidgetId`] holds it at a time, and ownership changes are reported as
//! one-frame edges (`just_started` / `just_stopped`). Controls call the
//! `do_*` functions every frame in order hot -> active -> dragging.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_input::{FrameInput, MouseButton};

use crate::widget_id::WidgetId;

/// Pointer travel in pixels before an active control starts dragging.
pub const DRAG_THRESHOLD: f32 = 2.5;

/// One single-owner interaction category.
#[derive(Debug, Clone, Default)]
pub struct InteractionChannel {
    owner: Option<WidgetId>,
    just_started: Option<WidgetId>,
    just_stopped: Option<WidgetId>,
}

impl InteractionChannel {
    pub fn owner(&self) -> Option<WidgetId> {
        self.owner
    }

    pub fn is(&self, id: WidgetId) -> bool {
        self.owner == Some(id)
    }

    pub fn just_started(&self, id: WidgetId) -> bool {
        self.just_started == Some(id)
    }

    pub fn just_stopped(&self, id: WidgetId) -> bool {
        self.just_stopped == Some(id)
    }

    /// The id that acquired this channel during the current frame, if any.
    pub fn started_this_frame(&self) -> Option<WidgetId> {
        self.just_started
    }

    pub fn stopped_this_frame(&self) -> Option<WidgetId> {
        self.just_stopped
    }

    /// Give the channel to `id`. A no-op if `id` already owns it.
    pub fn set(&mut self, id: WidgetId) {
        if self.owner == Some(id) {
            return;
        }
        if let Some(previous) = self.owner.replace(id) {
            self.just_stopped = Some(previous);
        }
        self.just_started = Some(id);
    }

    /// Release the channel, but only if `id` is the current owner.
    pub fn clear(&mut self, id: WidgetId) {
        if self.owner == Some(id) {
            self.owner = None;
            self.just_stopped = Some(id);
        }
    }

    /// Release the channel whoever owns it.
    pub fn release(&mut self) {
        if let Some(previous) = self.owner.take() {
            self.just_stopped = Some(previous);
        }
    }

    fn reset_edges(&mut self) {
        self.just_started = None;
        self.just_stopped = None;
    }
}

/// Process-wide interaction ownership plus the pointer state it is judged on.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    pub hot: InteractionChannel,
    pub active: InteractionChannel,
    pub dragging: InteractionChannel,
    pub selected: InteractionChannel,
    pointer: Vec2,
    down: bool,
    pressed: bool,
    released: bool,
    start_position: Vec2,
    drag_delta: Vec2,
    drag_total: Vec2,
    hot_touched: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the edge flags and latch this frame's pointer state.
    ///
    /// A released primary button ends any active or dragging ownership, so a
    /// control that vanished mid-gesture cannot hold them forever.
    pub fn begin_frame(&mut self, input: &FrameInput, canvas: Rect) {
        self.hot.reset_edges();
        self.active.reset_edges();
        self.dragging.reset_edges();
        self.selected.reset_edges();
        self.hot_touched = false;

        self.pointer = input.pointer;
        self.down = input.is_down(MouseButton::Left);
        self.pressed = input.pressed(MouseButton::Left);
        self.released = input.released(MouseButton::Left);

        let current = canvas.clamp_point(input.pointer);
        let previous = canvas.clamp_point(input.pointer - input.pointer_delta);
        self.drag_delta = current - previous;
        self.drag_total = current - canvas.clamp_point(self.start_position);

        if !self.down {
            self.active.release();
            self.dragging.release();
        }
    }

    /// Drop hot ownership held by a control that was not submitted this frame.
    pub fn end_frame(&mut self) {
        if !self.hot_touched {
            self.hot.release();
        }
    }

    /// Mark `id` hot iff the pointer is inside `rect` and `in_scope` holds.
    ///
    /// `in_scope` is how callers restrict hover to the topmost window (or a
    /// popup) when several overlap. While another control is active nothing
    /// else may become hot.
    pub fn do_hot(&mut self, id: WidgetId, rect: Rect, in_scope: bool) -> bool {
        let blocked = self.active.owner().is_some_and(|owner| owner != id);
        if in_scope && !blocked && rect.contains(self.pointer) {
            self.hot.set(id);
            self.hot_touched = true;
            true
        } else {
            self.hot.clear(id);
            false
        }
    }

    /// Become active on press while hot; the first control to do so in a
    /// frame wins. Released on button up.
    pub fn do_active(&mut self, id: WidgetId) -> bool {
        if self.pressed && self.hot.is(id) && self.active.started_this_frame().is_none() {
            self.active.set(id);
            self.start_position = self.pointer;
            self.drag_total = Vec2::ZERO;
        } else if self.active.is(id) && !self.down {
            self.active.clear(id);
        }
        self.active.is(id)
    }

    /// Start dragging once active and the pointer travelled past [`DRAG_THRESHOLD`].
    pub fn do_dragging(&mut self, id: WidgetId) -> bool {
        if self.active.is(id) {
            if !self.dragging.is(id) && (self.pointer - self.start_position).length() > DRAG_THRESHOLD
            {
                self.dragging.set(id);
            }
        } else {
            self.dragging.clear(id);
        }
        self.dragging.is(id)
    }

    /// Latch selection on press (`on_down`) or on release of a click, and drop
    /// it when the button goes down anywhere else.
    pub fn do_selected(&mut self, id: WidgetId, on_down: bool) -> bool {
        let latch = if on_down {
            self.pressed && self.hot.is(id)
        } else {
            self.active.just_stopped(id) && self.hot.is(id)
        };

        if latch {
            self.selected.set(id);
        } else if self.pressed && !self.hot.is(id) {
            self.selected.clear(id);
        }
        self.selected.is(id)
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_down(&self) -> bool {
        self.down
    }

    pub fn pressed(&self) -> bool {
        self.pressed
    }

    pub fn released(&self) -> bool {
        self.released
    }

    /// Pointer position captured when the current active control activated.
    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    /// This frame's pointer movement, clamped to the canvas.
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Movement since activation, clamped to the canvas.
    pub fn drag_total(&self) -> Vec2 {
        self.drag_total
    }
}
