//! Scripted pointer gestures.
//!
//! Each method advances the script by one frame and returns that frame's
//! [`FrameInput`], produced by a real [`InputState`] so deltas and edges
//! match what a platform layer would report.

use quay_core::math::Vec2;
use quay_input::{FrameInput, InputEvent, InputState, Modifiers, MouseButton, ScrollDelta};

#[derive(Debug)]
pub struct PointerScript {
    state: InputState,
}

impl PointerScript {
    /// Start with the pointer resting at `start`.
    pub fn new(start: Vec2) -> Self {
        let mut state = InputState::new();
        state.on_event(&InputEvent::PointerMoved(start));
        let _ = state.snapshot();
        Self { state }
    }

    pub fn pointer(&self) -> Vec2 {
        self.state.pointer()
    }

    /// A frame where nothing changes.
    pub fn idle(&mut self) -> FrameInput {
        self.state.snapshot()
    }

    pub fn move_to(&mut self, position: Vec2) -> FrameInput {
        self.state.on_event(&InputEvent::PointerMoved(position));
        self.state.snapshot()
    }

    pub fn move_by(&mut self, delta: Vec2) -> FrameInput {
        let target = self.pointer() + delta;
        self.move_to(target)
    }

    /// Press the primary button where the pointer is.
    pub fn press(&mut self) -> FrameInput {
        self.state.on_event(&InputEvent::ButtonDown(MouseButton::Left));
        self.state.snapshot()
    }

    /// Move to `position` and press there in the same frame.
    pub fn press_at(&mut self, position: Vec2) -> FrameInput {
        self.state.on_event(&InputEvent::PointerMoved(position));
        self.press()
    }

    pub fn release(&mut self) -> FrameInput {
        self.state.on_event(&InputEvent::ButtonUp(MouseButton::Left));
        self.state.snapshot()
    }

    /// Frames for a drag from the current position to `target` in `steps`
    /// equal moves, button held throughout. Press and release are separate.
    pub fn drag_to(&mut self, target: Vec2, steps: usize) -> Vec<FrameInput> {
        let steps = steps.max(1);
        let start = self.pointer();
        (1..=steps)
            .map(|step| self.move_to(start.lerp(target, step as f32 / steps as f32)))
            .collect()
    }

    /// Pixel wheel delta.
    pub fn scroll(&mut self, delta: Vec2) -> FrameInput {
        self.state.on_event(&InputEvent::Scroll(ScrollDelta::Pixels(delta)));
        self.state.snapshot()
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.state.on_event(&InputEvent::ModifiersChanged(modifiers));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_steps_end_at_target() {
        let mut script = PointerScript::new(Vec2::ZERO);
        script.press();
        let frames = script.drag_to(Vec2::new(20.0, 0.0), 2);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].pointer_delta, Vec2::new(10.0, 0.0));
        assert!(frames.iter().all(|f| f.is_down(MouseButton::Left)));
        assert_eq!(script.pointer(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn test_release_edge() {
        let mut script = PointerScript::new(Vec2::ZERO);
        script.press();
        let up = script.release();
        assert!(up.released(MouseButton::Left));
        assert!(!up.is_down(MouseButton::Left));
    }
}
