//! Per-frame input snapshots.
//!
//! The platform layer feeds raw [`InputEvent`]s into an [`InputState`];
//! once per frame [`InputState::snapshot`] produces the immutable
//! [`FrameInput`] the UI reads. Edge flags (pressed/released) and the
//! text/key queues only live for the frame they were taken in.

use bitflags::bitflags;
use quay_core::math::Vec2;

/// Pixels scrolled per wheel "line".
pub const LINE_SCROLL_DELTA: f32 = 20.0;

bitflags! {
    /// Set of pointer buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const MIDDLE = 1 << 2;
    }
}

bitflags! {
    /// Held keyboard modifiers.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const SUPER = 1 << 3;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Left => MouseButtons::LEFT,
            MouseButton::Right => MouseButtons::RIGHT,
            MouseButton::Middle => MouseButtons::MIDDLE,
        }
    }
}

/// Non-text keys widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollDelta {
    /// Wheel notches, scaled by [`LINE_SCROLL_DELTA`].
    Lines(Vec2),
    /// Precise pixel deltas (trackpads).
    Pixels(Vec2),
}

/// Raw platform event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerMoved(Vec2),
    ButtonDown(MouseButton),
    ButtonUp(MouseButton),
    Scroll(ScrollDelta),
    ModifiersChanged(Modifiers),
    Text(char),
    Key(Key),
}

/// Immutable input for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub pointer: Vec2,
    /// Pointer movement since the previous snapshot.
    pub pointer_delta: Vec2,
    pub buttons_down: MouseButtons,
    pub buttons_pressed: MouseButtons,
    pub buttons_released: MouseButtons,
    pub scroll_delta: Vec2,
    pub modifiers: Modifiers,
    pub text: String,
    pub keys: Vec<Key>,
}

impl FrameInput {
    /// Input with the pointer resting at `pointer` and nothing else happening.
    pub fn at(pointer: Vec2) -> Self {
        Self {
            pointer,
            ..Default::default()
        }
    }

    pub fn is_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(button.into())
    }

    pub fn pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(button.into())
    }

    pub fn released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(button.into())
    }

    pub fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// Accumulates raw events between frames.
#[derive(Debug, Default)]
pub struct InputState {
    pointer: Vec2,
    last_snapshot_pointer: Vec2,
    down: MouseButtons,
    pressed: MouseButtons,
    released: MouseButtons,
    scroll_delta: Vec2,
    modifiers: Modifiers,
    text: String,
    keys: Vec<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::PointerMoved(pos) => self.pointer = *pos,
            InputEvent::ButtonDown(button) => {
                let flag = MouseButtons::from(*button);
                if !self.down.contains(flag) {
                    self.pressed |= flag;
                }
                self.down |= flag;
            }
            InputEvent::ButtonUp(button) => {
                let flag = MouseButtons::from(*button);
                if self.down.contains(flag) {
                    self.released |= flag;
                }
                self.down.remove(flag);
            }
            InputEvent::Scroll(ScrollDelta::Lines(lines)) => {
                self.scroll_delta += *lines * LINE_SCROLL_DELTA;
            }
            InputEvent::Scroll(ScrollDelta::Pixels(pixels)) => self.scroll_delta += *pixels,
            InputEvent::ModifiersChanged(modifiers) => self.modifiers = *modifiers,
            InputEvent::Text(c) => {
                if !c.is_control() {
                    self.text.push(*c);
                }
            }
            InputEvent::Key(key) => self.keys.push(*key),
        }
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Produce this frame's input and clear the per-frame edges and queues.
    pub fn snapshot(&mut self) -> FrameInput {
        let input = FrameInput {
            pointer: self.pointer,
            pointer_delta: self.pointer - self.last_snapshot_pointer,
            buttons_down: self.down,
            buttons_pressed: self.pressed,
            buttons_released: self.released,
            scroll_delta: self.scroll_delta,
            modifiers: self.modifiers,
            text: std::mem::take(&mut self.text),
            keys: std::mem::take(&mut self.keys),
        };
        if !input.keys.is_empty() || !input.text.is_empty() {
            tracing::trace!(keys = input.keys.len(), text = %input.text, "input queues drained");
        }
        self.last_snapshot_pointer = self.pointer;
        self.pressed = MouseButtons::empty();
        self.released = MouseButtons::empty();
        self.scroll_delta = Vec2::ZERO;
        input
    }
}
