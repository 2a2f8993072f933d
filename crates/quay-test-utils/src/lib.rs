//! Test utilities for quay.
//!
//! This crate provides headless stand-ins for the pieces a docking UI
//! normally gets from a platform layer:
//!
//! - [`RecordingRenderer`] - a [`Renderer`](quay_core::render::Renderer) that
//!   records every call for assertions
//! - [`MonospaceFont`] - deterministic [`FontMetrics`](quay_core::text::FontMetrics)
//! - [`PointerScript`] - builds consistent [`FrameInput`](quay_input::FrameInput)
//!   sequences for press/drag/release gestures
//!
//! # Example
//!
//! ```rust
//! use quay_test_utils::PointerScript;
//! use quay_core::math::Vec2;
//!
//! let mut script = PointerScript::new(Vec2::new(10.0, 10.0));
//! let press = script.press();
//! let drag = script.move_to(Vec2::new(40.0, 10.0));
//! let release = script.release();
//!
//! assert!(press.buttons_pressed.contains(quay_input::MouseButtons::LEFT));
//! assert_eq!(drag.pointer_delta, Vec2::new(30.0, 0.0));
//! assert!(release.buttons_released.contains(quay_input::MouseButtons::LEFT));
//! ```

pub mod font;
pub mod pointer;
pub mod recording;

pub use font::MonospaceFont;
pub use pointer::PointerScript;
pub use recording::{RecordingRenderer, RenderCall};
