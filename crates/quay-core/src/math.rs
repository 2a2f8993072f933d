//! Vector math re-exported from [`glam`].
//!
//! Positions, sizes and deltas throughout the UI are [`Vec2`] in logical
//! pixels, origin at the top-left of the canvas, y pointing down.
//!
//! ```
//! use quay_core::math::Vec2;
//!
//! let pointer = Vec2::new(10.0, 20.0);
//! let delta = Vec2::new(1.0, 0.5);
//! assert_eq!(pointer + delta, Vec2::new(11.0, 20.5));
//! ```
//!
//! [`glam`]: https://docs.rs/glam

pub use glam::{Vec2, vec2};
