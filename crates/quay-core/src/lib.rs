//! Quay Core
//!
//! Shared primitives for the quay docking UI: fixed-capacity arenas, geometry,
//! the draw-sink and font-metrics seams, logging and profiling.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod math;
pub mod profiling;
pub mod render;
pub mod text;
