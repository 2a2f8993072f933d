//! Quay - an immediate-mode docking UI
//!
//! Quay lays out dockable, tabbed tool windows on a 2D canvas and records
//! what to draw into a layered draw list. It owns no window, GPU or font
//! resources: the host feeds it pointer input once per frame and replays the
//! draw list into its own renderer.
//!
//! - **Core**: arenas, geometry, the renderer and font-metrics seams, logging
//!   and profiling
//! - **Input**: raw platform events folded into per-frame snapshots
//! - **UI**: the docking tree, drag gestures, scroll containers and the layout cursor
//!
//! # Quick Start
//!
//! ```rust
//! use quay::prelude::*;
//!
//! let canvas = Rect::new(0.0, 0.0, 1280.0, 720.0);
//! let mut ui = DockUi::new(canvas);
//! let mut input = InputState::new();
//!
//! input.on_event(&InputEvent::PointerMoved(Vec2::new(64.0, 64.0)));
//! ui.start_frame(input.snapshot(), canvas);
//! ui.start_window("Scene", Rect::new(40.0, 40.0, 480.0, 320.0));
//! let row = ui.place(Vec2::new(0.0, 20.0), true);
//! ui.end_window().unwrap();
//! let draw_list = ui.end_frame();
//!
//! assert!(row.width > 0.0);
//! assert!(!draw_list.is_empty());
//! ```

// Re-export core types
pub use quay_core as core;
pub use quay_core::{geometry, logging, math, profiling};

// Re-export sub-crates based on features
#[cfg(feature = "input")]
pub use quay_input as input;

#[cfg(feature = "ui")]
pub use quay_ui as ui;

#[cfg(feature = "ui")]
pub use quay_ui::{DockTree, DockUi, DockingStyle, PoolLimits};

/// Prelude module for convenient imports
pub mod prelude {
    pub use quay_core::geometry::Rect;
    pub use quay_core::math::Vec2;
    pub use quay_core::render::{Color, Renderer};
    pub use quay_core::text::FontMetrics;

    #[cfg(feature = "input")]
    pub use quay_input::{FrameInput, InputEvent, InputState, Modifiers, MouseButton, ScrollDelta};

    #[cfg(feature = "ui")]
    pub use quay_ui::{
        ControlResponse, DockError, DockResult, DockSide, DockTree, DockUi, DockingStyle, DrawList,
        GroupId, PoolLimits, SplitAxis, WidgetId, WindowId,
    };
}
