//! Quay UI - immediate-mode docking and layout engine
//!
//! This crate manages a tree of dockable groups on a 2D canvas:
//! - Tabbed leaves and weighted splits
//! - Snapping, unsnapping and tab merging through drag-and-drop gizmos
//! - Splitter and edge resizing with minimum-size clamping
//! - Per-window scroll containers with a flow-layout cursor
//! - A layered draw list replayed into any [`Renderer`](quay_core::render::Renderer)
//!
//! ## Quick Start
//!
//! ```rust
//! # use quay_ui::DockUi;
//! # use quay_core::geometry::Rect;
//! # use quay_core::math::Vec2;
//! # use quay_input::FrameInput;
//! let canvas = Rect::new(0.0, 0.0, 1280.0, 720.0);
//! let mut ui = DockUi::new(canvas);
//!
//! // Once per frame:
//! ui.start_frame(FrameInput::default(), canvas);
//! ui.start_window("Scene", Rect::new(40.0, 40.0, 400.0, 300.0));
//! let button = ui.place(Vec2::new(120.0, 24.0), false);
//! ui.end_window().unwrap();
//! let draw_list = ui.end_frame();
//! assert!(!draw_list.is_empty());
//! # let _ = button;
//! ```

pub mod container;
pub mod dock;
pub mod draw_list;
pub mod error;
pub mod frame;
pub mod group;
pub mod interaction;
pub mod layout;
pub mod snap;
pub mod style;
pub mod tree;
pub mod widget_id;

pub use container::{Container, ScrollAxis, Scrollbar};
pub use dock::{DockController, DockGizmo, DockKind, DockRequest};
pub use draw_list::{DrawCommand, DrawItem, DrawList, OVERLAY_LAYER};
pub use error::{DockError, DockResult};
pub use group::{DockSide, Group, GroupContent, GroupId, Split, SplitAxis};
pub use interaction::{DRAG_THRESHOLD, Interaction, InteractionChannel};
pub use layout::Edge;
pub use style::{DockingStyle, PoolLimits};
pub use widget_id::{WidgetId, WindowId};

// Re-export main types
pub use frame::{ControlResponse, DockUi};
pub use tree::DockTree;
