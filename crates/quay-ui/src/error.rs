//! Recoverable errors from structural dock operations.

use crate::group::GroupId;
use crate::widget_id::WindowId;

/// Error types for dock operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DockError {
    /// Group id is stale or was never allocated.
    GroupNotFound(GroupId),
    /// No container is registered under this window id.
    WindowNotFound(WindowId),
    /// The group holds splits, not windows.
    NotALeaf(GroupId),
    /// The group holds windows, not splits.
    NotASplit(GroupId),
    /// The group has no parent to be removed from.
    NotDocked(GroupId),
    /// The operation needs a root (floating) group.
    NotARoot(GroupId),
    /// Source and target are the same group.
    SameGroup(GroupId),
    /// The sentinel group is never freed.
    SentinelGroup(GroupId),
    /// The sentinel group already holds windows.
    SentinelOccupied(GroupId),
    /// The sentinel group has no windows to spin off.
    NothingToUnsnap(GroupId),
    /// `start_window` was called while this window was still open.
    WindowAlreadyOpen(WindowId),
    /// `end_window` was called with no open window.
    NoOpenWindow,
}

impl std::fmt::Display for DockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DockError::GroupNotFound(id) => write!(f, "Group {} not found", id),
            DockError::WindowNotFound(id) => write!(f, "Window {} not found", id),
            DockError::NotALeaf(id) => write!(f, "Group {} is a split, not a leaf", id),
            DockError::NotASplit(id) => write!(f, "Group {} is a leaf, not a split", id),
            DockError::NotDocked(id) => write!(f, "Group {} is not docked", id),
            DockError::NotARoot(id) => write!(f, "Group {} is not a root group", id),
            DockError::SameGroup(id) => write!(f, "Source and target are both group {}", id),
            DockError::SentinelGroup(id) => write!(f, "Group {} is the sentinel and cannot be freed", id),
            DockError::SentinelOccupied(id) => write!(f, "Sentinel group {} already holds windows", id),
            DockError::NothingToUnsnap(id) => write!(f, "Group {} has no windows to undock", id),
            DockError::WindowAlreadyOpen(id) => write!(f, "Window {} is still open", id),
            DockError::NoOpenWindow => write!(f, "No window is open"),
        }
    }
}

impl std::error::Error for DockError {}

/// Result type for dock operations.
pub type DockResult<T> = Result<T, DockError>;
