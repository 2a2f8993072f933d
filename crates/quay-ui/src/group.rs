//! Nodes of the docking tree.

use std::fmt;

use quay_core::alloc::Handle;
use quay_core::geometry::Rect;
use quay_core::math::Vec2;

use crate::style::DockingStyle;
use crate::widget_id::WindowId;

/// Handle to a [`Group`] in the dock tree's pool.
///
/// Generational: once the group is freed every copy of the id resolves to
/// nothing, even after the slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) Handle);

impl GroupId {
    pub fn handle(&self) -> Handle {
        self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis along which a split node lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitAxis {
    /// Children left to right, separated by vertical dividers.
    #[default]
    Vertical,
    /// Children top to bottom, separated by horizontal dividers.
    Horizontal,
}

impl SplitAxis {
    /// Get the perpendicular axis.
    pub fn perpendicular(&self) -> Self {
        match self {
            SplitAxis::Vertical => SplitAxis::Horizontal,
            SplitAxis::Horizontal => SplitAxis::Vertical,
        }
    }

    /// The component of `v` along this axis.
    pub fn component(&self, v: Vec2) -> f32 {
        match self {
            SplitAxis::Vertical => v.x,
            SplitAxis::Horizontal => v.y,
        }
    }

    /// Size of `rect` along this axis.
    pub fn extent(&self, rect: &Rect) -> f32 {
        self.component(rect.size())
    }

    /// Leading coordinate of `rect` along this axis.
    pub fn start(&self, rect: &Rect) -> f32 {
        self.component(rect.position())
    }

    /// The part of `rect` that starts `offset` pixels in and is `size` long.
    pub fn slice(&self, rect: &Rect, offset: f32, size: f32) -> Rect {
        match self {
            SplitAxis::Vertical => Rect::new(rect.x + offset, rect.y, size, rect.height),
            SplitAxis::Horizontal => Rect::new(rect.x, rect.y + offset, rect.width, size),
        }
    }

    /// A vector with `value` along this axis and zero across it.
    pub fn vector(&self, value: f32) -> Vec2 {
        match self {
            SplitAxis::Vertical => Vec2::new(value, 0.0),
            SplitAxis::Horizontal => Vec2::new(0.0, value),
        }
    }
}

/// Which end of an axis an operation works on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockSide {
    /// Left or top.
    Before,
    /// Right or bottom.
    After,
}

impl DockSide {
    pub fn is_after(&self) -> bool {
        matches!(self, DockSide::After)
    }

    pub fn opposite(&self) -> Self {
        match self {
            DockSide::Before => DockSide::After,
            DockSide::After => DockSide::Before,
        }
    }

    /// Index of the child at this end of a list of `len` children.
    pub fn end_index(&self, len: usize) -> usize {
        match self {
            DockSide::Before => 0,
            DockSide::After => len.saturating_sub(1),
        }
    }
}

/// One child entry of a split node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Split {
    pub child: GroupId,
    /// Share of the parent's extent, in (0, 1). Siblings sum to 1.
    pub weight: f32,
    /// Boundary after this child in absolute pixels, cached by propagation.
    pub div_position: f32,
}

impl Split {
    pub fn new(child: GroupId, weight: f32) -> Self {
        Self {
            child,
            weight,
            div_position: 0.0,
        }
    }
}

/// What a group holds: tabbed windows or weighted children.
#[derive(Debug, Clone, PartialEq)]
pub enum GroupContent {
    Leaf {
        windows: Vec<WindowId>,
        active: usize,
    },
    Split {
        axis: SplitAxis,
        splits: Vec<Split>,
    },
}

impl GroupContent {
    pub fn empty_leaf() -> Self {
        GroupContent::Leaf {
            windows: Vec::new(),
            active: 0,
        }
    }
}

/// A node of the docking tree.
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) id: GroupId,
    pub(crate) parent: Option<GroupId>,
    pub(crate) root: GroupId,
    pub(crate) rect: Rect,
    pub(crate) span_before_snap: Vec2,
    pub(crate) z: u16,
    pub(crate) content: GroupContent,
}

impl Group {
    pub(crate) fn new(id: GroupId, parent: Option<GroupId>, rect: Rect, content: GroupContent) -> Self {
        Self {
            id,
            parent,
            root: id,
            rect,
            span_before_snap: rect.size(),
            z: 0,
            content,
        }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    /// Topmost ancestor, as of the last propagation pass.
    pub fn root(&self) -> GroupId {
        self.root
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Size restored when the group is undocked again.
    pub fn span_before_snap(&self) -> Vec2 {
        self.span_before_snap
    }

    /// Draw layer of the root this group belongs to.
    pub fn z(&self) -> u16 {
        self.z
    }

    pub fn content(&self) -> &GroupContent {
        &self.content
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, GroupContent::Leaf { .. })
    }

    pub fn is_split(&self) -> bool {
        matches!(self.content, GroupContent::Split { .. })
    }

    /// Docked windows in tab order; empty for split nodes.
    pub fn windows(&self) -> &[WindowId] {
        match &self.content {
            GroupContent::Leaf { windows, .. } => windows,
            GroupContent::Split { .. } => &[],
        }
    }

    pub fn active_index(&self) -> Option<usize> {
        match &self.content {
            GroupContent::Leaf { windows, active } if !windows.is_empty() => Some(*active),
            _ => None,
        }
    }

    /// The window whose tab is selected.
    pub fn active_window(&self) -> Option<WindowId> {
        match &self.content {
            GroupContent::Leaf { windows, active } => windows.get(*active).copied(),
            GroupContent::Split { .. } => None,
        }
    }

    /// Child entries; empty for leaves.
    pub fn splits(&self) -> &[Split] {
        match &self.content {
            GroupContent::Split { splits, .. } => splits,
            GroupContent::Leaf { .. } => &[],
        }
    }

    pub fn axis(&self) -> Option<SplitAxis> {
        match &self.content {
            GroupContent::Split { axis, .. } => Some(*axis),
            GroupContent::Leaf { .. } => None,
        }
    }

    pub fn children(&self) -> impl Iterator<Item = GroupId> + '_ {
        self.splits().iter().map(|split| split.child)
    }

    /// Full rect minus border, without the titlebar.
    pub fn inner_rect(&self, style: &DockingStyle) -> Rect {
        self.rect.inset(style.border)
    }

    /// Tab strip along the top of a leaf.
    pub fn titlebar_rect(&self, style: &DockingStyle) -> Rect {
        let inner = self.inner_rect(style);
        Rect::new(inner.x, inner.y, inner.width, style.titlebar_height.min(inner.height))
    }

    /// Area handed to the docked windows: inner rect below the titlebar.
    pub fn window_rect(&self, style: &DockingStyle) -> Rect {
        let inner = self.inner_rect(style);
        let titlebar = style.titlebar_height.min(inner.height);
        Rect::new(inner.x, inner.y + titlebar, inner.width, inner.height - titlebar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_slices_along_main_axis() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(SplitAxis::Vertical.extent(&rect), 100.0);
        assert_eq!(SplitAxis::Horizontal.extent(&rect), 50.0);
        assert_eq!(
            SplitAxis::Vertical.slice(&rect, 30.0, 40.0),
            Rect::new(40.0, 20.0, 40.0, 50.0)
        );
        assert_eq!(
            SplitAxis::Horizontal.slice(&rect, 10.0, 5.0),
            Rect::new(10.0, 30.0, 100.0, 5.0)
        );
    }

    #[test]
    fn test_side_end_index() {
        assert_eq!(DockSide::Before.end_index(3), 0);
        assert_eq!(DockSide::After.end_index(3), 2);
        assert_eq!(DockSide::After.opposite(), DockSide::Before);
    }

    #[test]
    fn test_window_rect_excludes_titlebar() {
        let style = DockingStyle::default();
        let group = Group::new(
            GroupId(Handle::new(0, 0)),
            None,
            Rect::new(0.0, 0.0, 200.0, 100.0),
            GroupContent::empty_leaf(),
        );
        let window = group.window_rect(&style);
        let titlebar = group.titlebar_rect(&style);
        assert_eq!(window.y, titlebar.bottom());
        assert_eq!(window.bottom(), 100.0 - style.border);
        assert!(group.is_leaf());
        assert_eq!(group.active_window(), None);
    }
}
