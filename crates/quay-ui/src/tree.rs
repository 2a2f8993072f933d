//! The docking tree: a pool of [`Group`]s, the window containers docked in
//! them, and the z-ordered list of root groups.
//!
//! Structural edits live here and in [`crate::snap`]; rect computation lives in
//! [`crate::layout`]. Every edit leaves the tree canonical:
//!
//! - split weights of one node sum to 1
//! - a group is either a leaf or a split, never both
//! - no split has a direct child split on the same axis
//! - the sentinel empty group always resolves to a live leaf
//! - a group is in `root_groups` exactly when it has no parent

use indexmap::IndexMap;
use quay_core::alloc::{Pool, capacity_exceeded};
use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_core::profiling::profile_function;

use crate::container::Container;
use crate::error::{DockError, DockResult};
use crate::group::{Group, GroupContent, GroupId};
use crate::style::{DockingStyle, PoolLimits};
use crate::widget_id::WindowId;

pub struct DockTree {
    pub(crate) groups: Pool<Group>,
    pub(crate) containers: IndexMap<WindowId, Container>,
    /// Front is topmost. The fullscreen group, if any, is always last.
    pub(crate) root_groups: Vec<GroupId>,
    pub(crate) empty_group: GroupId,
    pub(crate) fullscreen_group: Option<GroupId>,
    pub(crate) canvas: Rect,
    pub(crate) style: DockingStyle,
    pub(crate) limits: PoolLimits,
}

impl DockTree {
    /// Create a tree whose sentinel empty group fills `canvas` as the
    /// fullscreen group.
    pub fn new(canvas: Rect, style: DockingStyle, limits: PoolLimits) -> Self {
        let mut groups = Pool::with_capacity("group pool", limits.max_groups);
        let handle = groups.insert_with(|handle| {
            Group::new(GroupId(handle), None, canvas, GroupContent::empty_leaf())
        });
        let empty_group = GroupId(handle);

        Self {
            groups,
            containers: IndexMap::new(),
            root_groups: vec![empty_group],
            empty_group,
            fullscreen_group: Some(empty_group),
            canvas,
            style,
            limits,
        }
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Rect) {
        self.canvas = canvas;
    }

    pub fn style(&self) -> &DockingStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut DockingStyle {
        &mut self.style
    }

    pub fn limits(&self) -> PoolLimits {
        self.limits
    }

    /// The permanent placeholder leaf.
    pub fn empty_group(&self) -> GroupId {
        self.empty_group
    }

    pub fn fullscreen_group(&self) -> Option<GroupId> {
        self.fullscreen_group
    }

    /// Root groups, topmost first.
    pub fn root_groups(&self) -> &[GroupId] {
        &self.root_groups
    }

    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(id.0)
    }

    pub(crate) fn group_mut(&mut self, id: GroupId) -> Option<&mut Group> {
        self.groups.get_mut(id.0)
    }

    pub(crate) fn try_group(&self, id: GroupId) -> DockResult<&Group> {
        self.group(id).ok_or(DockError::GroupNotFound(id))
    }

    pub(crate) fn try_group_mut(&mut self, id: GroupId) -> DockResult<&mut Group> {
        self.group_mut(id).ok_or(DockError::GroupNotFound(id))
    }

    pub fn contains_group(&self, id: GroupId) -> bool {
        self.groups.contains(id.0)
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// All live groups in pool order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().map(|(_, group)| group)
    }

    pub fn container(&self, id: WindowId) -> Option<&Container> {
        self.containers.get(&id)
    }

    pub fn container_mut(&mut self, id: WindowId) -> Option<&mut Container> {
        self.containers.get_mut(&id)
    }

    /// Containers in registration order.
    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// Leaf group a window is docked in.
    pub fn window_group(&self, id: WindowId) -> Option<GroupId> {
        self.containers.get(&id).and_then(|container| container.parent)
    }

    /// Allocate an empty leaf.
    ///
    /// A group without a parent becomes the topmost root. A group with a parent
    /// is not linked into the parent's splits; that is up to the caller.
    pub fn create_group(&mut self, parent: Option<GroupId>, rect: Rect) -> GroupId {
        self.alloc_group(parent, rect, GroupContent::empty_leaf())
    }

    pub(crate) fn alloc_group(
        &mut self,
        parent: Option<GroupId>,
        rect: Rect,
        content: GroupContent,
    ) -> GroupId {
        let handle = self
            .groups
            .insert_with(|handle| Group::new(GroupId(handle), parent, rect, content));
        let id = GroupId(handle);
        if parent.is_none() {
            self.root_groups.insert(0, id);
        }
        tracing::trace!("Allocated group {}", id);
        id
    }

    /// Release a group's slot and drop it from the root list.
    ///
    /// Children and windows are not touched. The sentinel is refused.
    pub fn free_group(&mut self, id: GroupId) -> DockResult<Group> {
        if id == self.empty_group {
            tracing::warn!("Refusing to free sentinel group {}", id);
            return Err(DockError::SentinelGroup(id));
        }
        let group = self.groups.remove(id.0).ok_or(DockError::GroupNotFound(id))?;
        self.root_groups.retain(|root| *root != id);
        if self.fullscreen_group == Some(id) {
            self.fullscreen_group = None;
        }
        tracing::trace!("Freed group {}", id);
        Ok(group)
    }

    /// Register a window and give it its own floating leaf at `rect`.
    pub fn open_window(&mut self, id: WindowId, title: &str, rect: Rect) -> DockResult<GroupId> {
        profile_function!();
        if self.containers.contains_key(&id) {
            return self.window_group(id).ok_or(DockError::WindowNotFound(id));
        }
        if self.containers.len() >= self.limits.max_containers {
            capacity_exceeded("container pool", self.limits.max_containers);
        }
        self.containers.insert(id, Container::new(id, title, rect));
        let group = self.create_group(None, rect);
        tracing::debug!("Opened window '{}' in group {}", title, group);
        self.parent_window(group, id)
    }

    /// Undock a window and forget its container.
    pub fn remove_window(&mut self, id: WindowId) -> DockResult<Container> {
        let old = self.window_group(id);
        if let Some(old) = old {
            self.detach_window(old, id)?;
            self.release_empty_group(old)?;
        }
        self.containers
            .shift_remove(&id)
            .ok_or(DockError::WindowNotFound(id))
    }

    /// Append `window` to leaf `id` as its active tab.
    ///
    /// If the window was docked elsewhere it is removed there first, and the
    /// old group is freed once it has no windows left (the sentinel and the
    /// fullscreen group are kept). Returns the group now holding the window.
    pub fn parent_window(&mut self, id: GroupId, window: WindowId) -> DockResult<GroupId> {
        let max_windows = self.limits.max_windows_per_group;
        let old = self
            .containers
            .get(&window)
            .ok_or(DockError::WindowNotFound(window))?
            .parent;

        match &mut self.try_group_mut(id)?.content {
            GroupContent::Leaf { windows, active } => {
                if let Some(index) = windows.iter().position(|w| *w == window) {
                    *active = index;
                    return Ok(id);
                }
                if windows.len() >= max_windows {
                    capacity_exceeded("group window list", max_windows);
                }
                windows.push(window);
                *active = windows.len() - 1;
            }
            GroupContent::Split { .. } => return Err(DockError::NotALeaf(id)),
        }

        if let Some(container) = self.containers.get_mut(&window) {
            container.parent = Some(id);
        }

        if let Some(old) = old.filter(|old| *old != id) {
            self.detach_window(old, window)?;
            self.release_empty_group(old)?;
        }
        // Releasing `old` may collapse `id` into its parent.
        self.window_group(window).ok_or(DockError::WindowNotFound(window))
    }

    /// Remove `window` from leaf `id`'s tab list, keeping the active index valid.
    fn detach_window(&mut self, id: GroupId, window: WindowId) -> DockResult<()> {
        if let GroupContent::Leaf { windows, active } = &mut self.try_group_mut(id)?.content
            && let Some(index) = windows.iter().position(|w| *w == window)
        {
            windows.remove(index);
            if index < *active {
                *active -= 1;
            }
            *active = (*active).min(windows.len().saturating_sub(1));
        }
        Ok(())
    }

    /// Free a leaf that lost its last window, detaching it first if docked.
    pub(crate) fn release_empty_group(&mut self, id: GroupId) -> DockResult<()> {
        if id == self.empty_group || Some(id) == self.fullscreen_group {
            return Ok(());
        }
        let group = self.try_group(id)?;
        if !group.is_leaf() || !group.windows().is_empty() {
            return Ok(());
        }
        if group.parent.is_some() {
            self.detach_from_parent(id)?;
        }
        self.free_group(id)?;
        Ok(())
    }

    /// Give `window` a floating group of its own.
    ///
    /// A window alone in an ordinary group keeps that group. Otherwise a new
    /// root leaf at half the old group's size, clamped to the canvas, takes it.
    pub fn unparent_window(&mut self, window: WindowId) -> DockResult<GroupId> {
        profile_function!();
        let old = self
            .window_group(window)
            .ok_or(DockError::WindowNotFound(window))?;
        let group = self.try_group(old)?;
        let shared = group.windows().len() > 1
            || old == self.empty_group
            || Some(old) == self.fullscreen_group;
        if !shared {
            return Ok(old);
        }

        let rect = Rect::from_pos_size(group.rect.position(), group.rect.size() * 0.5)
            .clamp_within(&self.canvas);
        let created = self.create_group(None, rect);
        let new = self.parent_window(created, window)?;
        tracing::debug!("Unparented window {} from {} into {}", window, old, new);
        Ok(new)
    }

    /// Merge every tab of `src` into `target`. The last merged tab is active.
    ///
    /// Returns the group holding the merged tabs, which is no longer `target`
    /// when emptying `src` collapsed `target` into their parent.
    pub fn combine_leaf_groups(&mut self, target: GroupId, src: GroupId) -> DockResult<GroupId> {
        profile_function!();
        if target == src {
            return Err(DockError::SameGroup(target));
        }
        if !self.try_group(target)?.is_leaf() {
            return Err(DockError::NotALeaf(target));
        }
        let source = self.try_group(src)?;
        if !source.is_leaf() {
            return Err(DockError::NotALeaf(src));
        }
        let windows = source.windows().to_vec();
        let mut holder = target;
        for window in windows {
            holder = self.parent_window(holder, window)?;
        }
        tracing::debug!("Combined tabs of {} into {}", src, holder);
        Ok(holder)
    }

    /// Move the content of root group `id` into the empty sentinel.
    ///
    /// The first leaf of the moved structure becomes the new sentinel and the
    /// node `id` is freed.
    pub fn replace_empty_group(&mut self, id: GroupId) -> DockResult<()> {
        profile_function!();
        let sentinel = self.empty_group;
        if id == sentinel {
            return Err(DockError::SameGroup(id));
        }
        if !self.try_group(sentinel)?.windows().is_empty() || !self.try_group(sentinel)?.is_leaf() {
            return Err(DockError::SentinelOccupied(sentinel));
        }
        let group = self.try_group_mut(id)?;
        if group.parent.is_some() {
            return Err(DockError::NotARoot(id));
        }
        let content = std::mem::replace(&mut group.content, GroupContent::empty_leaf());

        self.adopt_content(sentinel, &content);
        self.try_group_mut(sentinel)?.content = content;
        self.empty_group = self.first_leaf(sentinel).unwrap_or(sentinel);
        self.free_group(id)?;

        if let Some(parent) = self.try_group(sentinel)?.parent {
            self.merge_splits(parent);
        }
        tracing::debug!("Replaced empty group with {}; sentinel is now {}", id, self.empty_group);
        Ok(())
    }

    /// Point the children or windows of `content` at their new owner `id`.
    pub(crate) fn adopt_content(&mut self, id: GroupId, content: &GroupContent) {
        match content {
            GroupContent::Leaf { windows, .. } => {
                for window in windows {
                    if let Some(container) = self.containers.get_mut(window) {
                        container.parent = Some(id);
                    }
                }
            }
            GroupContent::Split { splits, .. } => {
                for split in splits {
                    if let Some(child) = self.group_mut(split.child) {
                        child.parent = Some(id);
                    }
                }
            }
        }
    }

    /// Raise a root group to the top of the z-order.
    pub fn bring_to_front(&mut self, id: GroupId) {
        if Some(id) == self.fullscreen_group {
            return;
        }
        if let Some(index) = self.root_groups.iter().position(|root| *root == id)
            && index != 0
        {
            self.root_groups.remove(index);
            self.root_groups.insert(0, id);
        }
    }

    /// Make root group `id` fill the canvas beneath every floating group.
    pub fn set_fullscreen_group(&mut self, id: Option<GroupId>) -> DockResult<()> {
        let Some(id) = id else {
            self.fullscreen_group = None;
            return Ok(());
        };
        if self.try_group(id)?.parent.is_some() {
            return Err(DockError::NotARoot(id));
        }
        self.root_groups.retain(|root| *root != id);
        self.root_groups.push(id);
        self.fullscreen_group = Some(id);
        Ok(())
    }

    /// Whether `id` is `ancestor` or lies somewhere beneath it.
    pub fn contained_in(&self, id: GroupId, ancestor: GroupId) -> bool {
        let mut current = Some(id);
        while let Some(group) = current {
            if group == ancestor {
                return true;
            }
            current = self.group(group).and_then(|g| g.parent);
        }
        false
    }

    /// Topmost ancestor, walking parent links.
    pub fn root_of(&self, id: GroupId) -> GroupId {
        let mut current = id;
        while let Some(parent) = self.group(current).and_then(|g| g.parent) {
            current = parent;
        }
        current
    }

    /// First leaf in depth-first order.
    pub fn first_leaf(&self, id: GroupId) -> Option<GroupId> {
        let group = self.group(id)?;
        match &group.content {
            GroupContent::Leaf { .. } => Some(id),
            GroupContent::Split { splits, .. } => {
                splits.iter().find_map(|split| self.first_leaf(split.child))
            }
        }
    }

    /// `id` and every group beneath it, parents before children.
    pub fn subtree(&self, id: GroupId) -> Vec<GroupId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(group) = self.group(current) else {
                continue;
            };
            out.push(current);
            stack.extend(group.splits().iter().rev().map(|split| split.child));
        }
        out
    }

    /// Leaves under `id` in depth-first order.
    pub fn leaves(&self, id: GroupId) -> Vec<GroupId> {
        let mut out = Vec::new();
        self.collect_leaves(id, &mut out);
        out
    }

    fn collect_leaves(&self, id: GroupId, out: &mut Vec<GroupId>) {
        let Some(group) = self.group(id) else {
            return;
        };
        match &group.content {
            GroupContent::Leaf { .. } => out.push(id),
            GroupContent::Split { splits, .. } => {
                for split in splits {
                    self.collect_leaves(split.child, out);
                }
            }
        }
    }

    /// Topmost root whose rect contains `point`.
    pub fn root_at(&self, point: Vec2) -> Option<GroupId> {
        self.root_groups.iter().copied().find(|root| {
            self.group(*root)
                .is_some_and(|group| group.rect.contains(point))
        })
    }

    /// Topmost leaf under `point`, ignoring the subtree of `exclude`.
    pub fn leaf_at(&self, point: Vec2, exclude: Option<GroupId>) -> Option<GroupId> {
        let root = self.root_groups.iter().copied().find(|root| {
            exclude != Some(*root)
                && self
                    .group(*root)
                    .is_some_and(|group| group.rect.contains(point))
        })?;
        self.leaf_in(root, point, exclude)
    }

    fn leaf_in(&self, id: GroupId, point: Vec2, exclude: Option<GroupId>) -> Option<GroupId> {
        if exclude == Some(id) {
            return None;
        }
        let group = self.group(id)?;
        if !group.rect.contains(point) {
            return None;
        }
        match &group.content {
            GroupContent::Leaf { .. } => Some(id),
            GroupContent::Split { splits, .. } => splits
                .iter()
                .find_map(|split| self.leaf_in(split.child, point, exclude)),
        }
    }
}

impl std::fmt::Debug for DockTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DockTree")
            .field("groups", &self.groups.len())
            .field("containers", &self.containers.len())
            .field("root_groups", &self.root_groups)
            .field("empty_group", &self.empty_group)
            .field("fullscreen_group", &self.fullscreen_group)
            .field("canvas", &self.canvas)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::{DockSide, SplitAxis};

    const CANVAS: Rect = Rect::new(0.0, 0.0, 800.0, 600.0);

    fn tree() -> DockTree {
        DockTree::new(CANVAS, DockingStyle::default(), PoolLimits::default())
    }

    #[test]
    fn test_new_tree_has_fullscreen_sentinel() {
        let tree = tree();
        let sentinel = tree.empty_group();
        assert_eq!(tree.fullscreen_group(), Some(sentinel));
        assert_eq!(tree.root_groups(), &[sentinel]);
        assert!(tree.group(sentinel).unwrap().is_leaf());
    }

    #[test]
    fn test_open_window_creates_topmost_root() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let group = tree
            .open_window(a, "A", Rect::new(0.0, 0.0, 200.0, 200.0))
            .unwrap();
        assert_eq!(tree.root_groups()[0], group);
        assert_eq!(*tree.root_groups().last().unwrap(), tree.empty_group());
        assert_eq!(tree.window_group(a), Some(group));
        assert_eq!(tree.group(group).unwrap().windows(), &[a]);
    }

    #[test]
    fn test_parent_window_frees_emptied_group() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let b = WindowId::new("B");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let gb = tree.open_window(b, "B", Rect::new(200.0, 0.0, 100.0, 100.0)).unwrap();

        tree.parent_window(ga, b).unwrap();
        assert!(!tree.contains_group(gb));
        assert!(!tree.root_groups().contains(&gb));
        let group = tree.group(ga).unwrap();
        assert_eq!(group.windows(), &[a, b]);
        assert_eq!(group.active_window(), Some(b));
    }

    #[test]
    fn test_parent_window_returns_holder_after_sibling_collapse() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let b = WindowId::new("B");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        let gb = tree.open_window(b, "B", Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        assert!(tree.snap_group(gb, ga, SplitAxis::Vertical, DockSide::After));

        // Emptying A's leaf collapses the split, so `gb` dies and `ga` takes its tabs.
        let holder = tree.parent_window(gb, a).unwrap();
        assert!(tree.contains_group(holder));
        assert_eq!(holder, ga);
        assert!(!tree.contains_group(gb));
        assert_eq!(tree.window_group(a), Some(holder));
        assert_eq!(tree.group(holder).unwrap().windows(), &[b, a]);
    }

    #[test]
    fn test_combine_sibling_leaves_returns_live_holder() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let b = WindowId::new("B");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        let gb = tree.open_window(b, "B", Rect::new(0.0, 0.0, 400.0, 300.0)).unwrap();
        assert!(tree.snap_group(gb, ga, SplitAxis::Horizontal, DockSide::Before));
        let a_leaf = tree.group(ga).unwrap().splits()[1].child;

        let holder = tree.combine_leaf_groups(gb, a_leaf).unwrap();
        assert_eq!(holder, ga);
        let group = tree.group(holder).unwrap();
        assert!(group.is_leaf());
        assert_eq!(group.windows(), &[b, a]);
        assert_eq!(group.active_window(), Some(a));
    }

    #[test]
    fn test_sentinel_survives_losing_its_windows() {
        let mut tree = tree();
        let sentinel = tree.empty_group();
        let a = WindowId::new("A");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        tree.parent_window(sentinel, a).unwrap();
        assert!(!tree.contains_group(ga));

        let floating = tree.unparent_window(a).unwrap();
        assert_ne!(floating, sentinel);
        assert!(tree.contains_group(sentinel));
        assert!(tree.group(sentinel).unwrap().windows().is_empty());
        assert_eq!(tree.root_groups()[0], floating);
    }

    #[test]
    fn test_unparent_single_window_is_cheap() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();
        let count = tree.group_count();
        assert_eq!(tree.unparent_window(a).unwrap(), ga);
        assert_eq!(tree.group_count(), count);
    }

    #[test]
    fn test_unparent_shared_window_gets_half_size_group() {
        let mut tree = tree();
        let a = WindowId::new("A");
        let b = WindowId::new("B");
        let ga = tree.open_window(a, "A", Rect::new(100.0, 100.0, 300.0, 200.0)).unwrap();
        tree.open_window(b, "B", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.parent_window(ga, b).unwrap();

        let gb = tree.unparent_window(b).unwrap();
        assert_ne!(gb, ga);
        assert_eq!(tree.group(gb).unwrap().rect(), Rect::new(100.0, 100.0, 150.0, 100.0));
        assert_eq!(tree.group(ga).unwrap().windows(), &[a]);
    }

    #[test]
    fn test_free_group_refuses_sentinel() {
        let mut tree = tree();
        let sentinel = tree.empty_group();
        assert_eq!(tree.free_group(sentinel).unwrap_err(), DockError::SentinelGroup(sentinel));
        assert!(tree.contains_group(sentinel));
    }

    #[test]
    fn test_bring_to_front_keeps_fullscreen_last() {
        let mut tree = tree();
        let ga = tree.open_window(WindowId::new("A"), "A", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        let gb = tree.open_window(WindowId::new("B"), "B", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        assert_eq!(tree.root_groups()[0], gb);

        tree.bring_to_front(ga);
        tree.bring_to_front(tree.empty_group());
        assert_eq!(tree.root_groups(), &[ga, gb, tree.empty_group()]);
    }

    #[test]
    fn test_set_fullscreen_moves_group_to_back() {
        let mut tree = tree();
        let ga = tree.open_window(WindowId::new("A"), "A", Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
        tree.set_fullscreen_group(Some(ga)).unwrap();
        assert_eq!(*tree.root_groups().last().unwrap(), ga);
        assert_eq!(tree.fullscreen_group(), Some(ga));
    }

    #[test]
    fn test_replace_empty_moves_content_into_sentinel() {
        let mut tree = tree();
        let sentinel = tree.empty_group();
        let a = WindowId::new("A");
        let ga = tree.open_window(a, "A", Rect::new(0.0, 0.0, 100.0, 100.0)).unwrap();

        tree.replace_empty_group(ga).unwrap();
        assert!(!tree.contains_group(ga));
        assert_eq!(tree.window_group(a), Some(sentinel));
        assert_eq!(tree.empty_group(), sentinel);
        assert_eq!(tree.root_groups(), &[sentinel]);
        assert_eq!(
            tree.replace_empty_group(sentinel).unwrap_err(),
            DockError::SameGroup(sentinel)
        );
    }
}
