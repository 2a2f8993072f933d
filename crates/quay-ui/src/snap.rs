//! Docking and undocking of groups: snap, unsnap and split canonicalization.

use quay_core::alloc::capacity_exceeded;
use quay_core::geometry::Rect;
use quay_core::profiling::profile_function;

use crate::error::{DockError, DockResult};
use crate::group::{DockSide, GroupContent, GroupId, Split, SplitAxis};
use crate::tree::DockTree;

impl DockTree {
    /// Dock root group `id` next to `target` along `axis`, on `side`.
    ///
    /// The parent of `target` is tried first with `target` as the sibling to
    /// insert beside; this only succeeds when the parent already splits along
    /// `axis`. Otherwise `target` itself is split. Returns `false` (and changes
    /// nothing) when the request is not valid.
    pub fn snap_group(&mut self, id: GroupId, target: GroupId, axis: SplitAxis, side: DockSide) -> bool {
        profile_function!();
        let snapped = self.snap_with_sibling(id, target, axis, side, None);
        if snapped {
            tracing::debug!("Snapped {} {:?} of {} along {:?}", id, side, target, axis);
        }
        snapped
    }

    fn snap_with_sibling(
        &mut self,
        id: GroupId,
        target: GroupId,
        axis: SplitAxis,
        side: DockSide,
        sibling: Option<GroupId>,
    ) -> bool {
        if !self.can_snap(id, target) {
            return false;
        }

        if sibling.is_none()
            && let Some(parent) = self.group(target).and_then(|g| g.parent)
            && self.snap_with_sibling(id, parent, axis, side, Some(target))
        {
            return true;
        }

        let Some(group) = self.group(target) else {
            return false;
        };
        let target_rect = group.rect;
        let max_splits = self.limits.max_splits_per_group;

        match group.content.clone() {
            GroupContent::Split { axis: current, mut splits } if current == axis => {
                if splits.len() >= max_splits {
                    capacity_exceeded("group split list", max_splits);
                }
                match sibling {
                    Some(sibling) => {
                        let Some(index) = splits.iter().position(|s| s.child == sibling) else {
                            return false;
                        };
                        let half = splits[index].weight * 0.5;
                        splits[index].weight = half;
                        let at = if side.is_after() { index + 1 } else { index };
                        splits.insert(at, Split::new(id, half));
                    }
                    None => {
                        let count = splits.len() as f32;
                        let scale = count / (count + 1.0);
                        for split in &mut splits {
                            split.weight *= scale;
                        }
                        let entry = Split::new(id, 1.0 / (count + 1.0));
                        match side {
                            DockSide::Before => splits.insert(0, entry),
                            DockSide::After => splits.push(entry),
                        }
                    }
                }
                if let Some(group) = self.group_mut(target) {
                    group.content = GroupContent::Split { axis, splits };
                }
            }
            _ if sibling.is_some() => return false,
            content => {
                let was_sentinel = target == self.empty_group;
                let moved = self.alloc_group(Some(target), target_rect, content.clone());
                self.adopt_content(moved, &content);
                if was_sentinel {
                    self.empty_group = moved;
                }
                let splits = match side {
                    DockSide::Before => vec![Split::new(id, 0.5), Split::new(moved, 0.5)],
                    DockSide::After => vec![Split::new(moved, 0.5), Split::new(id, 0.5)],
                };
                if let Some(group) = self.group_mut(target) {
                    group.content = GroupContent::Split { axis, splits };
                }
            }
        }

        self.root_groups.retain(|root| *root != id);
        if let Some(group) = self.group_mut(id) {
            group.span_before_snap = group.rect.size();
            group.parent = Some(target);
        }
        self.merge_splits(target);
        true
    }

    fn can_snap(&self, id: GroupId, target: GroupId) -> bool {
        if id == target {
            tracing::debug!("Cannot snap {} onto itself", id);
            return false;
        }
        let Some(group) = self.group(id) else {
            return false;
        };
        if !self.contains_group(target) {
            return false;
        }
        if group.parent.is_some() || Some(id) == self.fullscreen_group {
            tracing::debug!("Cannot snap {}: not a floating root", id);
            return false;
        }
        if self.contained_in(target, id) {
            tracing::debug!("Cannot snap {} into its own subtree", id);
            return false;
        }
        true
    }

    /// Undock `id` and make it the topmost floating root again.
    ///
    /// The sentinel stays where it is; its windows move to a new floating group
    /// instead, which is returned.
    pub fn unsnap_group(&mut self, id: GroupId) -> DockResult<GroupId> {
        profile_function!();
        if id == self.empty_group {
            return self.spin_off_sentinel();
        }

        self.detach_from_parent(id)?;
        let canvas = self.canvas;
        let group = self.try_group_mut(id)?;
        let span = if group.span_before_snap.min_element() > 0.0 {
            group.span_before_snap
        } else {
            group.rect.size() * 0.5
        };
        group.rect = Rect::from_pos_size(group.rect.position(), span).clamp_within(&canvas);
        self.root_groups.insert(0, id);
        tracing::debug!("Unsnapped {}", id);
        Ok(id)
    }

    fn spin_off_sentinel(&mut self) -> DockResult<GroupId> {
        let sentinel = self.empty_group;
        let canvas = self.canvas;
        let group = self.try_group_mut(sentinel)?;
        let (windows, active) = match &mut group.content {
            GroupContent::Leaf { windows, active } if !windows.is_empty() => {
                (std::mem::take(windows), std::mem::replace(active, 0))
            }
            _ => return Err(DockError::NothingToUnsnap(sentinel)),
        };
        let rect = Rect::from_pos_size(group.rect.position(), group.rect.size() * 0.5)
            .clamp_within(&canvas);

        let content = GroupContent::Leaf { windows, active };
        let floating = self.alloc_group(None, rect, content.clone());
        self.adopt_content(floating, &content);
        tracing::debug!("Moved sentinel windows into floating group {}", floating);
        Ok(floating)
    }

    /// Remove `id` from its parent's splits and renormalize the rest.
    ///
    /// A parent left with one child collapses into it. `id` ends up parentless
    /// but is not added to the root list.
    pub(crate) fn detach_from_parent(&mut self, id: GroupId) -> DockResult<()> {
        let parent = self.try_group(id)?.parent.ok_or(DockError::NotDocked(id))?;
        let remaining = match &mut self.try_group_mut(parent)?.content {
            GroupContent::Split { splits, .. } => {
                splits.retain(|split| split.child != id);
                normalize(splits);
                splits.len()
            }
            GroupContent::Leaf { .. } => return Err(DockError::NotASplit(parent)),
        };
        self.try_group_mut(id)?.parent = None;

        match remaining {
            0 => self.try_group_mut(parent)?.content = GroupContent::empty_leaf(),
            1 => self.collapse_into_parent(parent)?,
            _ => {}
        }
        Ok(())
    }

    /// Replace a single-child split with its child's content and free the child.
    fn collapse_into_parent(&mut self, parent: GroupId) -> DockResult<()> {
        let child = match self.try_group(parent)?.splits() {
            [only] => only.child,
            _ => return Ok(()),
        };
        let content = self.try_group(child)?.content.clone();
        self.adopt_content(parent, &content);
        self.try_group_mut(parent)?.content = content;
        if child == self.empty_group {
            self.empty_group = parent;
        }
        self.groups.remove(child.0);
        tracing::debug!("Collapsed {} into {}", child, parent);

        if let Some(grandparent) = self.try_group(parent)?.parent {
            self.merge_splits(grandparent);
        }
        Ok(())
    }

    /// Splice children that split along the same axis as `id` into `id`.
    pub fn merge_splits(&mut self, id: GroupId) {
        let (axis, splits) = match self.group(id).map(|g| &g.content) {
            Some(GroupContent::Split { axis, splits }) => (*axis, splits.clone()),
            _ => return,
        };

        let mut merged = Vec::with_capacity(splits.len());
        let mut absorbed = Vec::new();
        for split in &splits {
            match self.group(split.child).map(|g| &g.content) {
                Some(GroupContent::Split {
                    axis: child_axis,
                    splits: grandchildren,
                }) if *child_axis == axis && !grandchildren.is_empty() => {
                    merged.extend(
                        grandchildren
                            .iter()
                            .map(|g| Split::new(g.child, g.weight * split.weight)),
                    );
                    absorbed.push(split.child);
                }
                _ => merged.push(*split),
            }
        }
        if absorbed.is_empty() {
            return;
        }

        let max_splits = self.limits.max_splits_per_group;
        if merged.len() > max_splits {
            capacity_exceeded("group split list", max_splits);
        }
        for split in &merged {
            if let Some(child) = self.group_mut(split.child) {
                child.parent = Some(id);
            }
        }
        for child in absorbed {
            self.groups.remove(child.0);
            tracing::debug!("Merged split {} into {}", child, id);
        }
        if let Some(group) = self.group_mut(id) {
            group.content = GroupContent::Split { axis, splits: merged };
        }
    }
}

/// Scale weights so they sum to one, or share equally if they sum to nothing.
pub(crate) fn normalize(splits: &mut [Split]) {
    let total: f32 = splits.iter().map(|split| split.weight).sum();
    if total > f32::EPSILON {
        for split in splits.iter_mut() {
            split.weight /= total;
        }
    } else if !splits.is_empty() {
        let share = 1.0 / splits.len() as f32;
        for split in splits.iter_mut() {
            split.weight = share;
        }
    }
}
