//! Turning split weights into pixels, and pixel drags back into weights.

use quay_core::geometry::Rect;
use quay_core::profiling::{profile_function, profile_scope};

use crate::draw_list::OVERLAY_LAYER;
use crate::error::{DockError, DockResult};
use crate::group::{DockSide, GroupContent, GroupId, SplitAxis};
use crate::snap::normalize;
use crate::tree::DockTree;

/// One of the four edges of a floating group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    /// Axis along which dragging this edge resizes.
    pub fn axis(&self) -> SplitAxis {
        match self {
            Edge::Left | Edge::Right => SplitAxis::Vertical,
            Edge::Top | Edge::Bottom => SplitAxis::Horizontal,
        }
    }

    pub fn side(&self) -> DockSide {
        match self {
            Edge::Left | Edge::Top => DockSide::Before,
            Edge::Right | Edge::Bottom => DockSide::After,
        }
    }

    /// Strip of `thickness` pixels centred on this edge of `rect`.
    pub fn handle_rect(&self, rect: &Rect, thickness: f32) -> Rect {
        let half = thickness * 0.5;
        match self {
            Edge::Left => Rect::new(rect.x - half, rect.y, thickness, rect.height),
            Edge::Right => Rect::new(rect.right() - half, rect.y, thickness, rect.height),
            Edge::Top => Rect::new(rect.x, rect.y - half, rect.width, thickness),
            Edge::Bottom => Rect::new(rect.x, rect.bottom() - half, rect.width, thickness),
        }
    }
}

/// Layer of the root at `index` in a root list of `count`, topmost highest.
/// Saturates below [`OVERLAY_LAYER`].
pub(crate) fn root_layer(count: usize, index: usize) -> u16 {
    u16::try_from(count.saturating_sub(index))
        .unwrap_or(u16::MAX)
        .min(OVERLAY_LAYER - 1)
}

impl DockTree {
    /// Resolve every group's rect, root, parent and z, and every docked
    /// window's rect, from the root rects and split weights.
    ///
    /// Roots are layered by their position in the root list: topmost gets
    /// the highest z.
    pub fn propagate(&mut self) {
        profile_function!();
        let canvas = self.canvas;
        if let Some(fullscreen) = self.fullscreen_group
            && let Some(group) = self.group_mut(fullscreen)
        {
            group.rect = canvas;
        }

        let roots = self.root_groups.clone();
        let count = roots.len();
        for (index, root) in roots.into_iter().enumerate() {
            let z = root_layer(count, index);
            let Some(rect) = self.group(root).map(|g| g.rect) else {
                continue;
            };
            self.propagate_group(root, root, None, rect, z);
        }
    }

    fn propagate_group(&mut self, id: GroupId, root: GroupId, parent: Option<GroupId>, rect: Rect, z: u16) {
        let Some(group) = self.groups.get_mut(id.0) else {
            return;
        };
        group.root = root;
        group.parent = parent;
        group.rect = rect;
        group.z = z;
        let window_rect = group.window_rect(&self.style);

        match &mut group.content {
            GroupContent::Split { axis, splits } => {
                let axis = *axis;
                let extent = axis.extent(&rect);
                let start = axis.start(&rect);
                let mut offset = 0.0;
                let mut children = Vec::with_capacity(splits.len());
                for split in splits.iter_mut() {
                    let size = extent * split.weight;
                    children.push((split.child, axis.slice(&rect, offset, size)));
                    offset += size;
                    split.div_position = start + offset;
                }
                for (child, child_rect) in children {
                    self.propagate_group(child, root, Some(id), child_rect, z);
                }
            }
            GroupContent::Leaf { windows, .. } => {
                for window in windows.iter() {
                    if let Some(container) = self.containers.get_mut(window) {
                        container.parent = Some(id);
                        container.rect = window_rect;
                        container.z = z;
                    }
                }
            }
        }
    }

    /// Smallest extent `id` can shrink to along `axis` when its `side` end
    /// moves, given it currently spans `available` pixels.
    ///
    /// Children across the axis must each fit, so the largest wins. Along the
    /// axis only the end child shrinks; its siblings keep their pixels.
    pub fn get_minimum_size(&self, id: GroupId, available: f32, axis: SplitAxis, side: DockSide) -> f32 {
        let Some(group) = self.group(id) else {
            return 0.0;
        };
        match &group.content {
            GroupContent::Leaf { .. } => match axis {
                SplitAxis::Vertical => self.style.min_window_width + self.style.border * 2.0,
                SplitAxis::Horizontal => self.style.min_leaf_height(),
            },
            GroupContent::Split { axis: own, splits } if *own != axis => splits
                .iter()
                .map(|split| self.get_minimum_size(split.child, available, axis, side))
                .fold(0.0, f32::max),
            GroupContent::Split { splits, .. } => {
                let end = side.end_index(splits.len());
                splits
                    .iter()
                    .enumerate()
                    .map(|(index, split)| {
                        let share = available * split.weight;
                        if index == end {
                            self.get_minimum_size(split.child, share, axis, side)
                        } else {
                            share
                        }
                    })
                    .sum()
            }
        }
    }

    /// Apply an extent change of factor `pct_change` at the `side` end of
    /// `id` along `axis`, keeping every child's pixel size except the ones
    /// touching that end.
    ///
    /// With old weights `w` and extent `E`, a non-end child keeps `w * E`
    /// pixels of the new extent `p * E`, so its weight becomes `w / p`. The end
    /// child takes the rest, `1 - (1 - w_e) / p`, and its own subtree grows by
    /// `(p - 1 + w_e) / w_e`.
    pub fn resize_border_splits_and_propagate(
        &mut self,
        id: GroupId,
        pct_change: f32,
        axis: SplitAxis,
        side: DockSide,
    ) {
        if !pct_change.is_finite() || pct_change <= 0.0 {
            return;
        }
        let Some(group) = self.group_mut(id) else {
            return;
        };
        match &mut group.content {
            GroupContent::Leaf { .. } => {}
            GroupContent::Split { axis: own, splits } if *own != axis => {
                let children: Vec<_> = splits.iter().map(|split| split.child).collect();
                for child in children {
                    self.resize_border_splits_and_propagate(child, pct_change, axis, side);
                }
            }
            GroupContent::Split { splits, .. } => {
                if splits.is_empty() {
                    return;
                }
                let end = side.end_index(splits.len());
                let old_end = splits[end].weight;
                for (index, split) in splits.iter_mut().enumerate() {
                    split.weight = if index == end {
                        (1.0 - (1.0 - old_end) / pct_change).max(0.0)
                    } else {
                        split.weight / pct_change
                    };
                }
                normalize(splits);
                let child = splits[end].child;
                let child_change = if old_end > 0.0 {
                    splits[end].weight * pct_change / old_end
                } else {
                    1.0
                };
                self.resize_border_splits_and_propagate(child, child_change, axis, side);
            }
        }
    }

    /// Move the divider between children `index` and `index + 1` of split
    /// `id` by `delta` pixels.
    ///
    /// The move is clamped so neither child goes below its minimum size.
    /// Returns the delta actually applied.
    pub fn drag_splitter(&mut self, id: GroupId, index: usize, delta: f32) -> DockResult<f32> {
        profile_scope!("drag_splitter");
        let group = self.try_group(id)?;
        let (axis, splits) = match &group.content {
            GroupContent::Split { axis, splits } => (*axis, splits),
            GroupContent::Leaf { .. } => return Err(DockError::NotASplit(id)),
        };
        let extent = axis.extent(&group.rect);
        let (Some(first), Some(second)) = (splits.get(index).copied(), splits.get(index + 1).copied()) else {
            return Ok(0.0);
        };
        let first_extent = first.weight * extent;
        let second_extent = second.weight * extent;
        if first_extent <= 0.0 || second_extent <= 0.0 {
            return Ok(0.0);
        }

        let first_min = self.get_minimum_size(first.child, first_extent, axis, DockSide::After);
        let second_min = self.get_minimum_size(second.child, second_extent, axis, DockSide::Before);
        let lower = -(first_extent - first_min).max(0.0);
        let upper = (second_extent - second_min).max(0.0);
        let delta = delta.clamp(lower, upper);
        if delta == 0.0 {
            return Ok(0.0);
        }

        let new_first = first_extent + delta;
        let new_second = second_extent - delta;
        if let GroupContent::Split { splits, .. } = &mut self.try_group_mut(id)?.content {
            splits[index].weight = new_first / extent;
            splits[index + 1].weight = new_second / extent;
        }
        self.resize_border_splits_and_propagate(first.child, new_first / first_extent, axis, DockSide::After);
        self.resize_border_splits_and_propagate(second.child, new_second / second_extent, axis, DockSide::Before);
        tracing::trace!("Splitter {} of {} moved by {}", index, id, delta);
        Ok(delta)
    }

    /// Drag one edge of root group `id` by `delta` pixels along the edge's
    /// axis, clamped so the group stays above its minimum size.
    ///
    /// Returns the change in extent.
    pub fn resize_root_edge(&mut self, id: GroupId, edge: Edge, delta: f32) -> DockResult<f32> {
        profile_scope!("resize_root_edge");
        let group = self.try_group(id)?;
        if group.parent.is_some() {
            return Err(DockError::NotARoot(id));
        }
        let axis = edge.axis();
        let side = edge.side();
        let rect = group.rect;
        let extent = axis.extent(&rect);
        if extent <= 0.0 {
            return Ok(0.0);
        }

        let minimum = self.get_minimum_size(id, extent, axis, side).min(extent);
        let growth = match side {
            DockSide::Before => -delta,
            DockSide::After => delta,
        };
        let new_extent = (extent + growth).max(minimum);
        let growth = new_extent - extent;
        if growth == 0.0 {
            return Ok(0.0);
        }

        let resized = match (axis, side) {
            (SplitAxis::Vertical, DockSide::Before) => {
                Rect::new(rect.x - growth, rect.y, new_extent, rect.height)
            }
            (SplitAxis::Vertical, DockSide::After) => Rect::new(rect.x, rect.y, new_extent, rect.height),
            (SplitAxis::Horizontal, DockSide::Before) => {
                Rect::new(rect.x, rect.y - growth, rect.width, new_extent)
            }
            (SplitAxis::Horizontal, DockSide::After) => Rect::new(rect.x, rect.y, rect.width, new_extent),
        };
        self.try_group_mut(id)?.rect = resized;
        self.resize_border_splits_and_propagate(id, new_extent / extent, axis, side);
        Ok(growth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DockingStyle, PoolLimits};
    use crate::widget_id::WindowId;

    fn tree() -> DockTree {
        let style = DockingStyle::default().min_window_width(100.0);
        DockTree::new(Rect::new(0.0, 0.0, 1000.0, 800.0), style, PoolLimits::default())
    }

    fn window(tree: &mut DockTree, name: &str) -> GroupId {
        tree.open_window(WindowId::new(name), name, Rect::new(0.0, 0.0, 600.0, 400.0))
            .unwrap()
    }

    fn sum(tree: &DockTree, id: GroupId) -> f32 {
        tree.group(id).unwrap().splits().iter().map(|s| s.weight).sum()
    }

    #[test]
    fn test_propagate_assigns_child_rects() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        let b = window(&mut tree, "B");
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        tree.propagate();

        let group = tree.group(a).unwrap();
        let left = tree.group(group.splits()[0].child).unwrap();
        let right = tree.group(b).unwrap();
        assert_eq!(left.rect(), Rect::new(0.0, 0.0, 300.0, 400.0));
        assert_eq!(right.rect(), Rect::new(300.0, 0.0, 300.0, 400.0));
        assert_eq!(group.splits()[0].div_position, 300.0);
        assert_eq!(right.root(), a);

        let container = tree.container(WindowId::new("B")).unwrap();
        assert_eq!(container.rect(), right.window_rect(tree.style()));
        assert_eq!(container.z(), right.z());
    }

    #[test]
    fn test_fullscreen_fills_canvas_at_lowest_z() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        tree.propagate();
        let fullscreen = tree.group(tree.empty_group()).unwrap();
        assert_eq!(fullscreen.rect(), tree.canvas());
        assert_eq!(fullscreen.z(), 1);
        assert_eq!(tree.group(a).unwrap().z(), 2);
    }

    #[test]
    fn test_minimum_size_of_leaf_and_splits() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        let style = tree.style().clone();
        let leaf_width = style.min_window_width + style.border * 2.0;
        assert_eq!(tree.get_minimum_size(a, 600.0, SplitAxis::Vertical, DockSide::After), leaf_width);
        assert_eq!(
            tree.get_minimum_size(a, 400.0, SplitAxis::Horizontal, DockSide::After),
            style.min_leaf_height()
        );

        let b = window(&mut tree, "B");
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        // The left half keeps its 300px, only the right end can shrink.
        assert_eq!(
            tree.get_minimum_size(a, 600.0, SplitAxis::Vertical, DockSide::After),
            300.0 + leaf_width
        );
        assert_eq!(
            tree.get_minimum_size(a, 400.0, SplitAxis::Horizontal, DockSide::After),
            style.min_leaf_height()
        );
    }

    #[test]
    fn test_drag_splitter_clamps_to_minimum() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        let b = window(&mut tree, "B");
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        tree.propagate();

        let applied = tree.drag_splitter(a, 0, -1000.0).unwrap();
        tree.propagate();
        let left = tree.group(a).unwrap().splits()[0].child;
        let min = tree.style().min_window_width + tree.style().border * 2.0;
        assert!((tree.group(left).unwrap().rect().width - min).abs() < 1e-3);
        assert!((applied + (300.0 - min)).abs() < 1e-3);
        assert!((tree.group(b).unwrap().rect().width - (600.0 - min)).abs() < 1e-3);
        assert!((sum(&tree, a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_border_keeps_pixels_of_far_children() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        let b = window(&mut tree, "B");
        let c = window(&mut tree, "C");
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        assert!(tree.snap_group(c, a, SplitAxis::Vertical, DockSide::After));
        tree.propagate();
        let first = tree.group(a).unwrap().splits()[0].child;
        let before = tree.group(first).unwrap().rect().width;

        tree.resize_root_edge(a, Edge::Right, 300.0).unwrap();
        tree.propagate();
        assert_eq!(tree.group(a).unwrap().rect().width, 900.0);
        assert!((tree.group(first).unwrap().rect().width - before).abs() < 1e-3);
        assert!((tree.group(c).unwrap().rect().width - (200.0 + 300.0)).abs() < 1e-3);
        assert!((sum(&tree, a) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_resize_left_edge_moves_origin() {
        let mut tree = tree();
        let a = window(&mut tree, "A");
        tree.resize_root_edge(a, Edge::Left, 50.0).unwrap();
        let rect = tree.group(a).unwrap().rect();
        assert_eq!(rect, Rect::new(50.0, 0.0, 550.0, 400.0));

        let applied = tree.resize_root_edge(a, Edge::Left, 10_000.0).unwrap();
        let min = tree.style().min_window_width + tree.style().border * 2.0;
        assert!((applied + (550.0 - min)).abs() < 1e-3);
    }

    #[test]
    fn test_edge_handle_rect_is_centred() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert_eq!(Edge::Right.handle_rect(&rect, 6.0), Rect::new(107.0, 10.0, 6.0, 50.0));
        assert_eq!(Edge::Top.handle_rect(&rect, 6.0), Rect::new(10.0, 7.0, 100.0, 6.0));
    }

    #[test]
    fn test_root_layer_saturates_below_overlay() {
        assert_eq!(root_layer(3, 0), 3);
        assert_eq!(root_layer(3, 2), 1);
        assert_eq!(root_layer(70_000, 0), OVERLAY_LAYER - 1);
        assert_eq!(root_layer(70_000, 69_999), 1);
    }
}
