//! Drag-to-dock: target gizmos, drop previews and the deferred dock request.
//!
//! While a group is dragged, the leaf under the pointer offers a set of
//! gizmos. The first gizmo containing the pointer is hot and previews where
//! the group would land. Releasing over it records a [`DockRequest`]; the tree
//! is only changed when the frame driver applies that request at the start of
//! the next frame.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_core::profiling::profile_function;
use quay_core::render::Renderer;

use crate::draw_list::{DrawList, OVERLAY_LAYER};
use crate::error::{DockError, DockResult};
use crate::group::{DockSide, GroupId, SplitAxis};
use crate::interaction::Interaction;
use crate::layout::Edge;
use crate::tree::DockTree;
use crate::widget_id::WidgetId;

/// What happens when a group is dropped on a gizmo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockKind {
    /// Split the target and put the group on `side` along `axis`.
    Snap { axis: SplitAxis, side: DockSide },
    /// Merge the group's windows into the target leaf as tabs.
    Tabs,
    /// Move the group's structure into the empty sentinel.
    ReplaceEmpty,
}

impl DockKind {
    fn from_edge(edge: Edge) -> Self {
        DockKind::Snap {
            axis: edge.axis(),
            side: edge.side(),
        }
    }
}

/// A drop recorded on release, applied at the start of the next frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockRequest {
    pub group: GroupId,
    pub target: GroupId,
    pub kind: DockKind,
}

/// One drop affordance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DockGizmo {
    /// Hit area.
    pub rect: Rect,
    /// Area the dropped group would occupy.
    pub preview: Rect,
    pub target: GroupId,
    pub kind: DockKind,
}

impl DockTree {
    /// Gizmos offered for dropping `dragged` onto leaf `target`, in priority
    /// order.
    ///
    /// Edge gizmos of `target`'s root come first when `target` is docked, then
    /// `target`'s own edges, then its centre. An empty sentinel only offers its
    /// centre, which replaces it.
    pub fn dock_gizmos(&self, dragged: GroupId, target: GroupId) -> Vec<DockGizmo> {
        let mut gizmos = Vec::with_capacity(9);
        let Some(group) = self.group(target) else {
            return gizmos;
        };
        if dragged == target || self.contained_in(target, dragged) {
            return gizmos;
        }
        let style = &self.style;
        let size = style.gizmo_size;
        let gap = style.gizmo_gap;

        if group.parent.is_some() {
            let root = self.root_of(target);
            if let Some(root_rect) = self.group(root).map(|g| g.rect) {
                let center = root_rect.center();
                for edge in Edge::ALL {
                    let position = match edge {
                        Edge::Left => Vec2::new(root_rect.x + gap, center.y - size * 0.5),
                        Edge::Right => Vec2::new(root_rect.right() - gap - size, center.y - size * 0.5),
                        Edge::Top => Vec2::new(center.x - size * 0.5, root_rect.y + gap),
                        Edge::Bottom => Vec2::new(center.x - size * 0.5, root_rect.bottom() - gap - size),
                    };
                    gizmos.push(DockGizmo {
                        rect: Rect::from_pos_size(position, Vec2::splat(size)),
                        preview: half_of(&root_rect, edge),
                        target: root,
                        kind: DockKind::from_edge(edge),
                    });
                }
            }
        }

        let rect = group.rect;
        let center = rect.center();
        let center_rect = Rect::from_pos_size(center - Vec2::splat(size * 0.5), Vec2::splat(size));
        let empty_sentinel = target == self.empty_group && group.windows().is_empty();

        if !empty_sentinel {
            let step = size + gap;
            for edge in Edge::ALL {
                let offset = match edge {
                    Edge::Left => Vec2::new(-step, 0.0),
                    Edge::Right => Vec2::new(step, 0.0),
                    Edge::Top => Vec2::new(0.0, -step),
                    Edge::Bottom => Vec2::new(0.0, step),
                };
                gizmos.push(DockGizmo {
                    rect: center_rect.translate(offset),
                    preview: half_of(&rect, edge),
                    target,
                    kind: DockKind::from_edge(edge),
                });
            }
        }

        gizmos.push(DockGizmo {
            rect: center_rect,
            preview: rect,
            target,
            kind: if empty_sentinel {
                DockKind::ReplaceEmpty
            } else {
                DockKind::Tabs
            },
        });
        gizmos
    }

    /// Carry out a recorded drop. Returns the group now holding the dropped
    /// content.
    pub fn apply_dock_request(&mut self, request: DockRequest) -> DockResult<GroupId> {
        profile_function!();
        let DockRequest { group, target, kind } = request;
        self.try_group(group)?;
        self.try_group(target)?;

        match kind {
            DockKind::Snap { axis, side } => {
                if !self.snap_group(group, target, axis, side) {
                    return Err(DockError::NotARoot(group));
                }
                Ok(if self.contains_group(group) { group } else { target })
            }
            DockKind::Tabs => {
                if group == target {
                    return Err(DockError::SameGroup(group));
                }
                if !self.try_group(target)?.is_leaf() {
                    return Err(DockError::NotALeaf(target));
                }
                let windows: Vec<_> = self
                    .leaves(group)
                    .into_iter()
                    .filter_map(|leaf| self.group(leaf))
                    .flat_map(|leaf| leaf.windows().to_vec())
                    .collect();
                let mut holder = target;
                for window in windows {
                    holder = self.parent_window(holder, window)?;
                }
                tracing::debug!("Docked {} into {} as tabs", group, holder);
                Ok(holder)
            }
            DockKind::ReplaceEmpty => {
                let holder = self.empty_group;
                self.replace_empty_group(group)?;
                Ok(holder)
            }
        }
    }
}

/// Half of `rect` on the side of `edge`.
fn half_of(rect: &Rect, edge: Edge) -> Rect {
    let axis = edge.axis();
    let half = axis.extent(rect) * 0.5;
    match edge.side() {
        DockSide::Before => axis.slice(rect, 0.0, half),
        DockSide::After => axis.slice(rect, half, half),
    }
}

/// Drives the drag of one group towards a dock target.
#[derive(Debug, Default)]
pub struct DockController {
    hot: Option<DockGizmo>,
    pending: Option<DockRequest>,
}

impl DockController {
    pub fn new() -> Self {
        Self::default()
    }

    /// The gizmo the pointer was over during the last update.
    pub fn hot_gizmo(&self) -> Option<&DockGizmo> {
        self.hot.as_ref()
    }

    pub fn pending(&self) -> Option<&DockRequest> {
        self.pending.as_ref()
    }

    pub fn take_pending(&mut self) -> Option<DockRequest> {
        self.pending.take()
    }

    /// Run one frame of dragging `dragged` by the control `handle`.
    ///
    /// Draws the gizmos and preview on the overlay layer. On release over a
    /// hot gizmo a request is recorded; otherwise the group follows the
    /// pointer. Returns the group that represents the dragged content.
    pub fn update(
        &mut self,
        tree: &mut DockTree,
        interaction: &Interaction,
        draw: &mut DrawList,
        dragged: GroupId,
        handle: WidgetId,
    ) -> GroupId {
        profile_function!();
        self.hot = None;
        if Some(dragged) == tree.fullscreen_group() || !tree.contains_group(dragged) {
            return dragged;
        }

        let pointer = interaction.pointer();
        let previous_layer = draw.layer();
        draw.set_layer(OVERLAY_LAYER);

        if let Some(target) = tree.leaf_at(pointer, Some(dragged)) {
            let gizmos = tree.dock_gizmos(dragged, target);
            self.hot = gizmos.iter().copied().find(|gizmo| gizmo.rect.contains(pointer));

            if self.hot.is_none()
                && let Some(group) = tree.group(target)
                && !group.windows().is_empty()
                && group.titlebar_rect(tree.style()).contains(pointer)
            {
                self.hot = Some(DockGizmo {
                    rect: group.titlebar_rect(tree.style()),
                    preview: group.rect(),
                    target,
                    kind: DockKind::Tabs,
                });
            }

            let style = tree.style();
            for gizmo in &gizmos {
                let color = if self.hot.as_ref() == Some(gizmo) {
                    style.gizmo_hot_color
                } else {
                    style.gizmo_color
                };
                draw.push_rounded_rect(gizmo.rect, style.corner_radius, color);
            }
            if let Some(hot) = &self.hot {
                draw.push_rect(hot.preview, style.preview_color);
            }
        }
        draw.set_layer(previous_layer);

        if interaction.dragging.just_stopped(handle) {
            if let Some(hot) = self.hot {
                let request = DockRequest {
                    group: dragged,
                    target: hot.target,
                    kind: hot.kind,
                };
                tracing::debug!("Queued dock request {:?}", request);
                self.pending = Some(request);
            }
        } else if self.hot.is_none()
            && interaction.dragging.is(handle)
            && let Some(group) = tree.group_mut(dragged)
        {
            group.rect = group.rect.translate(interaction.drag_delta());
        }
        dragged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DockingStyle, PoolLimits};
    use crate::widget_id::WindowId;

    fn tree() -> DockTree {
        DockTree::new(
            Rect::new(0.0, 0.0, 1000.0, 800.0),
            DockingStyle::default(),
            PoolLimits::default(),
        )
    }

    fn window(tree: &mut DockTree, name: &str, rect: Rect) -> GroupId {
        tree.open_window(WindowId::new(name), name, rect).unwrap()
    }

    #[test]
    fn test_empty_sentinel_offers_only_replace() {
        let mut tree = tree();
        let a = window(&mut tree, "A", Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.propagate();
        let gizmos = tree.dock_gizmos(a, tree.empty_group());
        assert_eq!(gizmos.len(), 1);
        assert_eq!(gizmos[0].kind, DockKind::ReplaceEmpty);
        assert_eq!(gizmos[0].preview, tree.canvas());
    }

    #[test]
    fn test_docked_target_offers_root_edges_first() {
        let mut tree = tree();
        let a = window(&mut tree, "A", Rect::new(0.0, 0.0, 600.0, 400.0));
        let b = window(&mut tree, "B", Rect::new(0.0, 0.0, 600.0, 400.0));
        let c = window(&mut tree, "C", Rect::new(700.0, 500.0, 100.0, 100.0));
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        tree.propagate();

        let gizmos = tree.dock_gizmos(c, b);
        assert_eq!(gizmos.len(), 9);
        assert!(gizmos[..4].iter().all(|g| g.target == a));
        assert!(gizmos[4..].iter().all(|g| g.target == b));
        assert_eq!(gizmos[8].kind, DockKind::Tabs);
        assert_eq!(
            gizmos[1].kind,
            DockKind::Snap {
                axis: SplitAxis::Vertical,
                side: DockSide::After
            }
        );
        assert_eq!(gizmos[1].preview, Rect::new(300.0, 0.0, 300.0, 400.0));
    }

    #[test]
    fn test_no_gizmos_inside_dragged_subtree() {
        let mut tree = tree();
        let a = window(&mut tree, "A", Rect::new(0.0, 0.0, 600.0, 400.0));
        let b = window(&mut tree, "B", Rect::new(0.0, 0.0, 600.0, 400.0));
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));
        assert!(tree.dock_gizmos(a, b).is_empty());
    }

    #[test]
    fn test_apply_tabs_request_merges_split_root() {
        let mut tree = tree();
        let a = window(&mut tree, "A", Rect::new(0.0, 0.0, 600.0, 400.0));
        let b = window(&mut tree, "B", Rect::new(0.0, 0.0, 600.0, 400.0));
        let c = window(&mut tree, "C", Rect::new(0.0, 0.0, 600.0, 400.0));
        assert!(tree.snap_group(b, a, SplitAxis::Vertical, DockSide::After));

        let holder = tree
            .apply_dock_request(DockRequest {
                group: a,
                target: c,
                kind: DockKind::Tabs,
            })
            .unwrap();
        assert_eq!(holder, c);
        assert!(!tree.contains_group(a));
        let group = tree.group(c).unwrap();
        assert_eq!(
            group.windows(),
            &[WindowId::new("C"), WindowId::new("A"), WindowId::new("B")]
        );
        assert_eq!(group.active_window(), Some(WindowId::new("B")));
    }

    #[test]
    fn test_apply_stale_request_fails() {
        let mut tree = tree();
        let a = window(&mut tree, "A", Rect::new(0.0, 0.0, 600.0, 400.0));
        let b = window(&mut tree, "B", Rect::new(0.0, 0.0, 600.0, 400.0));
        tree.combine_leaf_groups(a, b).unwrap();
        let result = tree.apply_dock_request(DockRequest {
            group: b,
            target: a,
            kind: DockKind::Tabs,
        });
        assert_eq!(result, Err(DockError::GroupNotFound(b)));
    }
}
