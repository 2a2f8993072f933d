//! The per-frame driver.
//!
//! A frame runs in a fixed order:
//!
//! 1. reset interaction edges and latch the input snapshot
//! 2. apply the dock request recorded last frame
//! 3. input pass over every group (tabs, titlebars, splitters, edge resize,
//!    the dock drag)
//! 4. propagation
//! 5. draw pass over every group
//!
//! after which the application runs its windows between
//! [`DockUi::start_window`] and [`DockUi::end_window`], and finishes with
//! [`DockUi::end_frame`].

use quay_core::alloc::HashSet;
use quay_core::geometry::Rect;
use quay_core::math::Vec2;
use quay_core::profiling::{self, profile_function, profile_scope};
use quay_core::render::Renderer;
use quay_core::text::{ApproxFontMetrics, FontMetrics};
use quay_input::FrameInput;

use crate::container::{Container, ScrollAxis};
use crate::dock::DockController;
use crate::draw_list::DrawList;
use crate::error::{DockError, DockResult};
use crate::group::{GroupContent, GroupId, SplitAxis};
use crate::interaction::Interaction;
use crate::layout::Edge;
use crate::style::{DockingStyle, PoolLimits};
use crate::tree::DockTree;
use crate::widget_id::{WidgetId, WindowId};

/// What happened to a control this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlResponse {
    pub hovered: bool,
    /// Became active this frame.
    pub pressed: bool,
    /// Released while still under the pointer.
    pub clicked: bool,
    pub active: bool,
    pub dragging: bool,
    /// Pointer movement this frame, clamped to the canvas.
    pub drag_delta: Vec2,
}

/// The docking UI: tree, interaction state and draw list for one canvas.
pub struct DockUi {
    tree: DockTree,
    interaction: Interaction,
    dock: DockController,
    draw_list: DrawList,
    font: Box<dyn FontMetrics>,
    input: FrameInput,
    frame_index: u64,
    current_window: Option<WindowId>,
    /// Windows declared since `start_frame`.
    seen_windows: HashSet<WindowId>,
    dragged_group: Option<(WidgetId, GroupId)>,
}

impl DockUi {
    pub fn new(canvas: Rect) -> Self {
        Self::with_config(canvas, DockingStyle::default(), PoolLimits::default())
    }

    pub fn with_config(canvas: Rect, style: DockingStyle, limits: PoolLimits) -> Self {
        Self {
            tree: DockTree::new(canvas, style, limits),
            interaction: Interaction::new(),
            dock: DockController::new(),
            draw_list: DrawList::new(),
            font: Box::new(ApproxFontMetrics),
            input: FrameInput::default(),
            frame_index: 0,
            current_window: None,
            seen_windows: HashSet::new(),
            dragged_group: None,
        }
    }

    /// Use `font` to size tabs instead of the character-count estimate.
    pub fn with_font_metrics(mut self, font: impl FontMetrics + 'static) -> Self {
        self.font = Box::new(font);
        self
    }

    pub fn tree(&self) -> &DockTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut DockTree {
        &mut self.tree
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn dock_controller(&self) -> &DockController {
        &self.dock
    }

    pub fn style(&self) -> &DockingStyle {
        self.tree.style()
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    pub fn frame_index(&self) -> u64 {
        self.frame_index
    }

    pub fn input(&self) -> &FrameInput {
        &self.input
    }

    /// The group being dragged by a tab or titlebar, if any.
    pub fn dragged_group(&self) -> Option<GroupId> {
        self.dragged_group.map(|(_, group)| group)
    }

    pub fn get_container(&self, name: &str) -> Option<&Container> {
        self.tree.container(WindowId::new(name))
    }

    pub fn get_container_by_id(&self, id: WindowId) -> Option<&Container> {
        self.tree.container(id)
    }

    pub fn window_group(&self, id: WindowId) -> Option<GroupId> {
        self.tree.window_group(id)
    }

    pub fn set_fullscreen_group(&mut self, id: Option<GroupId>) -> DockResult<()> {
        self.tree.set_fullscreen_group(id)
    }

    /// Begin a frame: resolve deferred docking, run the group input pass,
    /// propagate rects and draw the group chrome.
    pub fn start_frame(&mut self, input: FrameInput, canvas: Rect) {
        profile_function!();
        self.frame_index += 1;
        self.draw_list.clear();
        self.seen_windows.clear();
        if let Some(open) = self.current_window.take() {
            tracing::warn!("Window {} was still open at start_frame", open);
        }

        self.input = input;
        self.tree.set_canvas(canvas);
        self.interaction.begin_frame(&self.input, canvas);

        self.resolve_pending();
        self.input_pass();
        self.tree.propagate();
        self.draw_pass();
        tracing::trace!("Started frame {}", self.frame_index);
    }

    /// Finish the frame and hand back what was drawn.
    pub fn end_frame(&mut self) -> &DrawList {
        profile_function!();
        if self.current_window.is_some() {
            tracing::warn!("end_frame called with a window still open");
            let _ = self.end_window();
        }
        self.interaction.end_frame();
        profiling::new_frame();
        &self.draw_list
    }

    fn resolve_pending(&mut self) {
        profile_scope!("resolve_pending");
        let Some(request) = self.dock.take_pending() else {
            return;
        };
        match self.tree.apply_dock_request(request) {
            Ok(group) => tracing::debug!("Applied {:?}; content now in {}", request.kind, group),
            Err(err) => tracing::warn!("Dropped dock request {:?}: {}", request, err),
        }
    }

    fn input_pass(&mut self) {
        profile_scope!("input_pass");
        let pointer = self.interaction.pointer();
        let top_root = self.tree.root_at(pointer);
        if self.interaction.pressed()
            && let Some(root) = top_root
        {
            self.tree.bring_to_front(root);
        }

        let roots = self.tree.root_groups().to_vec();
        for (index, root) in roots.iter().copied().enumerate() {
            let in_scope = top_root == Some(root);
            if Some(root) != self.tree.fullscreen_group() {
                // Handle strips reach outside the root; only roots in front block them.
                let covered = roots[..index]
                    .iter()
                    .any(|front| self.tree.group(*front).is_some_and(|g| g.rect().contains(pointer)));
                self.edge_resize_input(root, !covered);
            }
            for id in self.tree.subtree(root) {
                let Some(group) = self.tree.group(id) else {
                    continue;
                };
                if group.is_leaf() {
                    self.leaf_input(id, root, in_scope);
                } else {
                    self.splitter_input(id, in_scope);
                }
            }
        }

        if let Some((handle, group)) = self.dragged_group {
            // The control that started the drag already placed the group.
            let started = self.interaction.dragging.just_started(handle);
            if !started
                && (self.interaction.dragging.is(handle) || self.interaction.dragging.just_stopped(handle))
            {
                let group = self.dock.update(
                    &mut self.tree,
                    &self.interaction,
                    &mut self.draw_list,
                    group,
                    handle,
                );
                self.dragged_group = Some((handle, group));
            }
            if !self.interaction.active.is(handle) {
                self.dragged_group = None;
            }
        }
    }

    fn edge_resize_input(&mut self, root: GroupId, in_scope: bool) {
        let Some(rect) = self.tree.group(root).map(|g| g.rect()) else {
            return;
        };
        let thickness = self.tree.style().resize_handle_size;
        for (index, edge) in Edge::ALL.into_iter().enumerate() {
            let id = WidgetId::for_handle("resize", root.handle()).derive_index("edge", index);
            self.interaction.do_hot(id, edge.handle_rect(&rect, thickness), in_scope);
            if self.interaction.do_active(id) {
                let delta = edge.axis().component(self.interaction.drag_delta());
                if delta != 0.0
                    && let Err(err) = self.tree.resize_root_edge(root, edge, delta)
                {
                    tracing::warn!("Edge resize of {} failed: {}", root, err);
                }
            }
        }
    }

    fn splitter_input(&mut self, id: GroupId, in_scope: bool) {
        for (index, handle) in self.splitter_handles(id).into_iter().enumerate() {
            let control = Self::splitter_id(id, index);
            self.interaction.do_hot(control, handle, in_scope);
            if self.interaction.do_active(control) {
                let axis = self.tree.group(id).and_then(|g| g.axis()).unwrap_or_default();
                let delta = axis.component(self.interaction.drag_delta());
                if delta != 0.0
                    && let Err(err) = self.tree.drag_splitter(id, index, delta)
                {
                    tracing::warn!("Splitter drag on {} failed: {}", id, err);
                }
            }
        }
    }

    fn splitter_id(id: GroupId, index: usize) -> WidgetId {
        WidgetId::for_handle("splitter", id.handle()).derive_index("divider", index)
    }

    /// Handle rects centred on each divider of split `id`.
    fn splitter_handles(&self, id: GroupId) -> Vec<Rect> {
        let Some(group) = self.tree.group(id) else {
            return Vec::new();
        };
        let GroupContent::Split { axis, splits } = group.content() else {
            return Vec::new();
        };
        let size = self.tree.style().splitter_size;
        let rect = group.rect();
        splits
            .iter()
            .take(splits.len().saturating_sub(1))
            .map(|split| {
                let start = split.div_position - size * 0.5;
                match axis {
                    SplitAxis::Vertical => Rect::new(start, rect.y, size, rect.height),
                    SplitAxis::Horizontal => Rect::new(rect.x, start, rect.width, size),
                }
            })
            .collect()
    }

    /// One tab per window across the titlebar, sized to its title.
    fn tab_rects(&self, id: GroupId) -> Vec<(WindowId, Rect)> {
        let Some(group) = self.tree.group(id) else {
            return Vec::new();
        };
        let style = self.tree.style();
        let titlebar = group.titlebar_rect(style);
        let mut x = titlebar.x;
        group
            .windows()
            .iter()
            .map(|window| {
                let title = self.tree.container(*window).map(|c| c.title()).unwrap_or_default();
                let width = self.font.text_width(title, style.tab_font_size) + style.tab_padding * 2.0;
                let width = width.min((titlebar.right() - x).max(0.0));
                let rect = Rect::new(x, titlebar.y, width, titlebar.height);
                x += width;
                (*window, rect)
            })
            .collect()
    }

    fn leaf_input(&mut self, id: GroupId, root: GroupId, in_scope: bool) {
        let tabs = self.tab_rects(id);
        for (index, (window, rect)) in tabs.iter().enumerate() {
            let control = window.derive("tab");
            self.interaction.do_hot(control, *rect, in_scope);
            self.interaction.do_active(control);
            if self.interaction.active.just_started(control)
                && let Some(GroupContent::Leaf { active, .. }) =
                    self.tree.group_mut(id).map(|g| &mut g.content)
            {
                *active = index;
            }
            if self.interaction.do_dragging(control) && self.interaction.dragging.just_started(control) {
                if let Err(err) = self.detach_tab(id, *window, control) {
                    tracing::warn!("Could not detach window {}: {}", window, err);
                }
                return;
            }
        }

        if Some(root) == self.tree.fullscreen_group() {
            return;
        }
        let Some(group) = self.tree.group(id) else {
            return;
        };
        let titlebar = group.titlebar_rect(self.tree.style());
        let tabs_end = tabs.last().map_or(titlebar.x, |(_, rect)| rect.right());
        let blank = Rect::new(tabs_end, titlebar.y, (titlebar.right() - tabs_end).max(0.0), titlebar.height);
        let control = WidgetId::for_handle("titlebar", id.handle());
        self.interaction.do_hot(control, blank, in_scope);
        self.interaction.do_active(control);
        if self.interaction.do_dragging(control) && self.interaction.dragging.just_started(control) {
            self.follow_pointer(root);
            self.dragged_group = Some((control, root));
        }
    }

    /// Start dragging `window` out of leaf `id` as a floating group.
    fn detach_tab(&mut self, id: GroupId, window: WindowId, handle: WidgetId) -> DockResult<()> {
        let group = self.tree.try_group(id)?;
        let alone = group.is_root()
            && group.windows().len() == 1
            && id != self.tree.empty_group()
            && Some(id) != self.tree.fullscreen_group();
        if alone {
            self.follow_pointer(id);
            self.dragged_group = Some((handle, id));
            return Ok(());
        }

        let floating = self.tree.unparent_window(window)?;
        if !self.tree.try_group(floating)?.is_root() {
            self.tree.unsnap_group(floating)?;
        }
        let style = self.tree.style();
        let grab = Vec2::new(style.tab_padding, style.titlebar_height * 0.5);
        let canvas = self.tree.canvas();
        let pointer = self.interaction.pointer();
        if let Some(group) = self.tree.group_mut(floating) {
            group.rect = Rect::from_pos_size(pointer - grab, group.rect.size()).clamp_within(&canvas);
        }
        tracing::debug!("Dragging window {} out into {}", window, floating);
        self.dragged_group = Some((handle, floating));
        Ok(())
    }

    /// Catch a group up with the pointer travel since the press.
    fn follow_pointer(&mut self, id: GroupId) {
        let total = self.interaction.drag_total();
        if let Some(group) = self.tree.group_mut(id) {
            group.rect = group.rect.translate(total);
        }
    }

    fn draw_pass(&mut self) {
        profile_scope!("draw_pass");
        let roots = self.tree.root_groups().to_vec();
        for root in roots.into_iter().rev() {
            let Some(z) = self.tree.group(root).map(|g| g.z()) else {
                continue;
            };
            self.draw_list.set_layer(z);
            for id in self.tree.subtree(root) {
                self.draw_group(id);
            }
        }
    }

    fn draw_group(&mut self, id: GroupId) {
        let Some(group) = self.tree.group(id) else {
            return;
        };
        let style = self.tree.style();

        if group.is_split() {
            for (index, handle) in self.splitter_handles(id).into_iter().enumerate() {
                let control = Self::splitter_id(id, index);
                let color = if self.interaction.hot.is(control) || self.interaction.active.is(control) {
                    style.splitter_hover_color
                } else {
                    style.splitter_color
                };
                self.draw_list.push_rect(handle, color);
            }
            return;
        }

        let rect = group.rect();
        let active_window = group.active_window();
        self.draw_list.push_rect(rect, style.border_color);
        self.draw_list.push_rect(group.inner_rect(style), style.background_color);
        self.draw_list.push_rect(group.titlebar_rect(style), style.titlebar_color);

        let line_height = self.font.line_height(style.tab_font_size);
        for (window, tab) in self.tab_rects(id) {
            let control = window.derive("tab");
            let color = if Some(window) == active_window {
                style.active_tab_color
            } else if self.interaction.hot.is(control) {
                style.hover_tab_color
            } else {
                style.inactive_tab_color
            };
            self.draw_list.push_rounded_rect(tab, style.corner_radius, color);
            if let Some(container) = self.tree.container(window) {
                let position = Vec2::new(tab.x + style.tab_padding, tab.y + (tab.height - line_height) * 0.5);
                self.draw_list
                    .push_text(position, container.title(), style.tab_font_size, style.text_color);
            }
        }
    }

    /// Open window `name` for this frame, creating it at `initial_rect` the
    /// first time. Widgets placed until [`DockUi::end_window`] go into it.
    ///
    /// Opening a window while another is open is logged and tolerated: the
    /// open window is closed first, so a later [`DockUi::end_window`] closes
    /// only the new one.
    pub fn start_window(&mut self, name: &str, initial_rect: Rect) -> WindowId {
        profile_function!();
        let id = WindowId::new(name);
        if let Some(open) = self.current_window.take() {
            tracing::warn!("start_window('{}') while window {} is still open; closing it", name, open);
            self.close_window(open);
        }
        if !self.seen_windows.insert(id) {
            tracing::warn!("Window '{}' declared twice in frame {}", name, self.frame_index);
        }
        if self.tree.container(id).is_none() {
            match self.tree.open_window(id, name, initial_rect) {
                Ok(_) => self.tree.propagate(),
                Err(err) => tracing::warn!("Could not open window '{}': {}", name, err),
            }
        }
        self.current_window = Some(id);

        let visible = self.is_active_tab(id);
        let in_scope = visible && self.window_under_pointer(id);
        let Some(container) = self.tree.containers.get_mut(&id) else {
            return id;
        };
        let style = &self.tree.style;
        if container.start_frame(self.frame_index, style) {
            self.draw_list.set_layer(container.z());
            if visible {
                Self::scroll_input(container, &mut self.interaction, &self.input, style, in_scope);
                Self::draw_scrollbars(container, &self.interaction, &mut self.draw_list, style);
            }
        }

        self.draw_list.set_layer(container.z());
        self.draw_list
            .push_scissor(if visible { container.rect() } else { Rect::ZERO });
        id
    }

    /// Close the window opened by [`DockUi::start_window`].
    pub fn end_window(&mut self) -> DockResult<()> {
        let Some(id) = self.current_window.take() else {
            tracing::warn!("end_window called without an open window");
            return Err(DockError::NoOpenWindow);
        };
        self.close_window(id);
        Ok(())
    }

    /// Publish the content span of window `id` and pop its scissor.
    fn close_window(&mut self, id: WindowId) {
        if let Some(container) = self.tree.container_mut(id) {
            self.draw_list.set_layer(container.z());
            container.end_frame();
        }
        self.draw_list.pop_scissor();
    }

    fn scroll_input(
        container: &mut Container,
        interaction: &mut Interaction,
        input: &FrameInput,
        style: &DockingStyle,
        in_scope: bool,
    ) {
        for (axis, salt) in [(ScrollAxis::Vertical, "vscroll"), (ScrollAxis::Horizontal, "hscroll")] {
            let Some(bar) = container.scrollbar(axis, style) else {
                continue;
            };
            let control = container.id().derive(salt);
            interaction.do_hot(control, bar.thumb, in_scope);
            if interaction.do_active(control) {
                let delta = match axis {
                    ScrollAxis::Vertical => interaction.drag_delta().y,
                    ScrollAxis::Horizontal => interaction.drag_delta().x,
                };
                if delta != 0.0 {
                    container.drag_scrollbar(axis, delta, style);
                }
            }
        }

        if in_scope
            && input.scroll_delta != Vec2::ZERO
            && container.rect().contains(interaction.pointer())
        {
            container.scroll_wheel(input.scroll_delta, input.shift(), style.scroll_speed);
        }
    }

    fn draw_scrollbars(
        container: &Container,
        interaction: &Interaction,
        draw_list: &mut DrawList,
        style: &DockingStyle,
    ) {
        for (axis, salt) in [(ScrollAxis::Vertical, "vscroll"), (ScrollAxis::Horizontal, "hscroll")] {
            let Some(bar) = container.scrollbar(axis, style) else {
                continue;
            };
            let control = container.id().derive(salt);
            let thumb_color = if interaction.active.is(control) {
                style.scrollbar_thumb_active_color
            } else {
                style.scrollbar_thumb_color
            };
            draw_list.push_rect(bar.track, style.scrollbar_track_color);
            draw_list.push_rounded_rect(bar.thumb, style.scrollbar_thickness * 0.5, thumb_color);
        }
    }

    fn is_active_tab(&self, id: WindowId) -> bool {
        self.tree
            .window_group(id)
            .and_then(|group| self.tree.group(group))
            .and_then(|group| group.active_window())
            == Some(id)
    }

    /// Whether the pointer is over the root that holds window `id`.
    fn window_under_pointer(&self, id: WindowId) -> bool {
        let Some(group) = self.tree.window_group(id) else {
            return false;
        };
        self.tree.root_at(self.interaction.pointer()) == Some(self.tree.root_of(group))
    }

    /// Run the hot/active/dragging state machine for a widget in the open
    /// window.
    pub fn control(&mut self, id: WidgetId, rect: Rect) -> ControlResponse {
        let in_scope = self.current_window.is_some_and(|window| {
            self.is_active_tab(window)
                && self.window_under_pointer(window)
                && self
                    .tree
                    .container(window)
                    .is_some_and(|c| c.content_rect().contains(self.interaction.pointer()))
        });
        let hovered = self.interaction.do_hot(id, rect, in_scope);
        let active = self.interaction.do_active(id);
        let dragging = self.interaction.do_dragging(id);
        ControlResponse {
            hovered,
            pressed: self.interaction.active.just_started(id),
            clicked: self.interaction.active.just_stopped(id) && hovered,
            active,
            dragging,
            drag_delta: if dragging { self.interaction.drag_delta() } else { Vec2::ZERO },
        }
    }

    fn open_container(&mut self) -> Option<&mut Container> {
        let id = self.current_window?;
        self.tree.container_mut(id)
    }

    /// Place a widget of `size` in the open window and advance the cursor.
    pub fn place(&mut self, size: Vec2, fill: bool) -> Rect {
        match self.open_container() {
            Some(container) => container.place(size, true, fill),
            None => {
                tracing::warn!("place called without an open window");
                Rect::ZERO
            }
        }
    }

    /// Where a widget of `size` would go, without advancing the cursor.
    pub fn place_uncommitted(&mut self, size: Vec2, fill: bool) -> Rect {
        self.open_container()
            .map_or(Rect::ZERO, |container| container.place(size, false, fill))
    }

    pub fn next_line(&mut self) {
        if let Some(container) = self.open_container() {
            container.next_line();
        }
    }

    /// Visible space left in the open window below and right of the cursor.
    pub fn get_remaining_rect(&self) -> Rect {
        self.current_window
            .and_then(|id| self.tree.container(id))
            .map_or(Rect::ZERO, |container| container.remaining_rect())
    }

    /// Content rect of the open window.
    pub fn content_rect(&self) -> Rect {
        self.current_window
            .and_then(|id| self.tree.container(id))
            .map_or(Rect::ZERO, |container| container.content_rect())
    }
}
