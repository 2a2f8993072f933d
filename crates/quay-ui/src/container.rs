//! Per-window placement state: content rect, scrolling and the line cursor.
//!
//! A [`Container`] is the window half of a docked window. Its `rect` is written
//! by propagation from the parent leaf; everything else is recomputed in
//! [`Container::start_frame`] and accumulated by [`Container::place`] while the
//! window's widgets run.
//!
//! The scrollbar decision uses the content span measured during the *previous*
//! frame, so a window that suddenly grows shows its scrollbar one frame late.

use quay_core::geometry::Rect;
use quay_core::math::Vec2;

use crate::group::GroupId;
use crate::style::DockingStyle;
use crate::widget_id::WindowId;

/// Below this distance the smoothed scroll offset snaps onto its target.
const SCROLL_SNAP_EPSILON: f32 = 0.5;

/// Which way a scrollbar scrolls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// Scrolls along x; drawn under the content.
    Horizontal,
    /// Scrolls along y; drawn right of the content.
    Vertical,
}

impl ScrollAxis {
    fn component(&self, v: Vec2) -> f32 {
        match self {
            ScrollAxis::Horizontal => v.x,
            ScrollAxis::Vertical => v.y,
        }
    }

    fn vector(&self, value: f32) -> Vec2 {
        match self {
            ScrollAxis::Horizontal => Vec2::new(value, 0.0),
            ScrollAxis::Vertical => Vec2::new(0.0, value),
        }
    }
}

/// Resolved geometry of one scrollbar for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scrollbar {
    pub axis: ScrollAxis,
    pub track: Rect,
    pub thumb: Rect,
    /// Largest scroll distance in content pixels.
    pub max_scroll: f32,
}

impl Scrollbar {
    fn track_length(&self) -> f32 {
        match self.axis {
            ScrollAxis::Horizontal => self.track.width,
            ScrollAxis::Vertical => self.track.height,
        }
    }

    fn thumb_length(&self) -> f32 {
        match self.axis {
            ScrollAxis::Horizontal => self.thumb.width,
            ScrollAxis::Vertical => self.thumb.height,
        }
    }

    /// Content pixels scrolled per pixel of thumb travel.
    pub fn scroll_per_pixel(&self) -> f32 {
        let travel = self.track_length() - self.thumb_length();
        if travel <= 0.0 {
            return 0.0;
        }
        self.max_scroll / travel
    }
}

/// Placement and scroll state of one window.
#[derive(Debug, Clone)]
pub struct Container {
    pub(crate) id: WindowId,
    pub(crate) title: String,
    pub(crate) parent: Option<GroupId>,
    pub(crate) rect: Rect,
    pub(crate) z: u16,
    content_rect: Rect,
    scroll_offset: Vec2,
    scroll_offset_target: Vec2,
    cursor: Vec2,
    cursor_size: Vec2,
    item_spacing: f32,
    needs_scroll: [bool; 2],
    last_frame_minimum_content_span: Vec2,
    current_frame_minimum_content_span: Vec2,
    last_frame_started: Option<u64>,
}

impl Container {
    pub fn new(id: WindowId, title: impl Into<String>, rect: Rect) -> Self {
        Self {
            id,
            title: title.into(),
            parent: None,
            rect,
            z: 0,
            content_rect: rect,
            scroll_offset: Vec2::ZERO,
            scroll_offset_target: Vec2::ZERO,
            cursor: Vec2::ZERO,
            cursor_size: Vec2::ZERO,
            item_spacing: 0.0,
            needs_scroll: [false; 2],
            last_frame_minimum_content_span: Vec2::ZERO,
            current_frame_minimum_content_span: Vec2::ZERO,
            last_frame_started: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Leaf group the window is docked in.
    pub fn parent(&self) -> Option<GroupId> {
        self.parent
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn z(&self) -> u16 {
        self.z
    }

    /// Area widgets are placed in: window rect minus margin and scrollbars.
    pub fn content_rect(&self) -> Rect {
        self.content_rect
    }

    pub fn scroll_offset(&self) -> Vec2 {
        self.scroll_offset
    }

    pub fn scroll_offset_target(&self) -> Vec2 {
        self.scroll_offset_target
    }

    pub fn last_frame_minimum_content_span(&self) -> Vec2 {
        self.last_frame_minimum_content_span
    }

    pub fn current_frame_minimum_content_span(&self) -> Vec2 {
        self.current_frame_minimum_content_span
    }

    pub fn needs_scrollbar(&self, axis: ScrollAxis) -> bool {
        match axis {
            ScrollAxis::Horizontal => self.needs_scroll[0],
            ScrollAxis::Vertical => self.needs_scroll[1],
        }
    }

    /// Prepare the container for this frame.
    ///
    /// Returns `false` without touching anything if it already ran for
    /// `frame_index`.
    pub fn start_frame(&mut self, frame_index: u64, style: &DockingStyle) -> bool {
        if self.last_frame_started == Some(frame_index) {
            return false;
        }
        self.last_frame_started = Some(frame_index);
        self.item_spacing = style.item_spacing;

        let available = self.rect.inset(style.window_margin);
        let span = self.last_frame_minimum_content_span;
        let thickness = style.scrollbar_thickness;

        let mut needs_v = span.y > available.height;
        let needs_h = span.x > available.width - if needs_v { thickness } else { 0.0 };
        if needs_h && !needs_v {
            needs_v = span.y > available.height - thickness;
        }
        self.needs_scroll = [needs_h, needs_v];

        self.content_rect = Rect::new(
            available.x,
            available.y,
            (available.width - if needs_v { thickness } else { 0.0 }).max(0.0),
            (available.height - if needs_h { thickness } else { 0.0 }).max(0.0),
        );

        self.clamp_scroll_target();
        self.scroll_offset = (self.scroll_offset + self.scroll_offset_target) * 0.5;
        if (self.scroll_offset - self.scroll_offset_target).abs().max_element() < SCROLL_SNAP_EPSILON {
            self.scroll_offset = self.scroll_offset_target;
        }

        self.cursor = Vec2::ZERO;
        self.cursor_size = Vec2::ZERO;
        self.current_frame_minimum_content_span = Vec2::ZERO;
        true
    }

    /// Publish this frame's measured span for the next frame's scrollbar decision.
    pub fn end_frame(&mut self) {
        self.last_frame_minimum_content_span = self.current_frame_minimum_content_span;
    }

    /// Largest scroll distance per axis given last frame's content.
    pub fn max_scroll(&self) -> Vec2 {
        (self.last_frame_minimum_content_span - self.content_rect.size()).max(Vec2::ZERO)
    }

    fn clamp_scroll_target(&mut self) {
        let max = self.max_scroll();
        self.scroll_offset_target = self.scroll_offset_target.clamp(-max, Vec2::ZERO);
    }

    /// Nudge the scroll target by a wheel delta.
    ///
    /// With `swap_axes` (shift held) vertical wheel motion scrolls horizontally.
    pub fn scroll_wheel(&mut self, delta: Vec2, swap_axes: bool, speed: f32) {
        let delta = if swap_axes { Vec2::new(delta.y, delta.x) } else { delta };
        self.scroll_offset_target += delta * speed;
        self.clamp_scroll_target();
    }

    /// Jump the scroll target to an absolute offset (negative or zero).
    pub fn set_scroll_target(&mut self, target: Vec2) {
        self.scroll_offset_target = target;
        self.clamp_scroll_target();
    }

    /// Move a scrollbar thumb by `delta` pixels; scrolling follows immediately.
    pub fn drag_scrollbar(&mut self, axis: ScrollAxis, delta: f32, style: &DockingStyle) {
        let Some(bar) = self.scrollbar(axis, style) else {
            return;
        };
        let step = axis.vector(-delta * bar.scroll_per_pixel());
        self.scroll_offset_target += step;
        self.clamp_scroll_target();
        self.scroll_offset = self.scroll_offset_target;
    }

    /// Geometry of the scrollbar on `axis`, if this frame needs one.
    pub fn scrollbar(&self, axis: ScrollAxis, style: &DockingStyle) -> Option<Scrollbar> {
        if !self.needs_scrollbar(axis) {
            return None;
        }
        let content = self.content_rect;
        let thickness = style.scrollbar_thickness;
        let track = match axis {
            ScrollAxis::Vertical => Rect::new(content.right(), content.y, thickness, content.height),
            ScrollAxis::Horizontal => Rect::new(content.x, content.bottom(), content.width, thickness),
        };

        let span = axis.component(self.last_frame_minimum_content_span);
        let visible = axis.component(content.size());
        let max_scroll = axis.component(self.max_scroll());
        let track_length = axis.component(track.size());
        let ratio = if span > 0.0 { (visible / span).clamp(0.0, 1.0) } else { 1.0 };
        let thumb_length = (ratio * track_length).max(style.min_thumb_length).min(track_length);
        let fraction = if max_scroll > 0.0 {
            (-axis.component(self.scroll_offset) / max_scroll).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let thumb_start = fraction * (track_length - thumb_length);

        let thumb = match axis {
            ScrollAxis::Vertical => Rect::new(track.x, track.y + thumb_start, track.width, thumb_length),
            ScrollAxis::Horizontal => Rect::new(track.x + thumb_start, track.y, thumb_length, track.height),
        };
        Some(Scrollbar {
            axis,
            track,
            thumb,
            max_scroll,
        })
    }

    /// Rect of `size` at the cursor, shifted by the scroll offset.
    ///
    /// With `fill` the width stretches to the rest of the line. With `commit`
    /// the cursor advances and the extent counts towards the content span.
    pub fn place(&mut self, size: Vec2, commit: bool, fill: bool) -> Rect {
        let width = if fill {
            (self.content_rect.width - self.cursor.x).max(0.0)
        } else {
            size.x
        };
        let origin = self.content_rect.position() + self.cursor + self.scroll_offset;
        let rect = Rect::new(origin.x, origin.y, width, size.y);

        if commit {
            let right = self.cursor.x + width;
            self.cursor.x = right + self.item_spacing;
            self.cursor_size.x = right;
            self.cursor_size.y = self.cursor_size.y.max(size.y);

            let span = &mut self.current_frame_minimum_content_span;
            span.x = span.x.max(right);
            span.y = span.y.max(self.cursor.y + self.cursor_size.y);
        }
        rect
    }

    /// Start a new row below the tallest item of the current one.
    pub fn next_line(&mut self) {
        self.cursor.y += self.cursor_size.y + self.item_spacing;
        self.cursor.x = 0.0;
        self.cursor_size = Vec2::ZERO;
    }

    /// Visible part of the content rect from the cursor to the bottom right.
    pub fn remaining_rect(&self) -> Rect {
        let origin = self.content_rect.position() + self.cursor + self.scroll_offset;
        Rect::new(
            origin.x,
            origin.y,
            (self.content_rect.right() - origin.x).max(0.0),
            (self.content_rect.bottom() - origin.y).max(0.0),
        )
    }
}
