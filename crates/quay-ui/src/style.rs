//! Metrics, colours and capacity limits for the docking UI.

use quay_core::render::Color;

/// Centralized styling for groups, tabs, splitters, scrollbars and dock gizmos.
///
/// Every pixel metric the layout engine uses comes from here, so changing the
/// titlebar height or margins only touches this struct.
#[derive(Debug, Clone)]
pub struct DockingStyle {
    /// Height of a leaf's titlebar (tab strip) in pixels.
    pub titlebar_height: f32,
    /// Border drawn around each leaf.
    pub border: f32,
    /// Inset between a window rect and its content rect.
    pub window_margin: f32,
    /// Gap between placed items on a line and between lines.
    pub item_spacing: f32,
    /// Minimum width of a leaf's content area.
    pub min_window_width: f32,
    /// Scrollbar thickness in pixels.
    pub scrollbar_thickness: f32,
    /// Minimum scrollbar thumb length in pixels.
    pub min_thumb_length: f32,
    /// Pixels scrolled per unit of wheel delta.
    pub scroll_speed: f32,
    /// Grabbable thickness of a splitter handle.
    pub splitter_size: f32,
    /// Grabbable thickness of a floating group's edge-resize handle.
    pub resize_handle_size: f32,
    /// Side length of a dock gizmo.
    pub gizmo_size: f32,
    /// Gap between the centre gizmo and its edge gizmos.
    pub gizmo_gap: f32,
    /// Horizontal padding on each side of a tab title.
    pub tab_padding: f32,
    /// Tab title font size.
    pub tab_font_size: f32,
    /// Corner radius for tabs and gizmos.
    pub corner_radius: f32,

    pub background_color: Color,
    pub titlebar_color: Color,
    pub active_tab_color: Color,
    pub inactive_tab_color: Color,
    pub hover_tab_color: Color,
    pub text_color: Color,
    pub border_color: Color,
    pub splitter_color: Color,
    pub splitter_hover_color: Color,
    pub scrollbar_track_color: Color,
    pub scrollbar_thumb_color: Color,
    pub scrollbar_thumb_active_color: Color,
    pub gizmo_color: Color,
    pub gizmo_hot_color: Color,
    pub preview_color: Color,
}

impl Default for DockingStyle {
    fn default() -> Self {
        Self {
            titlebar_height: 22.0,
            border: 1.0,
            window_margin: 6.0,
            item_spacing: 4.0,
            min_window_width: 96.0,
            scrollbar_thickness: 8.0,
            min_thumb_length: 20.0,
            scroll_speed: 1.0,
            splitter_size: 6.0,
            resize_handle_size: 6.0,
            gizmo_size: 28.0,
            gizmo_gap: 4.0,
            tab_padding: 8.0,
            tab_font_size: 13.0,
            corner_radius: 3.0,

            background_color: Color::from_rgb_u8(30, 30, 36),
            titlebar_color: Color::from_rgb_u8(40, 40, 48),
            active_tab_color: Color::from_rgb_u8(60, 60, 75),
            inactive_tab_color: Color::from_rgb_u8(45, 45, 55),
            hover_tab_color: Color::from_rgb_u8(55, 55, 68),
            text_color: Color::from_rgb_u8(220, 220, 225),
            border_color: Color::from_rgb_u8(20, 20, 24),
            splitter_color: Color::from_rgb_u8(60, 60, 70),
            splitter_hover_color: Color::from_rgb_u8(80, 100, 140),
            scrollbar_track_color: Color::from_rgba_u8(30, 30, 35, 100),
            scrollbar_thumb_color: Color::from_rgb_u8(80, 80, 90),
            scrollbar_thumb_active_color: Color::from_rgb_u8(120, 120, 130),
            gizmo_color: Color::from_rgba_u8(70, 90, 130, 200),
            gizmo_hot_color: Color::from_rgb_u8(100, 150, 255),
            preview_color: Color::from_rgba_u8(100, 150, 255, 60),
        }
    }
}

impl DockingStyle {
    /// Set the titlebar height.
    pub fn titlebar_height(mut self, height: f32) -> Self {
        self.titlebar_height = height;
        self
    }

    /// Set the window content margin.
    pub fn window_margin(mut self, margin: f32) -> Self {
        self.window_margin = margin;
        self
    }

    /// Set the gap between placed items.
    pub fn item_spacing(mut self, spacing: f32) -> Self {
        self.item_spacing = spacing;
        self
    }

    /// Set the minimum content width of a leaf.
    pub fn min_window_width(mut self, width: f32) -> Self {
        self.min_window_width = width;
        self
    }

    /// Set the scrollbar thickness.
    pub fn scrollbar_thickness(mut self, thickness: f32) -> Self {
        self.scrollbar_thickness = thickness;
        self
    }

    /// Set the splitter handle thickness.
    pub fn splitter_size(mut self, size: f32) -> Self {
        self.splitter_size = size.max(1.0);
        self
    }

    /// Set the dock gizmo size.
    pub fn gizmo_size(mut self, size: f32) -> Self {
        self.gizmo_size = size;
        self
    }

    /// Set the splitter colors.
    pub fn splitter_colors(mut self, normal: Color, hover: Color) -> Self {
        self.splitter_color = normal;
        self.splitter_hover_color = hover;
        self
    }

    /// Smallest height a leaf can be squeezed to: titlebar plus margins.
    pub fn min_leaf_height(&self) -> f32 {
        self.titlebar_height + self.window_margin * 2.0 + self.border
    }
}

/// Capacities of the fixed-size arenas.
///
/// Exceeding any of these is treated as a configuration error and aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_groups: usize,
    pub max_containers: usize,
    pub max_splits_per_group: usize,
    pub max_windows_per_group: usize,
}

impl Default for PoolLimits {
    fn default() -> Self {
        Self {
            max_groups: 256,
            max_containers: 256,
            max_splits_per_group: 32,
            max_windows_per_group: 32,
        }
    }
}
