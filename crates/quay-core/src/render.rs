//! Draw-sink seam between the UI and a rendering backend.
//!
//! The UI never touches GPU resources; it emits rectangles, text and
//! scissor changes through [`Renderer`].

use crate::geometry::Rect;
use crate::math::Vec2;

/// An RGBA color with `f32` components in the `0.0..=1.0` range.
///
/// ```
/// use quay_core::render::Color;
///
/// let red = Color::rgb(1.0, 0.0, 0.0);
/// let from_bytes = Color::from_rgba_u8(128, 64, 32, 255);
/// assert_eq!(red.with_alpha(0.5).a, 0.5);
/// assert_eq!(from_bytes.a, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Create a color from RGB components with full opacity (alpha = 1.0).
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Create a color from RGBA components.
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from 8-bit RGBA values (0–255 mapped to 0.0–1.0).
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create a color from 8-bit RGB values with full opacity.
    pub fn from_rgb_u8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Backend that turns UI draw calls into pixels.
///
/// Scissor pushes nest; a backend intersects each pushed rect with the one
/// below it.
pub trait Renderer {
    fn push_rect(&mut self, rect: Rect, color: Color);
    fn push_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color);
    fn push_scissor(&mut self, rect: Rect);
    fn pop_scissor(&mut self);
    fn push_text(&mut self, position: Vec2, text: &str, font_size: f32, color: Color);
}
