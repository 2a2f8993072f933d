//! Font metrics seam used to size tabs to their titles.

/// Average glyph advance as a fraction of the font size.
pub const CHAR_WIDTH_FACTOR: f32 = 0.6;

/// Text measurement provided by the font backend.
pub trait FontMetrics {
    /// Width in pixels of `text` rendered at `font_size`.
    fn text_width(&self, text: &str, font_size: f32) -> f32;

    /// Line height in pixels at `font_size`.
    fn line_height(&self, font_size: f32) -> f32 {
        font_size * 1.2
    }
}

/// Character-count approximation for headless use and before a real font is loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxFontMetrics;

impl FontMetrics for ApproxFontMetrics {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size * CHAR_WIDTH_FACTOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approx_width_scales_with_chars() {
        let metrics = ApproxFontMetrics;
        assert_eq!(metrics.text_width("", 10.0), 0.0);
        assert_eq!(metrics.text_width("abcd", 10.0), 24.0);
    }
}
