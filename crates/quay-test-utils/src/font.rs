//! Fixed-advance font metrics.

use quay_core::text::FontMetrics;

/// Every glyph is `advance` pixels wide regardless of font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceFont {
    pub advance: f32,
    pub line_height: f32,
}

impl MonospaceFont {
    pub fn new(advance: f32, line_height: f32) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for MonospaceFont {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl FontMetrics for MonospaceFont {
    fn text_width(&self, text: &str, _font_size: f32) -> f32 {
        text.chars().count() as f32 * self.advance
    }

    fn line_height(&self, _font_size: f32) -> f32 {
        self.line_height
    }
}
