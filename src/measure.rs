// SPDX-License-Identifier: GPL-3.0-only

//! Unconstrained measurement of preview content.
//!
//! The popup sizes itself around its content before the overlay is shown, so
//! measurement happens outside the widget tree. [`GlyphMetricsMeasure`]
//! approximates text extents from per-glyph advance ratios; toolkits with a
//! text shaper at hand can provide their own [`ContentMeasure`].

use crate::content::PreviewIcon;
use crate::geometry::Size;
use crate::theme::FontStyle;

/// Measures preview content without size constraints.
pub trait ContentMeasure {
    /// Measured size of `text` at `size` pixels in `font`.
    fn measure_text(&self, text: &str, size: f32, font: FontStyle) -> Size;

    /// Measured size of an icon.
    fn measure_icon(&self, icon: &PreviewIcon) -> Size;
}

/// Default advance width of a glyph as a fraction of the text size.
const DEFAULT_ADVANCE_RATIO: f32 = 0.6;

/// Default line height as a fraction of the text size.
const DEFAULT_LINE_HEIGHT_RATIO: f32 = 1.3;

/// Extra advance applied to bold glyphs.
const BOLD_ADVANCE_FACTOR: f32 = 1.08;

/// Estimates text extents from font-size ratios.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphMetricsMeasure {
    /// Average glyph advance relative to the text size.
    pub advance_ratio: f32,
    /// Line height relative to the text size.
    pub line_height_ratio: f32,
}

impl Default for GlyphMetricsMeasure {
    fn default() -> Self {
        Self {
            advance_ratio: DEFAULT_ADVANCE_RATIO,
            line_height_ratio: DEFAULT_LINE_HEIGHT_RATIO,
        }
    }
}

impl ContentMeasure for GlyphMetricsMeasure {
    fn measure_text(&self, text: &str, size: f32, font: FontStyle) -> Size {
        if text.is_empty() || size <= 0.0 {
            return Size::default();
        }

        let advance = match font {
            FontStyle::Bold | FontStyle::BoldItalic => size * self.advance_ratio * BOLD_ADVANCE_FACTOR,
            FontStyle::Normal | FontStyle::Italic => size * self.advance_ratio,
        };

        // Wide glyphs (CJK, emoji) take roughly a full em.
        let width: f32 = text
            .chars()
            .map(|c| if c.len_utf8() >= 3 { size } else { advance })
            .sum();

        Size::new(width.ceil() as i32, (size * self.line_height_ratio).ceil() as i32)
    }

    fn measure_icon(&self, icon: &PreviewIcon) -> Size {
        icon.intrinsic_size().max(Size::default())
    }
}
