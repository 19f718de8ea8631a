//! Anchor computation for watermark and page-number text.

use crate::config::{NumberPosition, PageNumberConfig, WatermarkConfig, WatermarkPosition};
use crate::constants::{PAGE_NUMBER_MARGIN_PT, WATERMARK_MARGIN_PT};

/// Where and how to draw a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub x: f32,
    pub y: f32,
    /// Rotation about the anchor point, degrees counter-clockwise.
    pub rotation_degrees: f32,
}

/// Anchor for watermark text on a page.
///
/// `Diagonal` anchors at the page midpoint regardless of text metrics;
/// rotation happens about the text's own anchor, so the center never
/// shifts with the string. The corner and center variants anchor the
/// text's bottom-left corner from the fixed margin and the measured size,
/// clamped so the origin never goes negative.
pub fn watermark_position(
    page_width: f32,
    page_height: f32,
    text_width: f32,
    text_height: f32,
    config: &WatermarkConfig,
) -> TextAnchor {
    let margin = WATERMARK_MARGIN_PT;
    let (x, y, rotation) = match config.position {
        WatermarkPosition::Diagonal => (
            page_width / 2.0,
            page_height / 2.0,
            config.angle_degrees,
        ),
        WatermarkPosition::Center => (
            (page_width - text_width) / 2.0,
            (page_height - text_height) / 2.0,
            0.0,
        ),
        WatermarkPosition::TopLeft => (margin, page_height - margin - text_height, 0.0),
        WatermarkPosition::TopRight => (
            page_width - text_width - margin,
            page_height - margin - text_height,
            0.0,
        ),
        WatermarkPosition::BottomLeft => (margin, margin, 0.0),
        WatermarkPosition::BottomRight => (page_width - text_width - margin, margin, 0.0),
    };
    TextAnchor {
        x: x.max(0.0),
        y: y.max(0.0),
        rotation_degrees: rotation,
    }
}

/// Anchor for a page-number label, six-way grid.
pub fn page_number_position(
    page_width: f32,
    page_height: f32,
    text_width: f32,
    config: &PageNumberConfig,
) -> (f32, f32) {
    let margin = PAGE_NUMBER_MARGIN_PT;
    let top_y = page_height - margin - config.font_size;
    let (x, y) = match config.position {
        NumberPosition::TopLeft => (margin, top_y),
        NumberPosition::TopCenter => ((page_width - text_width) / 2.0, top_y),
        NumberPosition::TopRight => (page_width - text_width - margin, top_y),
        NumberPosition::BottomLeft => (margin, margin),
        NumberPosition::BottomCenter => ((page_width - text_width) / 2.0, margin),
        NumberPosition::BottomRight => (page_width - text_width - margin, margin),
    };
    (x.max(0.0), y.max(0.0))
}
