//! Text width measurement for anchor math and centering.

use ttf_parser::Face;

use crate::resolve::{FontData, ResolvedFont};

/// Approximate character width ratio for the built-in Latin fonts.
pub const BUILTIN_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Width of `text` at `font_size` points for a built-in font.
pub fn builtin_text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * BUILTIN_CHAR_WIDTH_RATIO
}

/// Width of `text` at `font_size` points for a resolved font.
///
/// Embedded faces use real advance widths; built-ins (and unparsable
/// embedded bytes) use the ratio approximation. Geometry and decoration
/// must measure through this same function so preview and output agree.
pub fn text_width(font: &ResolvedFont, text: &str, font_size: f32) -> f32 {
    match &font.data {
        FontData::BuiltIn(_) => builtin_text_width(text, font_size),
        FontData::Embedded(bytes) => match Face::parse(bytes, 0) {
            Ok(face) => embedded_text_width(&face, text, font_size),
            Err(_) => builtin_text_width(text, font_size),
        },
    }
}

fn embedded_text_width(face: &Face<'_>, text: &str, font_size: f32) -> f32 {
    let units_per_em = f32::from(face.units_per_em());
    let total_units: u32 = text
        .chars()
        .map(|c| {
            face.glyph_index(c)
                .and_then(|g| face.glyph_hor_advance(g))
                .map_or(0, u32::from)
        })
        .sum();
    total_units as f32 * font_size / units_per_em
}
