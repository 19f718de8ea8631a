//! Watermark pass.

use std::collections::BTreeSet;

use lopdf::{Document, Object};
use pdf_fonts::{FontCache, FontData, FontRegistry, ResolvedFont, text_width};
use pdf_script::sanitize;

use crate::config::{WatermarkConfig, WatermarkPosition};
use crate::layout::{TextAnchor, watermark_position};
use crate::types::Result;

use super::{
    add_page_resource, append_page_content, builtin_font_object, embed, escape_literal,
    opacity_gstate, page_dimensions, page_ids_in_order,
};

const FONT_RESOURCE: &str = "Fwm";
const GSTATE_RESOURCE: &str = "GSwm";

/// Watermark text paired with the font that will draw it.
///
/// Produced once per distinct text string by [`prepare_watermark`]; the
/// sanitizer has already run, so `text` is guaranteed drawable by `font`.
#[derive(Debug, Clone)]
pub struct PreparedWatermark {
    pub font: ResolvedFont,
    pub text: String,
}

/// Resolve the watermark font and sanitize the text against its coverage.
///
/// The resolver/sanitizer pair is one pipeline: calling one without the
/// other either draws tofu or transliterates needlessly.
pub async fn prepare_watermark(
    config: &WatermarkConfig,
    registry: &FontRegistry,
    cache: &FontCache,
) -> PreparedWatermark {
    let font = match &config.font {
        Some(name) => registry.resolve(name, &config.text, cache).await,
        None => registry.best_font_for(&config.text, cache).await,
    };

    let text = sanitize(&config.text, font.supports_cyrillic);
    if text != config.text {
        log::warn!(
            "watermark text transliterated for font {:?}",
            font.display_name
        );
    }

    PreparedWatermark { font, text }
}

/// Resolve, sanitize and draw in one call.
pub async fn watermark_document(
    doc: &mut Document,
    config: &WatermarkConfig,
    registry: &FontRegistry,
    cache: &FontCache,
) -> Result<()> {
    config.validate()?;
    if !config.enabled {
        return Ok(());
    }
    let prepared = prepare_watermark(config, registry, cache).await;
    apply_watermark(doc, config, &prepared, None)
}

/// Draw the prepared watermark onto every applicable page.
///
/// `selection`, when given, overrides the config's page rule.
pub fn apply_watermark(
    doc: &mut Document,
    config: &WatermarkConfig,
    prepared: &PreparedWatermark,
    selection: Option<&BTreeSet<usize>>,
) -> Result<()> {
    config.validate()?;
    if !config.enabled {
        return Ok(());
    }

    let pages = page_ids_in_order(doc);

    // Shared objects: one font, one opacity graphics state
    let (font_id, hex_glyphs) = match &prepared.font.data {
        FontData::BuiltIn(builtin) => (builtin_font_object(doc, *builtin), None),
        FontData::Embedded(bytes) => {
            let font_id =
                embed::embed_truetype(doc, bytes, &prepared.font.display_name, &prepared.text)?;
            let hex = embed::text_to_hex_glyphs(bytes, &prepared.text)?;
            (font_id, Some(hex))
        }
    };
    let gstate_id = opacity_gstate(doc, config.opacity);

    let text_op = match &hex_glyphs {
        Some(hex) => format!("<{hex}> Tj"),
        None => format!("({}) Tj", escape_literal(&prepared.text)),
    };

    let text_w = text_width(&prepared.font, &prepared.text, config.font_size);
    let text_h = config.font_size;

    for (index, page_id) in pages.iter().enumerate() {
        let applies = match selection {
            Some(selected) => selected.contains(&index),
            None => config.pages.applies_to(index),
        };
        if !applies {
            continue;
        }

        let (page_w, page_h) = page_dimensions(doc, *page_id);
        let anchor = watermark_position(page_w, page_h, text_w, text_h, config);
        let ops = watermark_ops(&anchor, config, text_w, text_h, &text_op);

        add_page_resource(doc, *page_id, "Font", FONT_RESOURCE, Object::Reference(font_id))?;
        add_page_resource(
            doc,
            *page_id,
            "ExtGState",
            GSTATE_RESOURCE,
            Object::Reference(gstate_id),
        )?;
        append_page_content(doc, *page_id, &ops)?;
    }

    Ok(())
}

/// Content-stream block for one watermark placement.
fn watermark_ops(
    anchor: &TextAnchor,
    config: &WatermarkConfig,
    text_w: f32,
    text_h: f32,
    text_op: &str,
) -> String {
    let (r, g, b) = config.color.to_unit();
    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!("/{GSTATE_RESOURCE} gs\n"));
    ops.push_str("BT\n");
    ops.push_str(&format!("/{FONT_RESOURCE} {} Tf\n", config.font_size));
    ops.push_str(&format!("{r} {g} {b} rg\n"));

    // Text matrix: rotate about the anchor, then (for the centered
    // diagonal variant) step back half the text box in rotated text space.
    let radians = anchor.rotation_degrees.to_radians();
    let (sin, cos) = radians.sin_cos();
    ops.push_str(&format!(
        "{cos} {sin} {} {cos} {} {} Tm\n",
        -sin, anchor.x, anchor.y
    ));
    if matches!(config.position, WatermarkPosition::Diagonal) {
        ops.push_str(&format!("{} {} Td\n", -text_w / 2.0, -text_h / 2.0));
    }

    ops.push_str(text_op);
    ops.push('\n');
    ops.push_str("ET\nQ\n");
    ops
}
