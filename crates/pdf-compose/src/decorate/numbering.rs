//! Page-number pass.
//!
//! Labels are ASCII template output drawn with built-in Helvetica, so
//! this pass never touches the font resolver. It always follows the
//! config's page rule: numbering an arbitrary subset of pages is
//! meaningless, so no selection parameter exists.

use lopdf::{Document, Object};
use pdf_fonts::{BuiltinFont, builtin_text_width};

use crate::config::PageNumberConfig;
use crate::layout::{format_page_label, page_number_position};
use crate::types::Result;

use super::{
    add_page_resource, append_page_content, builtin_font_object, escape_literal, page_dimensions,
    page_ids_in_order,
};

const FONT_RESOURCE: &str = "Fpn";

/// Draw page-number labels onto every page the rule selects.
///
/// Runs after the watermark pass so labels sit on top of the opacity
/// layer.
pub fn apply_page_numbers(doc: &mut Document, config: &PageNumberConfig) -> Result<()> {
    config.validate()?;
    if !config.enabled {
        return Ok(());
    }

    let pages = page_ids_in_order(doc);
    let total = pages.len();
    let font_id = builtin_font_object(doc, BuiltinFont::Helvetica);
    let (r, g, b) = config.color.to_unit();

    for (index, page_id) in pages.iter().enumerate() {
        if !config.pages.applies_to(index) {
            continue;
        }

        let label = format_page_label(&config.format, index, config.start_number, total);
        let text_w = builtin_text_width(&label, config.font_size);
        let (page_w, page_h) = page_dimensions(doc, *page_id);
        let (x, y) = page_number_position(page_w, page_h, text_w, config);

        let mut ops = String::new();
        ops.push_str("q\nBT\n");
        ops.push_str(&format!("/{FONT_RESOURCE} {} Tf\n", config.font_size));
        ops.push_str(&format!("{r} {g} {b} rg\n"));
        ops.push_str(&format!("1 0 0 1 {x} {y} Tm\n"));
        ops.push_str(&format!("({}) Tj\n", escape_literal(&label)));
        ops.push_str("ET\nQ\n");

        add_page_resource(doc, *page_id, "Font", FONT_RESOURCE, Object::Reference(font_id))?;
        append_page_content(doc, *page_id, &ops)?;
    }

    Ok(())
}
