//! Decoration passes over the assembled document.
//!
//! Watermark and page numbers are drawn by appending content-stream
//! operator blocks to existing pages. Both passes walk pages in document
//! order; the watermark pass runs first so numbering is drawn on top.

mod embed;
mod numbering;
mod watermark;

pub use numbering::apply_page_numbers;
pub use watermark::{PreparedWatermark, apply_watermark, prepare_watermark, watermark_document};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use pdf_fonts::BuiltinFont;

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;

/// Page object ids in document order.
pub(crate) fn page_ids_in_order(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Page width and height from the MediaBox, with a standard fallback.
pub(crate) fn page_dimensions(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let Ok(page_dict) = doc.get_dictionary(page_id) else {
        return DEFAULT_PAGE_DIMENSIONS;
    };
    let media_box = page_dict.get(b"MediaBox").and_then(|obj| obj.as_array()).ok();

    match media_box {
        Some(mb) if mb.len() >= 4 => {
            let x0 = extract_number(&mb[0]).unwrap_or(0.0);
            let y0 = extract_number(&mb[1]).unwrap_or(0.0);
            let x1 = extract_number(&mb[2]).unwrap_or(DEFAULT_PAGE_DIMENSIONS.0);
            let y1 = extract_number(&mb[3]).unwrap_or(DEFAULT_PAGE_DIMENSIONS.1);
            (x1 - x0, y1 - y0)
        }
        _ => DEFAULT_PAGE_DIMENSIONS,
    }
}

pub(crate) fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Collect a page's content stream data, concatenating arrays.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let Ok(contents) = page_dict.get(b"Contents") else {
        return Ok(Vec::new());
    };

    match contents {
        Object::Reference(id) => {
            if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                match stream.decompressed_content() {
                    Ok(content) => Ok(content),
                    Err(_) => Ok(stream.content.clone()),
                }
            } else {
                Ok(Vec::new())
            }
        }
        Object::Array(arr) => {
            let mut result = Vec::new();
            for obj in arr {
                if let Object::Reference(id) = obj {
                    if let Ok(stream) = doc.get_object(*id)?.as_stream() {
                        let content = match stream.decompressed_content() {
                            Ok(c) => c,
                            Err(_) => stream.content.clone(),
                        };
                        result.extend_from_slice(&content);
                        result.push(b'\n');
                    }
                }
            }
            Ok(result)
        }
        _ => Ok(Vec::new()),
    }
}

/// Append operator text to a page's content.
///
/// The existing content (possibly an array of streams) is flattened into
/// one uncompressed stream with the new block at the end.
pub(crate) fn append_page_content(doc: &mut Document, page_id: ObjectId, ops: &str) -> Result<()> {
    let page_dict = doc.get_dictionary(page_id)?.clone();
    let mut content = get_page_content(doc, &page_dict)?;

    if !content.is_empty() && !content.ends_with(b"\n") {
        content.push(b'\n');
    }
    content.extend_from_slice(ops.as_bytes());

    let content_id = doc.add_object(Stream::new(Dictionary::new(), content));

    let mut updated = page_dict;
    updated.set("Contents", Object::Reference(content_id));
    doc.objects.insert(page_id, Object::Dictionary(updated));
    Ok(())
}

/// Register `value` under `category`/`name` in a page's resource
/// dictionary, preserving existing entries.
pub(crate) fn add_page_resource(
    doc: &mut Document,
    page_id: ObjectId,
    category: &str,
    name: &str,
    value: Object,
) -> Result<()> {
    let page_dict = doc.get_dictionary(page_id)?.clone();

    // Resources may be inline or indirect; either way the updated copy is
    // written back inline on the page.
    let mut resources = match page_dict.get(b"Resources") {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc.get_dictionary(*id)?.clone(),
        _ => Dictionary::new(),
    };

    let mut category_dict = match resources.get(category.as_bytes()) {
        Ok(Object::Dictionary(dict)) => dict.clone(),
        Ok(Object::Reference(id)) => doc.get_dictionary(*id)?.clone(),
        _ => Dictionary::new(),
    };
    category_dict.set(name, value);
    resources.set(category, Object::Dictionary(category_dict));

    let mut updated = page_dict;
    updated.set("Resources", Object::Dictionary(resources));
    doc.objects.insert(page_id, Object::Dictionary(updated));
    Ok(())
}

/// Add a base-14 font object, reusable from every page's resources.
pub(crate) fn builtin_font_object(doc: &mut Document, font: BuiltinFont) -> ObjectId {
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(font.base_name().as_bytes().to_vec())),
    ]))
}

/// Add an ExtGState carrying fill/stroke opacity.
pub(crate) fn opacity_gstate(doc: &mut Document, opacity: u8) -> ObjectId {
    let alpha = f32::from(opacity.min(100)) / 100.0;
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"ExtGState".to_vec())),
        ("ca", Object::Real(alpha)),
        ("CA", Object::Real(alpha)),
    ]))
}

/// Escape text for a PDF literal string.
///
/// Latin-1 code points become octal escapes (WinAnsi-compatible);
/// anything beyond that cannot be encoded by a built-in font and becomes
/// a placeholder.
pub(crate) fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 => out.push(' '),
            c if (c as u32) < 0x80 => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\{:03o}", c as u32)),
            _ => out.push('?'),
        }
    }
    out
}
