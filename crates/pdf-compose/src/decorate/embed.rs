//! TrueType embedding for watermark text.
//!
//! Fetched faces are embedded as a composite font with Identity-H
//! encoding: Type0 → CIDFontType2 → FontDescriptor/FontFile2, plus a
//! ToUnicode CMap so the drawn text stays copyable. Content streams then
//! address glyphs by id (hex strings) instead of byte codes.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use ttf_parser::{Face, GlyphId};

use crate::types::{ComposeError, Result};

/// Embed a TrueType program and return the Type0 font object id.
///
/// Glyph widths and the ToUnicode map cover the characters of `text`;
/// other glyphs fall back to the default width.
pub fn embed_truetype(
    doc: &mut Document,
    font_bytes: &[u8],
    display_name: &str,
    text: &str,
) -> Result<ObjectId> {
    let face = Face::parse(font_bytes, 0)
        .map_err(|e| ComposeError::FontEmbed(format!("{display_name}: {e}")))?;

    let units_per_em = f32::from(face.units_per_em());
    let scale = 1000.0 / units_per_em;
    let base_name = base_font_name(display_name);

    // Glyphs actually used by the text, in id order
    let mut glyphs: BTreeMap<u16, char> = BTreeMap::new();
    for c in text.chars().filter(|c| !c.is_control()) {
        if let Some(gid) = face.glyph_index(c) {
            glyphs.insert(gid.0, c);
        }
    }

    // FontFile2: the raw TrueType program
    let mut file_dict = Dictionary::new();
    file_dict.set("Length1", Object::Integer(font_bytes.len() as i64));
    let font_file_id =
        doc.add_object(Stream::new(file_dict, font_bytes.to_vec()).with_compression(true));

    // FontDescriptor
    let bbox = face.global_bounding_box();
    let mut descriptor = Dictionary::new();
    descriptor.set("Type", Object::Name(b"FontDescriptor".to_vec()));
    descriptor.set("FontName", Object::Name(base_name.clone().into_bytes()));
    // Nonsymbolic
    descriptor.set("Flags", Object::Integer(32));
    descriptor.set(
        "FontBBox",
        Object::Array(vec![
            Object::Integer((f32::from(bbox.x_min) * scale) as i64),
            Object::Integer((f32::from(bbox.y_min) * scale) as i64),
            Object::Integer((f32::from(bbox.x_max) * scale) as i64),
            Object::Integer((f32::from(bbox.y_max) * scale) as i64),
        ]),
    );
    descriptor.set("ItalicAngle", Object::Integer(0));
    descriptor.set(
        "Ascent",
        Object::Integer((f32::from(face.ascender()) * scale) as i64),
    );
    descriptor.set(
        "Descent",
        Object::Integer((f32::from(face.descender()) * scale) as i64),
    );
    descriptor.set(
        "CapHeight",
        Object::Integer(
            face.capital_height()
                .map(|h| (f32::from(h) * scale) as i64)
                .unwrap_or(700),
        ),
    );
    descriptor.set("StemV", Object::Integer(80));
    descriptor.set("FontFile2", Object::Reference(font_file_id));
    let descriptor_id = doc.add_object(descriptor);

    // CIDFontType2 with per-glyph widths for the used set
    let mut widths = Vec::with_capacity(glyphs.len() * 2);
    for &gid in glyphs.keys() {
        let advance = face
            .glyph_hor_advance(GlyphId(gid))
            .map_or(0, |a| (f32::from(a) * scale) as i64);
        widths.push(Object::Integer(i64::from(gid)));
        widths.push(Object::Array(vec![Object::Integer(advance)]));
    }

    let mut cid_font = Dictionary::new();
    cid_font.set("Type", Object::Name(b"Font".to_vec()));
    cid_font.set("Subtype", Object::Name(b"CIDFontType2".to_vec()));
    cid_font.set("BaseFont", Object::Name(base_name.clone().into_bytes()));
    cid_font.set(
        "CIDSystemInfo",
        Object::Dictionary(Dictionary::from_iter(vec![
            (
                "Registry",
                Object::String(b"Adobe".to_vec(), StringFormat::Literal),
            ),
            (
                "Ordering",
                Object::String(b"Identity".to_vec(), StringFormat::Literal),
            ),
            ("Supplement", Object::Integer(0)),
        ])),
    );
    cid_font.set("FontDescriptor", Object::Reference(descriptor_id));
    cid_font.set("DW", Object::Integer(1000));
    cid_font.set("W", Object::Array(widths));
    cid_font.set("CIDToGIDMap", Object::Name(b"Identity".to_vec()));
    let cid_font_id = doc.add_object(cid_font);

    // ToUnicode CMap for the used glyphs
    let to_unicode_id = doc.add_object(
        Stream::new(Dictionary::new(), to_unicode_cmap(&glyphs).into_bytes())
            .with_compression(true),
    );

    // Type0 wrapper
    let mut type0 = Dictionary::new();
    type0.set("Type", Object::Name(b"Font".to_vec()));
    type0.set("Subtype", Object::Name(b"Type0".to_vec()));
    type0.set("BaseFont", Object::Name(base_name.into_bytes()));
    type0.set("Encoding", Object::Name(b"Identity-H".to_vec()));
    type0.set(
        "DescendantFonts",
        Object::Array(vec![Object::Reference(cid_font_id)]),
    );
    type0.set("ToUnicode", Object::Reference(to_unicode_id));

    Ok(doc.add_object(type0))
}

/// Hex glyph-id string for an Identity-H `Tj` operand.
pub fn text_to_hex_glyphs(font_bytes: &[u8], text: &str) -> Result<String> {
    let face = Face::parse(font_bytes, 0)
        .map_err(|e| ComposeError::FontEmbed(e.to_string()))?;

    let mut hex = String::with_capacity(text.chars().count() * 4);
    for c in text.chars() {
        let gid = face.glyph_index(c).map_or(0, |g| g.0);
        let _ = write!(hex, "{gid:04X}");
    }
    Ok(hex)
}

/// PostScript-safe base font name derived from the display name.
fn base_font_name(display_name: &str) -> String {
    let cleaned: String = display_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if cleaned.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        cleaned
    }
}

fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> String {
    let mut bfchar = String::new();
    for (&gid, &c) in glyphs {
        let mut units = [0u16; 2];
        let encoded = c.encode_utf16(&mut units);
        let mut unicode = String::new();
        for unit in encoded {
            let _ = write!(unicode, "{unit:04X}");
        }
        let _ = writeln!(bfchar, "<{gid:04X}> <{unicode}>");
    }

    format!(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n\
         {count} beginbfchar\n\
         {bfchar}endbfchar\n\
         endcmap\n\
         CMapName currentdict /CMap defineresource pop\n\
         end\n\
         end\n",
        count = glyphs.len(),
        bfchar = bfchar,
    )
}
