//! Blank page synthesis.

use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use crate::constants::{BLANK_PAGE_HEIGHT_PT, BLANK_PAGE_WIDTH_PT};
use crate::types::Result;

/// Create an empty page at the standard blank-page size (A4).
pub fn create_blank_page(doc: &mut Document, parent_id: ObjectId) -> Result<ObjectId> {
    // Empty content stream keeps viewers that require /Contents happy
    let content_stream = Stream::new(Dictionary::new(), Vec::new());
    let content_id = doc.add_object(content_stream);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(BLANK_PAGE_WIDTH_PT),
            Object::Real(BLANK_PAGE_HEIGHT_PT),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(Dictionary::new()));

    Ok(doc.add_object(page_dict))
}
