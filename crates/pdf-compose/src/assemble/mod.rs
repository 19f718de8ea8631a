//! Document assembly: walking the page sequence into an output document.
//!
//! Assembly consumes a [`PageComposition`] exactly once:
//! 1. walk the backing sequence in order, skipping tombstones;
//! 2. resolve each record's bytes (copy original/external page, synthesize
//!    blank);
//! 3. apply the record's rotation delta to the fresh page;
//! 4. append in walk order; output order equals visible backing order.
//!
//! Decoration passes run afterward over the fully assembled document,
//! watermark before numbering so numbers are never obscured by the
//! watermark's opacity layer. The model itself is never touched here;
//! cancelling an assembly means dropping the future.

mod blank;
mod copy;
mod io;
mod sources;

pub use io::{document_to_bytes, load_multiple_pdfs, load_pdf, save_pdf};
pub use sources::SourceSet;

use std::collections::HashMap;

use lopdf::{Dictionary, Document, Object, ObjectId};
use pdf_fonts::{FontCache, FontRegistry};

use crate::config::DecorationOptions;
use crate::decorate;
use crate::model::{PageComposition, PageSource};
use crate::oplog::AssemblySource;
use crate::types::{ComposeError, DocumentId, Result};

/// Assemble the model into a fresh output document.
///
/// Mutations on the model must not run concurrently with an in-flight
/// assembly; callers serialize edits (e.g. by disabling editing UI).
pub async fn assemble(model: &PageComposition, sources: &SourceSet) -> Result<Document> {
    let model = model.clone();
    let sources = sources.clone();

    tokio::task::spawn_blocking(move || assemble_sync(&model, &sources)).await?
}

/// Synchronous assembly core; both the async wrapper and the full
/// composition pipeline run through here.
pub fn assemble_sync(model: &PageComposition, sources: &SourceSet) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_id = output.new_object_id();

    let primary_pages: Vec<ObjectId> = sources.primary().get_pages().values().copied().collect();
    let mut primary_cache: HashMap<ObjectId, ObjectId> = HashMap::new();
    let mut external_state: HashMap<DocumentId, (Vec<ObjectId>, HashMap<ObjectId, ObjectId>)> =
        HashMap::new();

    let mut page_refs = Vec::new();

    for record in model.records().iter().filter(|r| !r.deleted) {
        let page_id = match record.source {
            PageSource::Blank => blank::create_blank_page(&mut output, pages_id)?,
            PageSource::Original { page_index } => {
                let src_id =
                    *primary_pages
                        .get(page_index)
                        .ok_or(ComposeError::PageIndex {
                            index: page_index,
                            len: primary_pages.len(),
                        })?;
                copy::copy_page(
                    &mut output,
                    sources.primary(),
                    src_id,
                    pages_id,
                    &mut primary_cache,
                )?
            }
            PageSource::External { doc, page_index } => {
                let source_doc = sources.external(doc)?;
                let (page_ids, cache) = external_state.entry(doc).or_insert_with(|| {
                    (
                        source_doc.get_pages().values().copied().collect(),
                        HashMap::new(),
                    )
                });
                let src_id = *page_ids.get(page_index).ok_or(ComposeError::PageIndex {
                    index: page_index,
                    len: page_ids.len(),
                })?;
                copy::copy_page(&mut output, source_doc, src_id, pages_id, cache)?
            }
        };

        if record.rotation_delta != 0 {
            apply_rotation(&mut output, page_id, record.rotation_delta)?;
        }

        page_refs.push(Object::Reference(page_id));
    }

    if page_refs.is_empty() {
        return Err(ComposeError::NoPages);
    }

    // Pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_id, Object::Dictionary(pages_dict));

    // Catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Add the record's rotation delta to the copied page's /Rotate entry.
fn apply_rotation(doc: &mut Document, page_id: ObjectId, delta: u16) -> Result<()> {
    let page_dict = doc.get_dictionary(page_id)?;
    let existing = page_dict
        .get(b"Rotate")
        .ok()
        .and_then(|obj| obj.as_i64().ok())
        .unwrap_or(0);

    let mut updated = page_dict.clone();
    updated.set("Rotate", Object::Integer((existing + delta as i64) % 360));
    doc.objects.insert(page_id, Object::Dictionary(updated));
    Ok(())
}

/// Full composition pipeline: assemble, decorate, serialize.
///
/// Configs are validated before any page is touched, and the watermark
/// font is resolved (network I/O) before entering the blocking section.
pub async fn compose_to_bytes(
    source: AssemblySource,
    sources: &SourceSet,
    decorations: &DecorationOptions,
    registry: &FontRegistry,
    cache: &FontCache,
) -> Result<Vec<u8>> {
    decorations.watermark.validate()?;
    decorations.page_numbers.validate()?;

    let model = source.into_composition()?;

    let prepared = if decorations.watermark.enabled {
        Some(decorate::prepare_watermark(&decorations.watermark, registry, cache).await)
    } else {
        None
    };

    let sources = sources.clone();
    let decorations = decorations.clone();

    tokio::task::spawn_blocking(move || {
        let mut doc = assemble_sync(&model, &sources)?;

        if let Some(prepared) = &prepared {
            decorate::apply_watermark(
                &mut doc,
                &decorations.watermark,
                prepared,
                decorations.watermark_selection.as_ref(),
            )?;
        }
        if decorations.page_numbers.enabled {
            decorate::apply_page_numbers(&mut doc, &decorations.page_numbers)?;
        }

        document_to_bytes(doc)
    })
    .await?
}
