//! Document composition engine.
//!
//! A caller edits a [`PageComposition`] through discrete operations
//! (rotate, delete, reorder, duplicate, insert blank, merge external
//! pages), then assembles it once into an output document. Decoration
//! passes (watermark, then page numbers) run over the assembled
//! document; watermark text goes through the `pdf-script`/`pdf-fonts`
//! pipeline so its font always covers what it draws.

pub mod assemble;
mod config;
pub mod constants;
pub mod decorate;
pub mod layout;
mod model;
mod oplog;
mod types;

pub use assemble::{
    SourceSet, assemble, assemble_sync, compose_to_bytes, document_to_bytes, load_multiple_pdfs,
    load_pdf, save_pdf,
};
pub use config::*;
pub use model::{PageComposition, PageRecord, PageSource};
pub use oplog::{AssemblySource, EditOp, OperationLog, OperationRecord};
pub use types::{ComposeError, DocumentId, Result};
