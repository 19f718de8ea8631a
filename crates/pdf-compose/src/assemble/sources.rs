//! Source documents feeding an assembly.

use std::collections::HashMap;

use lopdf::Document;

use crate::types::{ComposeError, DocumentId, Result};

/// The primary source document plus any registered external documents.
///
/// External pages are referenced from the model by [`DocumentId`];
/// registration hands out the handle.
#[derive(Debug, Clone)]
pub struct SourceSet {
    primary: Document,
    externals: HashMap<DocumentId, Document>,
    next_id: u64,
}

impl SourceSet {
    pub fn new(primary: Document) -> Self {
        Self {
            primary,
            externals: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn primary(&self) -> &Document {
        &self.primary
    }

    /// Register an external document and return its handle.
    pub fn register_external(&mut self, doc: Document) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        self.externals.insert(id, doc);
        id
    }

    /// Look up a registered external document.
    ///
    /// An unknown handle surfaces as a document-load error; there is no
    /// safe default document to substitute.
    pub fn external(&self, id: DocumentId) -> Result<&Document> {
        self.externals
            .get(&id)
            .ok_or_else(|| ComposeError::DocumentLoad(format!("unknown source document {id:?}")))
    }
}
