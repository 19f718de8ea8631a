//! Append-only edit log and the log-replay assembly source.
//!
//! The log is an audit/undo aid, not the source of truth: when a
//! [`PageComposition`] snapshot exists it wins. When only a log exists,
//! replay derives a synthetic sequence by pushing every entry through the
//! same public mutation methods, so a single assembly algorithm serves
//! both paths and they cannot drift.

use chrono::{DateTime, Local};

use crate::model::PageComposition;
use crate::types::Result;

/// One recorded edit. Indices are visible indices at the time the edit
/// was made, identical to a direct mutation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    Rotate { index: usize, degrees: u16 },
    Delete { index: usize },
    Reorder { from: usize, to: usize },
    Duplicate { index: usize },
    InsertBlank { after: Option<usize> },
}

#[derive(Debug, Clone)]
pub struct OperationRecord {
    pub op: EditOp,
    pub at: DateTime<Local>,
}

/// Append-only sequence of recorded edits.
#[derive(Debug, Clone, Default)]
pub struct OperationLog {
    records: Vec<OperationRecord>,
}

impl OperationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: EditOp) {
        self.records.push(OperationRecord {
            op,
            at: Local::now(),
        });
    }

    pub fn records(&self) -> &[OperationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replay the log against a fresh sequence of `original_pages` pages.
    pub fn derive_composition(&self, original_pages: usize) -> Result<PageComposition> {
        let mut model = PageComposition::from_original(original_pages);
        for record in &self.records {
            match record.op {
                EditOp::Rotate { index, degrees } => model.rotate(index, degrees)?,
                EditOp::Delete { index } => model.delete(index)?,
                EditOp::Reorder { from, to } => model.reorder(from, to)?,
                EditOp::Duplicate { index } => model.duplicate(index)?,
                EditOp::InsertBlank { after } => model.insert_blank(after),
            }
        }
        Ok(model)
    }
}

/// What the assembly algorithm consumes.
///
/// Exactly one authoritative representation at a time; the log variant is
/// converted into a sequence before assembly, never assembled directly.
#[derive(Debug, Clone)]
pub enum AssemblySource {
    /// A full page-sequence snapshot (preferred when available).
    Sequence(PageComposition),
    /// Fallback: replay a recorded log against the original page order.
    Log {
        log: OperationLog,
        original_pages: usize,
    },
}

impl AssemblySource {
    pub fn into_composition(self) -> Result<PageComposition> {
        match self {
            AssemblySource::Sequence(model) => Ok(model),
            AssemblySource::Log {
                log,
                original_pages,
            } => log.derive_composition(original_pages),
        }
    }
}
