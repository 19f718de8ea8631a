//! The working page sequence and its mutation operations.
//!
//! A [`PageComposition`] is the mutable model a caller edits through
//! discrete operations before assembling the output document. The visible
//! (non-deleted) order of the backing sequence IS the output order; there
//! is no separate final-order field.
//!
//! Every public operation addresses pages by *visible* index (the index a
//! user sees) and translates to the backing index through one shared
//! helper. Out-of-range indices are errors and leave the model untouched.

use crate::types::{ComposeError, DocumentId, Result};

/// Where a page's bytes come from at assembly time.
///
/// Exactly one variant holds; a record is never simultaneously blank and
/// original.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageSource {
    /// Page of the primary source document.
    Original { page_index: usize },
    /// Synthesized blank page at the standard size.
    Blank,
    /// Page borrowed from a registered external document.
    External { doc: DocumentId, page_index: usize },
}

/// One slot in the working page sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRecord {
    /// Index into the visible ordered sequence; derived, recomputed after
    /// every structural mutation. Meaningless for tombstoned records.
    pub position: usize,
    pub source: PageSource,
    /// Additive rotation, normalized to {0, 90, 180, 270}.
    pub rotation_delta: u16,
    /// Used only by selection-scoped batch operations; no effect on
    /// assembly.
    pub selected: bool,
    /// Tombstone; skipped at assembly, retained until [`PageComposition::compact`].
    pub deleted: bool,
}

impl PageRecord {
    fn new(source: PageSource) -> Self {
        Self {
            position: 0,
            source,
            rotation_delta: 0,
            selected: false,
            deleted: false,
        }
    }
}

/// The mutable page sequence of the document being edited.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageComposition {
    records: Vec<PageRecord>,
}

impl PageComposition {
    /// Sequence mirroring a freshly loaded source document.
    pub fn from_original(page_count: usize) -> Self {
        let mut model = Self {
            records: (0..page_count)
                .map(|page_index| PageRecord::new(PageSource::Original { page_index }))
                .collect(),
        };
        model.recompute_positions();
        model
    }

    /// Full backing sequence, tombstones included.
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Visible records in output order.
    pub fn visible(&self) -> impl Iterator<Item = &PageRecord> {
        self.records.iter().filter(|r| !r.deleted)
    }

    pub fn visible_len(&self) -> usize {
        self.visible().count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Translate a visible index to a backing index.
    ///
    /// The single shared helper every operation routes through; each
    /// operation re-deriving this mapping is how editors drift.
    fn backing_index(&self, visible: usize) -> Result<usize> {
        self.records
            .iter()
            .enumerate()
            .filter(|(_, r)| !r.deleted)
            .nth(visible)
            .map(|(backing, _)| backing)
            .ok_or(ComposeError::PageIndex {
                index: visible,
                len: self.visible_len(),
            })
    }

    /// Backing position where a record must be inserted to land at the
    /// given visible position.
    fn backing_insertion_index(&self, visible: usize) -> usize {
        match self.backing_index(visible) {
            Ok(backing) => backing,
            Err(_) => self.records.len(),
        }
    }

    fn recompute_positions(&mut self) {
        let mut position = 0;
        for record in &mut self.records {
            if !record.deleted {
                record.position = position;
                position += 1;
            }
        }
    }

    /// Add `degrees` to the page's rotation, normalized mod 360.
    ///
    /// Only quarter-turn deltas are meaningful input.
    pub fn rotate(&mut self, visible: usize, degrees: u16) -> Result<()> {
        if !matches!(degrees, 90 | 180 | 270) {
            return Err(ComposeError::Config(format!(
                "Rotation delta must be 90, 180 or 270, got {degrees}"
            )));
        }
        let backing = self.backing_index(visible)?;
        let record = &mut self.records[backing];
        record.rotation_delta = (record.rotation_delta + degrees) % 360;
        Ok(())
    }

    /// Tombstone the page at the given visible index.
    ///
    /// The tombstone transition is one-directional within an editing
    /// session; the record stays in the backing sequence until
    /// [`Self::compact`].
    pub fn delete(&mut self, visible: usize) -> Result<()> {
        let backing = self.backing_index(visible)?;
        self.records[backing].deleted = true;
        self.recompute_positions();
        Ok(())
    }

    /// Move the page at visible index `from` to visible index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        let visible_len = self.visible_len();
        if to >= visible_len {
            return Err(ComposeError::PageIndex {
                index: to,
                len: visible_len,
            });
        }
        let from_backing = self.backing_index(from)?;
        let record = self.records.remove(from_backing);
        let to_backing = self.backing_insertion_index(to);
        self.records.insert(to_backing, record);
        self.recompute_positions();
        Ok(())
    }

    /// Insert a shallow copy immediately after the given visible index.
    ///
    /// The copy shares `source`: a duplicated page re-reads the same
    /// source page bytes at assembly time rather than snapshotting them.
    pub fn duplicate(&mut self, visible: usize) -> Result<()> {
        let backing = self.backing_index(visible)?;
        let copy = self.records[backing].clone();
        self.records.insert(backing + 1, copy);
        self.recompute_positions();
        Ok(())
    }

    /// Insert a blank page after the given visible index.
    ///
    /// With no index: after the highest currently selected visible page,
    /// or at the end when nothing is selected.
    pub fn insert_blank(&mut self, after: Option<usize>) {
        let backing = self.insertion_point(after);
        self.records.insert(backing, PageRecord::new(PageSource::Blank));
        self.recompute_positions();
    }

    /// Insert one `External` record per page of a registered document,
    /// preserving the source document's internal page order.
    ///
    /// Placement follows the same rule as [`Self::insert_blank`].
    pub fn insert_from_external(
        &mut self,
        doc: DocumentId,
        page_count: usize,
        after: Option<usize>,
    ) {
        let backing = self.insertion_point(after);
        for page_index in 0..page_count {
            self.records.insert(
                backing + page_index,
                PageRecord::new(PageSource::External { doc, page_index }),
            );
        }
        self.recompute_positions();
    }

    /// Backing index where an insertion lands, from an optional visible
    /// anchor or the current selection.
    fn insertion_point(&self, after: Option<usize>) -> usize {
        let anchor = after.or_else(|| {
            self.visible()
                .filter(|r| r.selected)
                .map(|r| r.position)
                .max()
        });
        match anchor {
            Some(visible) => match self.backing_index(visible) {
                Ok(backing) => backing + 1,
                Err(_) => self.records.len(),
            },
            None => self.records.len(),
        }
    }

    pub fn toggle_selected(&mut self, visible: usize) -> Result<()> {
        let backing = self.backing_index(visible)?;
        let record = &mut self.records[backing];
        record.selected = !record.selected;
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for record in &mut self.records {
            record.selected = false;
        }
    }

    /// Tombstone every selected visible page.
    pub fn delete_selected(&mut self) {
        for record in &mut self.records {
            if record.selected && !record.deleted {
                record.deleted = true;
            }
        }
        self.recompute_positions();
    }

    /// Rotate every selected visible page by the same delta.
    pub fn rotate_selected(&mut self, degrees: u16) -> Result<()> {
        if !matches!(degrees, 90 | 180 | 270) {
            return Err(ComposeError::Config(format!(
                "Rotation delta must be 90, 180 or 270, got {degrees}"
            )));
        }
        for record in &mut self.records {
            if record.selected && !record.deleted {
                record.rotation_delta = (record.rotation_delta + degrees) % 360;
            }
        }
        Ok(())
    }

    /// Drop tombstoned records from the backing sequence.
    ///
    /// Assembly does not require this; it exists for callers that no
    /// longer need undo history.
    pub fn compact(&mut self) {
        self.records.retain(|r| !r.deleted);
        self.recompute_positions();
    }
}
