//! Process-wide font byte cache.
//!
//! Injected rather than global so each test (and each application session)
//! can hold an isolated instance. Entries are only added during normal
//! operation; `clear` exists for memory-pressure scenarios and must not
//! run while an assembly is consuming cached entries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Append-only cache of fetched font programs, keyed by font name.
#[derive(Debug, Default)]
pub struct FontCache {
    entries: Mutex<HashMap<String, Arc<Vec<u8>>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<Vec<u8>>> {
        self.entries.lock().unwrap().get(name).cloned()
    }

    /// Store fetched bytes, returning the shared handle.
    ///
    /// Concurrent fetches of the same font may both insert; last write
    /// wins and both callers keep a valid handle.
    pub fn insert(&self, name: &str, bytes: Vec<u8>) -> Arc<Vec<u8>> {
        let arc = Arc::new(bytes);
        self.entries
            .lock()
            .unwrap()
            .insert(name.to_owned(), Arc::clone(&arc));
        arc
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}
