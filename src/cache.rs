//! Token cache keyed by raw path text
//!
//! Entries are keyed by the exact input string: equivalent paths with
//! different spacing or escaping are separate entries. The cache lives
//! until the owning engine mutates its syntax table, which wipes it
//! whole; eviction is all-or-nothing.

use std::collections::HashMap;
use std::sync::Arc;

use crate::tokenizer::Program;

/// Process-lifetime map from path text to its compiled program
#[derive(Debug, Default)]
pub struct TokenCache {
    entries: HashMap<String, Arc<Program>>,
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored program for a path, if present
    #[must_use]
    pub fn get(&self, path: &str) -> Option<Arc<Program>> {
        self.entries.get(path).map(Arc::clone)
    }

    /// Store a freshly tokenized program
    pub fn insert(&mut self, path: &str, program: Arc<Program>) {
        self.entries.insert(path.to_string(), program);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wipe every entry; programs already handed out stay valid
    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("token cache wiped ({} entries)", self.entries.len());
        }
        self.entries.clear();
    }
}
