use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Import paths already evaluated during this run, whatever the outcome.
#[derive(Debug, Default)]
pub struct ProcessedImports {
    seen: Mutex<HashSet<String>>,
}

impl ProcessedImports {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` exactly once per import path and marks it processed.
    pub fn should_process(&self, import_path: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        if seen.contains(import_path) {
            return false;
        }
        seen.insert(import_path.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
