//! In-memory document store for tests and ephemeral runs.

use anyhow::{anyhow, Result};
use log::debug;
use std::sync::{Arc, Mutex};

use crate::storage::document::AppDocument;
use crate::storage::traits::DocumentStore;

/// Holds the document behind a mutex; clones share the same document.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    document: Arc<Mutex<AppDocument>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing document
    pub fn with_document(document: AppDocument) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
        }
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn read_document(&self) -> Result<AppDocument> {
        let document = self
            .document
            .lock()
            .map_err(|_| anyhow!("In-memory document lock poisoned"))?;
        Ok(document.clone())
    }

    fn write_document(&self, document: &AppDocument) -> Result<()> {
        let mut stored = self
            .document
            .lock()
            .map_err(|_| anyhow!("In-memory document lock poisoned"))?;
        *stored = document.clone();
        debug!(
            "Wrote in-memory document ({} fee configs, {} student fee states)",
            document.fee_configs.len(),
            document.student_fees.len()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::StudentRecord;

    #[test]
    fn test_empty_store_reads_default_document() {
        let store = MemoryDocumentStore::new();
        assert_eq!(store.read_document().unwrap(), AppDocument::default());
    }

    #[test]
    fn test_clones_share_document() {
        let store = MemoryDocumentStore::new();
        let other_handle = store.clone();

        let mut document = AppDocument::default();
        document.students.push(StudentRecord::new("s-1", "c-1"));
        store.write_document(&document).unwrap();

        assert_eq!(other_handle.read_document().unwrap().students.len(), 1);
    }

    #[test]
    fn test_last_writer_wins_at_document_granularity() {
        let store = MemoryDocumentStore::new();

        // Two callers read the same snapshot
        let mut first = store.read_document().unwrap();
        let mut second = store.read_document().unwrap();

        first.students.push(StudentRecord::new("s-1", "c-1"));
        store.write_document(&first).unwrap();

        second.students.push(StudentRecord::new("s-2", "c-1"));
        store.write_document(&second).unwrap();

        let stored = store.read_document().unwrap();
        let ids: Vec<&str> = stored.students.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["s-2"]);
    }
}
