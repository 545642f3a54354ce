use anyhow::Result;
use std::sync::Arc;

use crate::domain::models::StudentRecord;
use crate::storage::traits::{DocumentStore, StudentDirectory};

/// Reads student records from the application document. Students are
/// created and removed by the directory collaborator, never here.
#[derive(Clone)]
pub struct DocumentStudentDirectory {
    store: Arc<dyn DocumentStore>,
}

impl DocumentStudentDirectory {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl StudentDirectory for DocumentStudentDirectory {
    fn get_student(&self, student_id: &str) -> Result<Option<StudentRecord>> {
        let document = self.store.read_document()?;
        Ok(document.students.into_iter().find(|s| s.id == student_id))
    }

    fn list_students_in_class(&self, class_id: &str) -> Result<Vec<StudentRecord>> {
        let document = self.store.read_document()?;
        Ok(document
            .students
            .into_iter()
            .filter(|s| s.class_id == class_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::document::AppDocument;
    use crate::storage::memory::MemoryDocumentStore;

    #[test]
    fn test_lookup_and_class_listing() {
        let mut document = AppDocument::default();
        document.students = vec![
            StudentRecord::new("s-2", "c-1"),
            StudentRecord::new("s-1", "c-2"),
            StudentRecord::new("s-3", "c-1"),
        ];
        let directory =
            DocumentStudentDirectory::new(Arc::new(MemoryDocumentStore::with_document(document)));

        assert_eq!(directory.get_student("s-1").unwrap().unwrap().class_id, "c-2");
        assert!(directory.get_student("s-9").unwrap().is_none());

        let ids: Vec<String> = directory
            .list_students_in_class("c-1")
            .unwrap()
            .into_iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec!["s-2", "s-3"]);
    }
}
