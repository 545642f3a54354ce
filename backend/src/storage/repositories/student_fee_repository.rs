use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::domain::models::StudentFeeState;
use crate::storage::traits::{DocumentStore, StudentFeeStorage};

/// Repository for per-student fee states inside the application document
#[derive(Clone)]
pub struct StudentFeeRepository {
    store: Arc<dyn DocumentStore>,
}

impl StudentFeeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl StudentFeeStorage for StudentFeeRepository {
    fn store_student_fee_state(&self, state: &StudentFeeState) -> Result<()> {
        let mut document = self.store.read_document()?;

        match document
            .student_fees
            .iter_mut()
            .find(|s| s.student_id == state.student_id)
        {
            Some(existing) => *existing = state.clone(),
            None => document.student_fees.push(state.clone()),
        }

        self.store.write_document(&document)?;
        debug!(
            "Stored fee state for student '{}' ({} installments)",
            state.student_id,
            state.installments.len()
        );
        Ok(())
    }

    fn get_student_fee_state(&self, student_id: &str) -> Result<Option<StudentFeeState>> {
        let document = self.store.read_document()?;
        Ok(document
            .student_fees
            .into_iter()
            .find(|s| s.student_id == student_id))
    }

    fn list_student_fee_states(&self) -> Result<Vec<StudentFeeState>> {
        Ok(self.store.read_document()?.student_fees)
    }

    fn delete_student_fee_state(&self, student_id: &str) -> Result<bool> {
        let mut document = self.store.read_document()?;
        let before = document.student_fees.len();
        document.student_fees.retain(|s| s.student_id != student_id);

        if document.student_fees.len() == before {
            return Ok(false);
        }

        self.store.write_document(&document)?;
        debug!("Deleted fee state for student '{}'", student_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::MemoryDocumentStore;
    use rust_decimal_macros::dec;

    fn setup() -> StudentFeeRepository {
        StudentFeeRepository::new(Arc::new(MemoryDocumentStore::new()))
    }

    #[test]
    fn test_store_get_and_replace() {
        let repo = setup();
        let mut state = StudentFeeState::new("s-1", "c-1");
        repo.store_student_fee_state(&state).unwrap();

        state.extra_fees.insert("hostel".to_string(), dec!(150));
        repo.store_student_fee_state(&state).unwrap();

        let stored = repo.get_student_fee_state("s-1").unwrap().unwrap();
        assert_eq!(stored.extra_total(), Some(dec!(150)));
        assert!(repo.get_student_fee_state("s-2").unwrap().is_none());
    }

    #[test]
    fn test_list_all() {
        let repo = setup();
        repo.store_student_fee_state(&StudentFeeState::new("s-1", "c-1")).unwrap();
        repo.store_student_fee_state(&StudentFeeState::new("s-2", "c-2")).unwrap();
        repo.store_student_fee_state(&StudentFeeState::new("s-3", "c-1")).unwrap();

        let ids: Vec<String> = repo
            .list_student_fee_states()
            .unwrap()
            .into_iter()
            .map(|s| s.student_id)
            .collect();
        assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
    }

    #[test]
    fn test_delete() {
        let repo = setup();
        repo.store_student_fee_state(&StudentFeeState::new("s-1", "c-1")).unwrap();

        assert!(repo.delete_student_fee_state("s-1").unwrap());
        assert!(repo.get_student_fee_state("s-1").unwrap().is_none());
        assert!(!repo.delete_student_fee_state("s-1").unwrap());
    }
}
