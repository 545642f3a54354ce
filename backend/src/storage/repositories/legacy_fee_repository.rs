use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::domain::models::LegacyClassFee;
use crate::storage::traits::{DocumentStore, LegacyFeeStorage};

/// Repository for the legacy flat class fees (`fees` in the document)
#[derive(Clone)]
pub struct LegacyFeeRepository {
    store: Arc<dyn DocumentStore>,
}

impl LegacyFeeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl LegacyFeeStorage for LegacyFeeRepository {
    fn store_legacy_fee(&self, fee: &LegacyClassFee) -> Result<()> {
        let mut document = self.store.read_document()?;

        match document.fees.iter_mut().find(|f| f.class_id == fee.class_id) {
            Some(existing) => *existing = fee.clone(),
            None => document.fees.push(fee.clone()),
        }

        self.store.write_document(&document)?;
        debug!("Stored legacy fee for class '{}'", fee.class_id);
        Ok(())
    }

    fn get_legacy_fee(&self, class_id: &str) -> Result<Option<LegacyClassFee>> {
        let document = self.store.read_document()?;
        Ok(document.fees.into_iter().find(|f| f.class_id == class_id))
    }
}
