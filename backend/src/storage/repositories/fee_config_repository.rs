use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::domain::models::ClassFeeConfig;
use crate::storage::traits::{DocumentStore, FeeConfigStorage};

/// Repository for class fee configs inside the application document
#[derive(Clone)]
pub struct FeeConfigRepository {
    store: Arc<dyn DocumentStore>,
}

impl FeeConfigRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }
}

impl FeeConfigStorage for FeeConfigRepository {
    fn store_fee_config(&self, config: &ClassFeeConfig) -> Result<()> {
        let mut document = self.store.read_document()?;

        match document
            .fee_configs
            .iter_mut()
            .find(|c| c.class_id == config.class_id)
        {
            Some(existing) => *existing = config.clone(),
            None => document.fee_configs.push(config.clone()),
        }

        self.store.write_document(&document)?;
        debug!("Stored fee config for class '{}'", config.class_id);
        Ok(())
    }

    fn get_fee_config(&self, class_id: &str) -> Result<Option<ClassFeeConfig>> {
        let document = self.store.read_document()?;
        Ok(document
            .fee_configs
            .into_iter()
            .find(|c| c.class_id == class_id))
    }

    fn list_fee_configs(&self) -> Result<Vec<ClassFeeConfig>> {
        Ok(self.store.read_document()?.fee_configs)
    }
}
