use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::fee_config::{
    SetClassFeeConfigCommand, SetClassFeeConfigResult, SetInstallmentDatesCommand,
};
use crate::domain::error::{FeeError, FeeResult};
use crate::domain::models::ClassFeeConfig;
use crate::domain::money::{self, MAX_INSTALLMENTS};
use crate::storage::traits::{DocumentStore, FeeConfigStorage};
use crate::storage::FeeConfigRepository;

/// Service for managing class fee configurations
#[derive(Clone)]
pub struct FeeConfigService {
    fee_config_repository: FeeConfigRepository,
}

impl FeeConfigService {
    /// Create a new FeeConfigService
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            fee_config_repository: FeeConfigRepository::new(store),
        }
    }

    /// Create or update the fee configuration of a class.
    ///
    /// Due dates are reset to empty placeholders when the installment count
    /// changes and kept otherwise. Student schedules are not touched.
    pub fn set_class_fee_config(
        &self,
        command: SetClassFeeConfigCommand,
    ) -> FeeResult<SetClassFeeConfigResult> {
        info!("Setting class fee config: {:?}", command);

        money::ensure_amount("Base fee amount", command.base_fee_amount)?;

        if command.num_installments == 0 {
            return Err(FeeError::InvalidConfiguration(
                "Number of installments must be at least 1".to_string(),
            ));
        }

        if command.num_installments > MAX_INSTALLMENTS {
            return Err(FeeError::InvalidConfiguration(format!(
                "Number of installments cannot exceed {}: {}",
                MAX_INSTALLMENTS, command.num_installments
            )));
        }

        let existing = self
            .fee_config_repository
            .get_fee_config(&command.class_id)?;

        let now = Utc::now().to_rfc3339();
        let mut dates_reset = false;

        let fee_config = match existing {
            Some(mut config) => {
                if config.num_installments != command.num_installments {
                    config.installment_dates =
                        ClassFeeConfig::placeholder_dates(command.num_installments);
                    dates_reset = true;
                }
                config.base_fee_amount = command.base_fee_amount;
                config.num_installments = command.num_installments;
                config.updated_at = now;
                config
            }
            None => {
                dates_reset = true;
                ClassFeeConfig {
                    id: ClassFeeConfig::generate_id(),
                    class_id: command.class_id.clone(),
                    base_fee_amount: command.base_fee_amount,
                    num_installments: command.num_installments,
                    installment_dates: ClassFeeConfig::placeholder_dates(command.num_installments),
                    created_at: now.clone(),
                    updated_at: now,
                }
            }
        };

        self.fee_config_repository.store_fee_config(&fee_config)?;

        info!(
            "Updated fee config for class {}: {} in {} installments",
            fee_config.class_id, fee_config.base_fee_amount, fee_config.num_installments
        );

        Ok(SetClassFeeConfigResult {
            fee_config,
            dates_reset,
            success_message: "Fee configuration updated successfully".to_string(),
        })
    }

    /// Replace a class's due dates, failing when the config is missing or the
    /// number of dates differs from the installment count
    pub fn try_set_installment_dates(
        &self,
        command: SetInstallmentDatesCommand,
    ) -> FeeResult<ClassFeeConfig> {
        let mut config = self
            .fee_config_repository
            .get_fee_config(&command.class_id)?
            .ok_or_else(|| FeeError::not_found("Fee config", &command.class_id))?;

        if !config.accepts_dates(&command.dates) {
            return Err(FeeError::InvalidConfiguration(format!(
                "Expected {} installment dates, got {}",
                config.num_installments,
                command.dates.len()
            )));
        }

        config.installment_dates = command.dates;
        config.updated_at = Utc::now().to_rfc3339();
        self.fee_config_repository.store_fee_config(&config)?;

        info!("Updated installment dates for class {}", config.class_id);
        Ok(config)
    }

    /// Replace a class's due dates; a missing config or a length mismatch is
    /// a silent no-op
    pub fn set_installment_dates(&self, command: SetInstallmentDatesCommand) -> FeeResult<()> {
        let class_id = command.class_id.clone();
        match self.try_set_installment_dates(command) {
            Ok(_) => Ok(()),
            Err(e) if e.is_absorbable() => {
                warn!("Ignoring installment dates for class {}: {}", class_id, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Get the fee configuration of a class
    pub fn get_class_fee_config(&self, class_id: &str) -> FeeResult<Option<ClassFeeConfig>> {
        Ok(self.fee_config_repository.get_fee_config(class_id)?)
    }

    /// List all class fee configurations
    pub fn list_class_fee_configs(&self) -> FeeResult<Vec<ClassFeeConfig>> {
        let configs = self.fee_config_repository.list_fee_configs()?;
        info!("Found {} class fee configurations", configs.len());
        Ok(configs)
    }
}
