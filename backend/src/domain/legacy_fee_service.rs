use log::info;
use std::sync::Arc;

use crate::domain::commands::legacy_fees::{SetLegacyClassFeeCommand, SetLegacyPaymentCommand};
use crate::domain::error::{FeeError, FeeResult};
use crate::domain::models::LegacyClassFee;
use crate::domain::money;
use crate::storage::traits::{DocumentStore, LegacyFeeStorage};
use crate::storage::LegacyFeeRepository;

/// Flat per-class fee with a paid-by list. Shares the document with the
/// installment ledger but never reads or writes installment data.
#[derive(Clone)]
pub struct LegacyFeeService {
    legacy_fee_repository: LegacyFeeRepository,
}

impl LegacyFeeService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            legacy_fee_repository: LegacyFeeRepository::new(store),
        }
    }

    /// Create or update the flat fee of a class, keeping its paid list
    pub fn set_class_fee(&self, command: SetLegacyClassFeeCommand) -> FeeResult<LegacyClassFee> {
        info!("Setting legacy class fee: {:?}", command);

        money::ensure_amount("Class fee", command.amount)?;

        let fee = match self.legacy_fee_repository.get_legacy_fee(&command.class_id)? {
            Some(mut fee) => {
                fee.amount = command.amount;
                fee
            }
            None => LegacyClassFee {
                id: LegacyClassFee::generate_id(),
                class_id: command.class_id,
                amount: command.amount,
                paid_student_ids: Vec::new(),
            },
        };

        self.legacy_fee_repository.store_legacy_fee(&fee)?;
        Ok(fee)
    }

    pub fn get_class_fee(&self, class_id: &str) -> FeeResult<Option<LegacyClassFee>> {
        Ok(self.legacy_fee_repository.get_legacy_fee(class_id)?)
    }

    /// Add or remove a student from the class's paid list. Fails with
    /// `NotFound` when the class has no flat fee.
    pub fn set_student_paid(&self, command: SetLegacyPaymentCommand) -> FeeResult<LegacyClassFee> {
        info!("Setting legacy payment: {:?}", command);

        let mut fee = self
            .legacy_fee_repository
            .get_legacy_fee(&command.class_id)?
            .ok_or_else(|| FeeError::not_found("Class fee", &command.class_id))?;

        fee.set_paid(&command.student_id, command.paid);
        self.legacy_fee_repository.store_legacy_fee(&fee)?;
        Ok(fee)
    }

    pub fn is_student_paid(&self, class_id: &str, student_id: &str) -> FeeResult<bool> {
        Ok(self
            .legacy_fee_repository
            .get_legacy_fee(class_id)?
            .map(|fee| fee.is_paid_by(student_id))
            .unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use crate::storage::memory::MemoryDocumentStore;
    use rust_decimal_macros::dec;

    fn setup_test() -> (LegacyFeeService, MemoryDocumentStore) {
        let store = MemoryDocumentStore::new();
        (LegacyFeeService::new(Arc::new(store.clone())), store)
    }

    fn set_fee(service: &LegacyFeeService, amount: Decimal) -> LegacyClassFee {
        service
            .set_class_fee(SetLegacyClassFeeCommand {
                class_id: "class-7a".to_string(),
                amount,
            })
            .unwrap()
    }

    fn pay(service: &LegacyFeeService, student_id: &str, paid: bool) -> FeeResult<LegacyClassFee> {
        service.set_student_paid(SetLegacyPaymentCommand {
            class_id: "class-7a".to_string(),
            student_id: student_id.to_string(),
            paid,
        })
    }

    #[test]
    fn test_set_and_update_class_fee() {
        let (service, _) = setup_test();
        let created = set_fee(&service, dec!(300));
        pay(&service, "s-1", true).unwrap();

        let updated = set_fee(&service, dec!(350));

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.amount, dec!(350));
        assert_eq!(updated.paid_student_ids, vec!["s-1"]);
    }

    #[test]
    fn test_negative_amount_rejected() {
        let (service, _) = setup_test();
        let result = service.set_class_fee(SetLegacyClassFeeCommand {
            class_id: "class-7a".to_string(),
            amount: dec!(-10),
        });
        assert!(matches!(result, Err(FeeError::InvalidConfiguration(_))));

        let result = service.set_class_fee(SetLegacyClassFeeCommand {
            class_id: "class-7a".to_string(),
            amount: dec!(70000000000000000000000000000),
        });
        assert!(matches!(result, Err(FeeError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_toggle_payment() {
        let (service, _) = setup_test();
        set_fee(&service, dec!(300));

        pay(&service, "s-1", true).unwrap();
        pay(&service, "s-1", true).unwrap();
        assert!(service.is_student_paid("class-7a", "s-1").unwrap());
        assert_eq!(service.get_class_fee("class-7a").unwrap().unwrap().paid_student_ids.len(), 1);

        pay(&service, "s-1", false).unwrap();
        assert!(!service.is_student_paid("class-7a", "s-1").unwrap());
    }

    #[test]
    fn test_payment_without_class_fee() {
        let (service, _) = setup_test();
        assert!(matches!(pay(&service, "s-1", true), Err(FeeError::NotFound { .. })));
        assert!(!service.is_student_paid("class-7a", "s-1").unwrap());
    }

    #[test]
    fn test_leaves_installment_data_alone() {
        let (service, store) = setup_test();
        set_fee(&service, dec!(300));
        pay(&service, "s-1", true).unwrap();

        let document = store.read_document().unwrap();
        assert_eq!(document.fees.len(), 1);
        assert!(document.student_fees.is_empty());
        assert!(document.fee_configs.is_empty());
    }
}
