use chrono::Utc;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::student_fees::{MarkInstallmentPaidCommand, PaymentSummary};
use crate::domain::error::{FeeError, FeeResult};
use crate::domain::models::FeeInstallment;
use crate::domain::money;
use crate::storage::traits::{DocumentStore, StudentFeeStorage};
use crate::storage::StudentFeeRepository;

/// Service for recording installment payments against persisted schedules
#[derive(Clone)]
pub struct PaymentService {
    student_fee_repository: StudentFeeRepository,
}

impl PaymentService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            student_fee_repository: StudentFeeRepository::new(store),
        }
    }

    /// Toggle the paid flag of one installment. Only the flag and `paid_at`
    /// change; the amount and the rest of the schedule are left alone.
    ///
    /// Fails with `NotFound` when the student has no fee state and with
    /// `IndexOutOfRange` when no installment carries `index`.
    pub fn try_mark_installment_paid(
        &self,
        command: MarkInstallmentPaidCommand,
    ) -> FeeResult<FeeInstallment> {
        let mut state = self
            .student_fee_repository
            .get_student_fee_state(&command.student_id)?
            .ok_or_else(|| FeeError::not_found("Student fee state", &command.student_id))?;

        let count = state.installments.len();
        let installment = state.installment_mut(command.index).ok_or_else(|| {
            FeeError::IndexOutOfRange {
                student_id: command.student_id.clone(),
                index: command.index,
                count,
            }
        })?;

        let changed = installment.set_paid(command.paid, || Utc::now().to_rfc3339());
        let updated = installment.clone();

        if changed {
            self.student_fee_repository.store_student_fee_state(&state)?;
            info!(
                "Installment {} for student {} marked {}",
                command.index,
                command.student_id,
                if command.paid { "paid" } else { "unpaid" }
            );
        }

        Ok(updated)
    }

    /// Toggle the paid flag of one installment; an unknown student or index
    /// is a silent no-op
    pub fn mark_installment_paid(&self, command: MarkInstallmentPaidCommand) -> FeeResult<()> {
        info!("Marking installment: {:?}", command);

        let student_id = command.student_id.clone();
        match self.try_mark_installment_paid(command) {
            Ok(_) => Ok(()),
            Err(e) if e.is_absorbable() => {
                warn!("Ignoring payment update for student {}: {}", student_id, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Paid and outstanding totals over the student's persisted schedule
    pub fn payment_summary(&self, student_id: &str) -> FeeResult<Option<PaymentSummary>> {
        let state = match self.student_fee_repository.get_student_fee_state(student_id)? {
            Some(state) => state,
            None => return Ok(None),
        };

        let (paid, unpaid): (Vec<&FeeInstallment>, Vec<&FeeInstallment>) =
            state.installments.iter().partition(|i| i.paid);

        let overflow = || {
            FeeError::InvalidConfiguration(format!(
                "Installment totals for student {} are too large to compute",
                student_id
            ))
        };
        let paid_amount = money::checked_sum(paid.iter().map(|i| i.amount)).ok_or_else(overflow)?;
        let outstanding_amount =
            money::checked_sum(unpaid.iter().map(|i| i.amount)).ok_or_else(overflow)?;
        let total_amount = paid_amount
            .checked_add(outstanding_amount)
            .ok_or_else(overflow)?;

        Ok(Some(PaymentSummary {
            student_id: state.student_id.clone(),
            total_amount,
            paid_amount,
            outstanding_amount,
            paid_count: paid.len(),
            unpaid_count: unpaid.len(),
        }))
    }
}
