//! Carry-over of payment state across a schedule rebuild.

use crate::domain::models::FeeInstallment;

/// Decides which `paid`/`paid_at` values survive when a freshly prorated
/// schedule replaces the previous one. Amounts are never carried.
pub trait CarryOverPolicy: Send + Sync {
    fn carry_over(&self, previous: &[FeeInstallment], next: &mut [FeeInstallment]);
}

/// Matches installments by `index`. Previous flags beyond the new length are
/// dropped; new indices without a match stay unpaid.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalCarryOver;

impl CarryOverPolicy for PositionalCarryOver {
    fn carry_over(&self, previous: &[FeeInstallment], next: &mut [FeeInstallment]) {
        for installment in next.iter_mut() {
            if let Some(prior) = previous.iter().find(|p| p.index == installment.index) {
                installment.paid = prior.paid;
                installment.paid_at = prior.paid_at.clone();
            }
        }
    }
}
