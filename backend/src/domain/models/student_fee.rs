//! Domain models for a student's fee ledger and installment schedule.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::money;

/// One scheduled partial payment. `index` is 1-based and unique within a
/// schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeInstallment {
    pub index: u32,
    pub amount: Decimal,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub paid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<String>, // RFC 3339 timestamp
}

impl FeeInstallment {
    /// Unpaid installment
    pub fn new(index: u32, amount: Decimal, due_date: String) -> Self {
        Self {
            index,
            amount,
            due_date,
            paid: false,
            paid_at: None,
        }
    }

    /// Set the paid flag. `paid_at` is stamped only on an unpaid → paid
    /// transition and cleared on paid → unpaid. Returns true if the flag changed.
    pub fn set_paid(&mut self, paid: bool, now: impl FnOnce() -> String) -> bool {
        match (self.paid, paid) {
            (false, true) => {
                self.paid = true;
                self.paid_at = Some(now());
                true
            }
            (true, false) => {
                self.paid = false;
                self.paid_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Fee ledger for one student. Stored in the application document under
/// `studentFees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeState {
    pub student_id: String,
    pub class_id: String,
    #[serde(default)]
    pub extra_fees: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub installments: Vec<FeeInstallment>,
}

impl StudentFeeState {
    pub fn new(student_id: &str, class_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
            class_id: class_id.to_string(),
            extra_fees: BTreeMap::new(),
            installments: Vec::new(),
        }
    }

    /// Sum of all extra charges; `None` if it overflows
    pub fn extra_total(&self) -> Option<Decimal> {
        money::checked_sum(self.extra_fees.values().copied())
    }

    /// Sum of the scheduled installment amounts; `None` if it overflows
    pub fn scheduled_total(&self) -> Option<Decimal> {
        money::checked_sum(self.installments.iter().map(|i| i.amount))
    }

    pub fn installment_mut(&mut self, index: u32) -> Option<&mut FeeInstallment> {
        self.installments.iter_mut().find(|i| i.index == index)
    }
}
