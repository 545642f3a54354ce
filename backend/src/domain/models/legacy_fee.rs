//! Domain model for the legacy flat per-class fee.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Flat fee for a class plus the students who have paid it. Independent of
/// the installment ledger; stored under `fees`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyClassFee {
    #[serde(default)]
    pub id: String,
    pub class_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub paid_student_ids: Vec<String>,
}

impl LegacyClassFee {
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub fn is_paid_by(&self, student_id: &str) -> bool {
        self.paid_student_ids.iter().any(|id| id == student_id)
    }

    /// Add or remove `student_id` from the paid list
    pub fn set_paid(&mut self, student_id: &str, paid: bool) {
        if paid {
            if !self.is_paid_by(student_id) {
                self.paid_student_ids.push(student_id.to_string());
            }
        } else {
            self.paid_student_ids.retain(|id| id != student_id);
        }
    }
}
