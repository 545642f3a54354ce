//! Domain model for a class fee configuration.
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Base fee and installment layout for one class. Stored in the application
/// document under `feeConfigs`, one entry per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFeeConfig {
    #[serde(default)]
    pub id: String,
    pub class_id: String,
    pub base_fee_amount: Decimal,
    pub num_installments: u32,
    #[serde(default)]
    pub installment_dates: Vec<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

impl ClassFeeConfig {
    /// Generate a fee config ID
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Unset due dates for `count` installments
    pub fn placeholder_dates(count: u32) -> Vec<String> {
        vec![String::new(); count as usize]
    }

    /// Whether `dates` can replace the current due dates
    pub fn accepts_dates(&self, dates: &[String]) -> bool {
        dates.len() == self.num_installments as usize
    }
}
