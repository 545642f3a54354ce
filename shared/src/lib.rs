use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fee configuration for a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassFeeConfig {
    pub id: String,
    pub class_id: String,
    /// Base fee charged to every student of the class
    pub base_fee_amount: f64,
    /// Number of installments the total is split into (at least 1)
    pub num_installments: u32,
    /// One due date per installment, empty strings when unset
    pub installment_dates: Vec<String>,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// A single scheduled partial payment of a student's fee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeInstallment {
    /// 1-based position within the schedule
    pub index: u32,
    pub amount: f64,
    pub due_date: String,
    pub paid: bool,
    /// RFC 3339 timestamp, present only while `paid` is true
    pub paid_at: Option<String>,
}

/// Per-student fee ledger: extra charges and the installment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentFeeState {
    pub student_id: String,
    pub class_id: String,
    /// Named extra charges (transport, hostel, ...)
    pub extra_fees: BTreeMap<String, f64>,
    pub installments: Vec<FeeInstallment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetClassFeeConfigRequest {
    pub base_fee_amount: f64,
    pub num_installments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetClassFeeConfigResponse {
    pub fee_config: ClassFeeConfig,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetClassFeeConfigResponse {
    pub fee_config: ClassFeeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeConfigListResponse {
    pub fee_configs: Vec<ClassFeeConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetInstallmentDatesRequest {
    /// Must contain exactly `num_installments` entries, otherwise ignored
    pub dates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertExtraFeesRequest {
    pub class_id: String,
    pub extra: BTreeMap<String, f64>,
    /// Recompute the student's installments right after the upsert
    #[serde(default)]
    pub recompute: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkInstallmentPaidRequest {
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentFeeStateResponse {
    pub fee_state: StudentFeeState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassStudentsFeeStatesResponse {
    pub class_id: String,
    pub students: Vec<StudentFeeState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecomputeClassResponse {
    pub class_id: String,
    pub recomputed_count: usize,
}

/// Totals derived from a student's persisted schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub student_id: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub outstanding_amount: f64,
    pub paid_count: usize,
    pub unpaid_count: usize,
}

/// Simple per-class flat fee with the list of students who paid it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyClassFee {
    pub id: String,
    pub class_id: String,
    pub amount: f64,
    pub paid_student_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLegacyClassFeeRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetLegacyPaymentRequest {
    pub paid: bool,
}
