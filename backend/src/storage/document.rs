//! # Application Document
//!
//! The whole application state is a single serialized document. The fee
//! subsystem owns `feeConfigs` and `studentFees`, reads `students`, keeps the
//! legacy `fees` list separate, and carries every other top-level entity
//! (classes, attendance, homework, ...) through untouched.
//!
//! ```json
//! {
//!   "feeConfigs":  [ { "classId": "...", "baseFeeAmount": 1000, ... } ],
//!   "studentFees": [ { "studentId": "...", "installments": [ ... ] } ],
//!   "students":    [ { "id": "...", "classId": "...", "name": "..." } ],
//!   "fees":        [ { "classId": "...", "amount": 300, "paidStudentIds": [] } ],
//!   "classes":     [ ... ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::models::{ClassFeeConfig, LegacyClassFee, StudentFeeState, StudentRecord};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDocument {
    #[serde(default)]
    pub fee_configs: Vec<ClassFeeConfig>,
    #[serde(default)]
    pub student_fees: Vec<StudentFeeState>,
    #[serde(default)]
    pub students: Vec<StudentRecord>,
    #[serde(default)]
    pub fees: Vec<LegacyClassFee>,
    /// Entities owned by other parts of the application
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl AppDocument {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
