pub mod fee_config;
pub mod legacy_fee;
pub mod student;
pub mod student_fee;

pub use fee_config::ClassFeeConfig;
pub use legacy_fee::LegacyClassFee;
pub use student::StudentRecord;
pub use student_fee::{FeeInstallment, StudentFeeState};
