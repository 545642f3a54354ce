//! # Domain Module
//!
//! Contains the fee and installment logic of the school management backend.
//!
//! The domain layer owns every rule about how a student's fee is computed and
//! paid. It reaches persistence only through the repositories in `storage` and
//! knows nothing about HTTP.
//!
//! ## Module Organization
//!
//! - **fee_config_service**: per-class base fee, installment count and due dates
//! - **student_fee_service**: extra-fee ledger and explicit recomputation
//! - **payment_service**: paid/unpaid toggles and payment summaries
//! - **projection_service**: persisted single-student reads and live class reads
//! - **legacy_fee_service**: the older flat per-class fee with a paid-by list
//! - **proration**: the pure split of a total into installments
//! - **carry_over**: which payment flags survive a schedule rebuild
//!
//! ## Business Rules
//!
//! - Amounts are exact decimals rounded to cents; installments always sum to
//!   the student's total
//! - Any rounding residue goes to the last installment
//! - Schedules change only on an explicit recompute, never as a side effect of
//!   a configuration or ledger write
//! - Payment flags follow the installment index across rebuilds
//! - Class-wide reads are recomputed live and are never persisted

pub mod carry_over;
pub mod commands;
pub mod error;
pub mod fee_config_service;
pub mod legacy_fee_service;
pub mod models;
pub mod money;
pub mod payment_service;
pub mod projection_service;
pub mod proration;
pub mod student_fee_service;

pub use carry_over::{CarryOverPolicy, PositionalCarryOver};
pub use error::{FeeError, FeeResult};
pub use fee_config_service::FeeConfigService;
pub use legacy_fee_service::LegacyFeeService;
pub use payment_service::PaymentService;
pub use projection_service::ProjectionService;
pub use student_fee_service::StudentFeeService;
