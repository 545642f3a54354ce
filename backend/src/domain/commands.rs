//! Domain-level command and result types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types.

pub mod fee_config {
    use crate::domain::models::ClassFeeConfig;
    use rust_decimal::Decimal;

    /// Input for creating or updating a class fee configuration.
    #[derive(Debug, Clone)]
    pub struct SetClassFeeConfigCommand {
        pub class_id: String,
        pub base_fee_amount: Decimal,
        pub num_installments: u32,
    }

    /// Input for replacing a class's installment due dates.
    #[derive(Debug, Clone)]
    pub struct SetInstallmentDatesCommand {
        pub class_id: String,
        pub dates: Vec<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SetClassFeeConfigResult {
        pub fee_config: ClassFeeConfig,
        /// True when the installment count changed and dates were reset
        pub dates_reset: bool,
        pub success_message: String,
    }
}

pub mod student_fees {
    use rust_decimal::Decimal;
    use std::collections::BTreeMap;

    /// Input for merging extra charges into a student's ledger.
    #[derive(Debug, Clone)]
    pub struct UpsertExtraFeesCommand {
        pub student_id: String,
        pub class_id: String,
        pub extra: BTreeMap<String, Decimal>,
    }

    /// Input for toggling an installment's paid flag.
    #[derive(Debug, Clone)]
    pub struct MarkInstallmentPaidCommand {
        pub student_id: String,
        pub index: u32,
        pub paid: bool,
    }

    /// Result of recomputing a whole class.
    #[derive(Debug, Clone)]
    pub struct RecomputeClassResult {
        pub class_id: String,
        pub recomputed_count: usize,
    }

    /// Totals over a student's persisted schedule.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PaymentSummary {
        pub student_id: String,
        pub total_amount: Decimal,
        pub paid_amount: Decimal,
        pub outstanding_amount: Decimal,
        pub paid_count: usize,
        pub unpaid_count: usize,
    }
}

pub mod legacy_fees {
    use rust_decimal::Decimal;

    #[derive(Debug, Clone)]
    pub struct SetLegacyClassFeeCommand {
        pub class_id: String,
        pub amount: Decimal,
    }

    #[derive(Debug, Clone)]
    pub struct SetLegacyPaymentCommand {
        pub class_id: String,
        pub student_id: String,
        pub paid: bool,
    }
}
