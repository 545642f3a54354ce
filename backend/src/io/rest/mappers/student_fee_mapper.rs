use std::collections::BTreeMap;

use shared::{
    ClassStudentsFeeStatesResponse, FeeInstallment, PaymentSummary, RecomputeClassResponse,
    StudentFeeState, StudentFeeStateResponse, UpsertExtraFeesRequest,
};

use crate::domain::commands::student_fees::{
    PaymentSummary as DomainPaymentSummary, RecomputeClassResult, UpsertExtraFeesCommand,
};
use crate::domain::error::FeeResult;
use crate::domain::models::{
    FeeInstallment as DomainFeeInstallment, StudentFeeState as DomainStudentFeeState,
};
use crate::domain::money;
use crate::io::rest::mappers::amount_to_domain;

pub struct StudentFeeMapper;

impl StudentFeeMapper {
    pub fn installment_to_dto(domain: DomainFeeInstallment) -> FeeInstallment {
        FeeInstallment {
            index: domain.index,
            amount: money::to_f64(domain.amount),
            due_date: domain.due_date,
            paid: domain.paid,
            paid_at: domain.paid_at,
        }
    }

    /// Convert domain StudentFeeState to shared DTO
    pub fn to_dto(domain: DomainStudentFeeState) -> StudentFeeState {
        StudentFeeState {
            student_id: domain.student_id,
            class_id: domain.class_id,
            extra_fees: domain
                .extra_fees
                .into_iter()
                .map(|(name, amount)| (name, money::to_f64(amount)))
                .collect(),
            installments: domain
                .installments
                .into_iter()
                .map(Self::installment_to_dto)
                .collect(),
        }
    }

    /// Build the upsert command; every extra amount must be finite
    pub fn to_upsert_command(
        student_id: String,
        request: UpsertExtraFeesRequest,
    ) -> FeeResult<UpsertExtraFeesCommand> {
        let mut extra = BTreeMap::new();
        for (name, amount) in request.extra {
            let amount = amount_to_domain(&name, amount)?;
            extra.insert(name, amount);
        }

        Ok(UpsertExtraFeesCommand {
            student_id,
            class_id: request.class_id,
            extra,
        })
    }

    pub fn to_state_response(domain: DomainStudentFeeState) -> StudentFeeStateResponse {
        StudentFeeStateResponse {
            fee_state: Self::to_dto(domain),
        }
    }

    pub fn to_class_response(
        class_id: String,
        states: Vec<DomainStudentFeeState>,
    ) -> ClassStudentsFeeStatesResponse {
        ClassStudentsFeeStatesResponse {
            class_id,
            students: states.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_recompute_class_response(result: RecomputeClassResult) -> RecomputeClassResponse {
        RecomputeClassResponse {
            class_id: result.class_id,
            recomputed_count: result.recomputed_count,
        }
    }

    pub fn to_summary_dto(domain: DomainPaymentSummary) -> PaymentSummary {
        PaymentSummary {
            student_id: domain.student_id,
            total_amount: money::to_f64(domain.total_amount),
            paid_amount: money::to_f64(domain.paid_amount),
            outstanding_amount: money::to_f64(domain.outstanding_amount),
            paid_count: domain.paid_count,
            unpaid_count: domain.unpaid_count,
        }
    }
}
