use shared::{LegacyClassFee, SetLegacyClassFeeRequest};

use crate::domain::commands::legacy_fees::SetLegacyClassFeeCommand;
use crate::domain::error::FeeResult;
use crate::domain::models::LegacyClassFee as DomainLegacyClassFee;
use crate::domain::money;
use crate::io::rest::mappers::amount_to_domain;

pub struct LegacyFeeMapper;

impl LegacyFeeMapper {
    pub fn to_dto(domain: DomainLegacyClassFee) -> LegacyClassFee {
        LegacyClassFee {
            id: domain.id,
            class_id: domain.class_id,
            amount: money::to_f64(domain.amount),
            paid_student_ids: domain.paid_student_ids,
        }
    }

    pub fn to_set_command(
        class_id: String,
        request: SetLegacyClassFeeRequest,
    ) -> FeeResult<SetLegacyClassFeeCommand> {
        Ok(SetLegacyClassFeeCommand {
            class_id,
            amount: amount_to_domain("amount", request.amount)?,
        })
    }
}
