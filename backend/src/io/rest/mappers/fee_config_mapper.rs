use shared::{
    ClassFeeConfig, FeeConfigListResponse, GetClassFeeConfigResponse, SetClassFeeConfigRequest,
    SetClassFeeConfigResponse,
};

use crate::domain::commands::fee_config::{SetClassFeeConfigCommand, SetClassFeeConfigResult};
use crate::domain::error::FeeResult;
use crate::domain::models::ClassFeeConfig as DomainClassFeeConfig;
use crate::domain::money;
use crate::io::rest::mappers::amount_to_domain;

pub struct FeeConfigMapper;

impl FeeConfigMapper {
    /// Convert domain ClassFeeConfig to shared DTO
    pub fn to_dto(domain: DomainClassFeeConfig) -> ClassFeeConfig {
        ClassFeeConfig {
            id: domain.id,
            class_id: domain.class_id,
            base_fee_amount: money::to_f64(domain.base_fee_amount),
            num_installments: domain.num_installments,
            installment_dates: domain.installment_dates,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_set_command(
        class_id: String,
        request: SetClassFeeConfigRequest,
    ) -> FeeResult<SetClassFeeConfigCommand> {
        Ok(SetClassFeeConfigCommand {
            class_id,
            base_fee_amount: amount_to_domain("base_fee_amount", request.base_fee_amount)?,
            num_installments: request.num_installments,
        })
    }

    pub fn to_set_response(result: SetClassFeeConfigResult) -> SetClassFeeConfigResponse {
        SetClassFeeConfigResponse {
            fee_config: Self::to_dto(result.fee_config),
            success_message: result.success_message,
        }
    }

    pub fn to_get_response(domain: DomainClassFeeConfig) -> GetClassFeeConfigResponse {
        GetClassFeeConfigResponse {
            fee_config: Self::to_dto(domain),
        }
    }

    pub fn to_list_response(configs: Vec<DomainClassFeeConfig>) -> FeeConfigListResponse {
        FeeConfigListResponse {
            fee_configs: configs.into_iter().map(Self::to_dto).collect(),
        }
    }
}
