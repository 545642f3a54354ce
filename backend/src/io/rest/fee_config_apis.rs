//! # REST API for Class Fee Configuration
//!
//! Endpoints for reading and writing a class's base fee, installment count
//! and due dates.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{SetClassFeeConfigRequest, SetInstallmentDatesRequest};
use tracing::{error, info};

use crate::domain::commands::fee_config::SetInstallmentDatesCommand;
use crate::io::rest::fee_error_status;
use crate::io::rest::mappers::fee_config_mapper::FeeConfigMapper;
use crate::AppState;

/// Create a router for fee configuration APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/classes/:class_id/fee-config",
            get(get_class_fee_config).put(set_class_fee_config),
        )
        .route("/classes/:class_id/fee-config/dates", put(set_installment_dates))
        .route("/fee-configs", get(list_class_fee_configs))
}

pub async fn get_class_fee_config(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/fee-config", class_id);

    match state.fee_config_service.get_class_fee_config(&class_id) {
        Ok(Some(config)) => {
            let response = FeeConfigMapper::to_get_response(config);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("No fee configuration for class {}", class_id),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get fee config for class {}: {}", class_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Create or update a class's fee configuration
pub async fn set_class_fee_config(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<SetClassFeeConfigRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{}/fee-config - request: {:?}", class_id, request);

    let result = FeeConfigMapper::to_set_command(class_id, request)
        .and_then(|command| state.fee_config_service.set_class_fee_config(command));

    match result {
        Ok(result) => {
            let response = FeeConfigMapper::to_set_response(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to set fee config: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Replace a class's due dates. A length mismatch or missing config is
/// ignored.
pub async fn set_installment_dates(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<SetInstallmentDatesRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{}/fee-config/dates - request: {:?}", class_id, request);

    let command = SetInstallmentDatesCommand {
        class_id,
        dates: request.dates,
    };

    match state.fee_config_service.set_installment_dates(command) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to set installment dates: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn list_class_fee_configs(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/fee-configs");

    match state.fee_config_service.list_class_fee_configs() {
        Ok(configs) => {
            let response = FeeConfigMapper::to_list_response(configs);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to list fee configs: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}
