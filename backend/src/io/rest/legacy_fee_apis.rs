//! # REST API for the Legacy Class Fee
//!
//! Flat per-class amount with a list of students who have paid it.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{SetLegacyClassFeeRequest, SetLegacyPaymentRequest};
use tracing::{error, info};

use crate::domain::commands::legacy_fees::SetLegacyPaymentCommand;
use crate::io::rest::fee_error_status;
use crate::io::rest::mappers::legacy_fee_mapper::LegacyFeeMapper;
use crate::AppState;

/// Create a router for legacy fee APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/classes/:class_id/legacy-fee",
            get(get_class_fee).put(set_class_fee),
        )
        .route(
            "/classes/:class_id/legacy-fee/payments/:student_id",
            put(set_student_paid),
        )
}

pub async fn get_class_fee(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/legacy-fee", class_id);

    match state.legacy_fee_service.get_class_fee(&class_id) {
        Ok(Some(fee)) => (StatusCode::OK, Json(LegacyFeeMapper::to_dto(fee))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("No class fee for class {}", class_id),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get class fee for {}: {}", class_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn set_class_fee(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
    Json(request): Json<SetLegacyClassFeeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/classes/{}/legacy-fee - request: {:?}", class_id, request);

    let result = LegacyFeeMapper::to_set_command(class_id, request)
        .and_then(|command| state.legacy_fee_service.set_class_fee(command));

    match result {
        Ok(fee) => (StatusCode::OK, Json(LegacyFeeMapper::to_dto(fee))).into_response(),
        Err(e) => {
            error!("Failed to set class fee: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn set_student_paid(
    State(state): State<AppState>,
    Path((class_id, student_id)): Path<(String, String)>,
    Json(request): Json<SetLegacyPaymentRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/classes/{}/legacy-fee/payments/{} - request: {:?}",
        class_id, student_id, request
    );

    let command = SetLegacyPaymentCommand {
        class_id,
        student_id,
        paid: request.paid,
    };

    match state.legacy_fee_service.set_student_paid(command) {
        Ok(fee) => (StatusCode::OK, Json(LegacyFeeMapper::to_dto(fee))).into_response(),
        Err(e) => {
            error!("Failed to set legacy payment: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::rest::test_support::{create_test_app_state, read_json};
    use shared::LegacyClassFee;

    #[tokio::test]
    async fn test_legacy_fee_flow() {
        let app_state = create_test_app_state();

        let response = get_class_fee(State(app_state.clone()), Path("class-7a".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = set_class_fee(
            State(app_state.clone()),
            Path("class-7a".to_string()),
            Json(SetLegacyClassFeeRequest { amount: 300.0 }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let response = set_student_paid(
            State(app_state.clone()),
            Path(("class-7a".to_string(), "s-1".to_string())),
            Json(SetLegacyPaymentRequest { paid: true }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body: LegacyClassFee = read_json(response).await;
        assert_eq!(body.amount, 300.0);
        assert_eq!(body.paid_student_ids, vec!["s-1"]);

        assert!(app_state
            .legacy_fee_service
            .is_student_paid("class-7a", "s-1")
            .unwrap());
    }

    #[tokio::test]
    async fn test_payment_without_fee_is_not_found() {
        let app_state = create_test_app_state();

        let response = set_student_paid(
            State(app_state),
            Path(("class-7a".to_string(), "s-1".to_string())),
            Json(SetLegacyPaymentRequest { paid: true }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
