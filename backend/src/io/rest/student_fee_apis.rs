//! # REST API for Student Fees
//!
//! Extra-fee ledger, recomputation, payments and both schedule read paths.
//! `GET /students/:student_id/fees` returns the persisted schedule, which may
//! be stale; `GET /classes/:class_id/student-fees` is recomputed on every call.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use shared::{MarkInstallmentPaidRequest, UpsertExtraFeesRequest};
use tracing::{error, info};

use crate::domain::commands::student_fees::MarkInstallmentPaidCommand;
use crate::io::rest::fee_error_status;
use crate::io::rest::mappers::student_fee_mapper::StudentFeeMapper;
use crate::AppState;

/// Create a router for student fee APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/classes/:class_id/student-fees",
            get(get_class_students_fee_states),
        )
        .route(
            "/classes/:class_id/student-fees/recompute",
            post(recompute_class),
        )
        .route(
            "/students/:student_id/fees",
            get(get_student_fee_state).delete(remove_student_fee_state),
        )
        .route("/students/:student_id/fees/extra", put(upsert_extra_fees))
        .route(
            "/students/:student_id/fees/recompute",
            post(recompute_student_installments),
        )
        .route(
            "/students/:student_id/fees/installments/:index",
            put(mark_installment_paid),
        )
        .route("/students/:student_id/fees/summary", get(get_payment_summary))
}

/// Live schedules for every student of the class
pub async fn get_class_students_fee_states(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/classes/{}/student-fees", class_id);

    match state.projection_service.get_class_students_fee_states(&class_id) {
        Ok(states) => {
            let response = StudentFeeMapper::to_class_response(class_id, states);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to project class {}: {}", class_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn recompute_class(
    State(state): State<AppState>,
    Path(class_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/classes/{}/student-fees/recompute", class_id);

    match state.student_fee_service.recompute_class(&class_id) {
        Ok(result) => {
            let response = StudentFeeMapper::to_recompute_class_response(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to recompute class {}: {}", class_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Persisted state of one student, as of the last recompute
pub async fn get_student_fee_state(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/students/{}/fees", student_id);

    match state.projection_service.get_student_fee_state(&student_id) {
        Ok(Some(fee_state)) => {
            let response = StudentFeeMapper::to_state_response(fee_state);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("No fee state for student {}", student_id),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to get fee state for student {}: {}", student_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn remove_student_fee_state(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/students/{}/fees", student_id);

    match state.student_fee_service.remove_student_fee_state(&student_id) {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to remove fee state for student {}: {}", student_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

/// Merge extra fees; recompute afterwards when the request asks for it
pub async fn upsert_extra_fees(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
    Json(request): Json<UpsertExtraFeesRequest>,
) -> impl IntoResponse {
    info!("PUT /api/students/{}/fees/extra - request: {:?}", student_id, request);

    let recompute = request.recompute;
    let result = StudentFeeMapper::to_upsert_command(student_id, request).and_then(|command| {
        if recompute {
            state.student_fee_service.update_and_recompute(command)
        } else {
            state.student_fee_service.upsert_extra_fees(command)
        }
    });

    match result {
        Ok(fee_state) => {
            let response = StudentFeeMapper::to_state_response(fee_state);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to upsert extra fees: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn recompute_student_installments(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/students/{}/fees/recompute", student_id);

    match state.student_fee_service.recompute_installments(&student_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to recompute student {}: {}", student_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn mark_installment_paid(
    State(state): State<AppState>,
    Path((student_id, index)): Path<(String, u32)>,
    Json(request): Json<MarkInstallmentPaidRequest>,
) -> impl IntoResponse {
    info!(
        "PUT /api/students/{}/fees/installments/{} - request: {:?}",
        student_id, index, request
    );

    let command = MarkInstallmentPaidCommand {
        student_id,
        index,
        paid: request.paid,
    };

    match state.payment_service.mark_installment_paid(command) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to mark installment: {}", e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

pub async fn get_payment_summary(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/students/{}/fees/summary", student_id);

    match state.payment_service.payment_summary(&student_id) {
        Ok(Some(summary)) => {
            let response = StudentFeeMapper::to_summary_dto(summary);
            (StatusCode::OK, Json(response)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            format!("No fee state for student {}", student_id),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to summarize payments for {}: {}", student_id, e);
            (fee_error_status(&e), e.to_string()).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::fee_config::SetClassFeeConfigCommand;
    use crate::io::rest::test_support::{create_test_app_state, read_json};
    use rust_decimal::Decimal;
    use shared::{ClassStudentsFeeStatesResponse, RecomputeClassResponse, StudentFeeStateResponse};
    use std::collections::BTreeMap;

    fn configure(app_state: &AppState, base: Decimal, n: u32) {
        app_state
            .fee_config_service
            .set_class_fee_config(SetClassFeeConfigCommand {
                class_id: "class-7a".to_string(),
                base_fee_amount: base,
                num_installments: n,
            })
            .expect("Failed to configure class");
    }

    fn upsert_request(transport: f64, recompute: bool) -> UpsertExtraFeesRequest {
        let mut extra = BTreeMap::new();
        extra.insert("transport".to_string(), transport);
        UpsertExtraFeesRequest {
            class_id: "class-7a".to_string(),
            extra,
            recompute,
        }
    }

    fn amounts(state: &shared::StudentFeeState) -> Vec<f64> {
        state.installments.iter().map(|i| i.amount).collect()
    }

    #[tokio::test]
    async fn test_get_missing_student_state() {
        let app_state = create_test_app_state();

        let response = get_student_fee_state(State(app_state), Path("s-1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upsert_without_recompute() {
        let app_state = create_test_app_state();
        configure(&app_state, Decimal::from(1000), 3);

        let response = upsert_extra_fees(
            State(app_state),
            Path("s-1".to_string()),
            Json(upsert_request(200.0, false)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let body: StudentFeeStateResponse = read_json(response).await;
        assert_eq!(body.fee_state.extra_fees.get("transport"), Some(&200.0));
        assert!(body.fee_state.installments.is_empty());
    }

    #[tokio::test]
    async fn test_upsert_negative_is_bad_request() {
        let app_state = create_test_app_state();

        let response = upsert_extra_fees(
            State(app_state),
            Path("s-1".to_string()),
            Json(upsert_request(-1.0, true)),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_persisted_and_live_reads_diverge_until_recompute() {
        let app_state = create_test_app_state();
        configure(&app_state, Decimal::from(1000), 3);
        upsert_extra_fees(
            State(app_state.clone()),
            Path("s-1".to_string()),
            Json(upsert_request(200.0, true)),
        )
        .await;
        upsert_extra_fees(
            State(app_state.clone()),
            Path("s-1".to_string()),
            Json(upsert_request(250.0, false)),
        )
        .await;

        let response = get_student_fee_state(State(app_state.clone()), Path("s-1".to_string()))
            .await
            .into_response();
        let persisted: StudentFeeStateResponse = read_json(response).await;
        assert_eq!(amounts(&persisted.fee_state), vec![400.0, 400.0, 400.0]);

        let response =
            get_class_students_fee_states(State(app_state.clone()), Path("class-7a".to_string()))
                .await
                .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let live: ClassStudentsFeeStatesResponse = read_json(response).await;
        assert_eq!(live.students.len(), 2);
        assert_eq!(amounts(&live.students[0]), vec![416.66, 416.66, 416.68]);
        assert_eq!(amounts(&live.students[1]), vec![333.33, 333.33, 333.34]);

        let response =
            recompute_student_installments(State(app_state.clone()), Path("s-1".to_string()))
                .await
                .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get_student_fee_state(State(app_state), Path("s-1".to_string()))
            .await
            .into_response();
        let persisted: StudentFeeStateResponse = read_json(response).await;
        assert_eq!(amounts(&persisted.fee_state), vec![416.66, 416.66, 416.68]);
    }

    #[tokio::test]
    async fn test_recompute_without_config_is_no_content() {
        let app_state = create_test_app_state();

        let response = recompute_student_installments(State(app_state), Path("s-1".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_mark_paid_and_out_of_range() {
        let app_state = create_test_app_state();
        configure(&app_state, Decimal::from(900), 3);
        app_state
            .student_fee_service
            .recompute_installments("s-1")
            .unwrap();

        let response = mark_installment_paid(
            State(app_state.clone()),
            Path(("s-1".to_string(), 2)),
            Json(MarkInstallmentPaidRequest { paid: true }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = mark_installment_paid(
            State(app_state.clone()),
            Path(("s-1".to_string(), 9)),
            Json(MarkInstallmentPaidRequest { paid: true }),
        )
        .await
        .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get_student_fee_state(State(app_state), Path("s-1".to_string()))
            .await
            .into_response();
        let body: StudentFeeStateResponse = read_json(response).await;
        let paid: Vec<bool> = body.fee_state.installments.iter().map(|i| i.paid).collect();
        assert_eq!(paid, vec![false, true, false]);
        assert!(body.fee_state.installments[1].paid_at.is_some());
    }

    #[tokio::test]
    async fn test_recompute_class_and_remove() {
        let app_state = create_test_app_state();
        configure(&app_state, Decimal::from(600), 2);

        let response = recompute_class(State(app_state.clone()), Path("class-7a".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body: RecomputeClassResponse = read_json(response).await;
        assert_eq!(body.recomputed_count, 2);

        let response = remove_student_fee_state(State(app_state.clone()), Path("s-2".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = get_student_fee_state(State(app_state), Path("s-2".to_string()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_summary_missing_student() {
        let app_state = create_test_app_state();

        let response = get_payment_summary(State(app_state), Path("ghost".to_string()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
