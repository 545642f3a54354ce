//! # REST API Interface Layer
//!
//! HTTP endpoints for class fee configuration, student fee ledgers, payments
//! and the legacy flat class fee. Handlers translate shared DTOs into domain
//! commands through the mappers, call the services and translate `FeeError`
//! into HTTP status codes:
//!
//! - `InvalidConfiguration`, `IndexOutOfRange` → 400
//! - `NotFound` → 404
//! - `Storage` → 500
//!
//! Operations that the domain treats as silent no-ops answer `204 No Content`
//! whether or not anything changed.

pub mod fee_config_apis;
pub mod legacy_fee_apis;
pub mod mappers;
pub mod student_fee_apis;

use axum::http::StatusCode;
use axum::Router;

use crate::domain::FeeError;
use crate::AppState;

/// All fee routes, relative to the `/api` prefix
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(fee_config_apis::router())
        .merge(student_fee_apis::router())
        .merge(legacy_fee_apis::router())
}

pub fn fee_error_status(error: &FeeError) -> StatusCode {
    match error {
        FeeError::InvalidConfiguration(_) | FeeError::IndexOutOfRange { .. } => {
            StatusCode::BAD_REQUEST
        }
        FeeError::NotFound { .. } => StatusCode::NOT_FOUND,
        FeeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
