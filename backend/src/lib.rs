//! # School Fees Backend
//!
//! Fee ledger and installment proration for a school administration system.
//!
//! - **Domain**: fee configuration, extra-fee ledger, proration, payments
//! - **Storage**: the whole-document persistence port and its backends
//! - **IO**: the REST API exposed under `/api`
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     ↓
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (services, proration engine)
//!     ↓
//! Storage Layer (repositories over one JSON document)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::{ServerConfig, StorageBackend};
use crate::domain::{
    CarryOverPolicy, FeeConfigService, LegacyFeeService, PaymentService, PositionalCarryOver,
    ProjectionService, StudentFeeService,
};
use crate::storage::{DocumentStore, JsonDocumentStore, MemoryDocumentStore};

const FRONTEND_ORIGIN: &str = "http://localhost:8080";

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub fee_config_service: FeeConfigService,
    pub student_fee_service: StudentFeeService,
    pub payment_service: PaymentService,
    pub projection_service: ProjectionService,
    pub legacy_fee_service: LegacyFeeService,
}

impl AppState {
    /// Wire every service to the same document store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let carry_over: Arc<dyn CarryOverPolicy> = Arc::new(PositionalCarryOver);

        Self {
            fee_config_service: FeeConfigService::new(store.clone()),
            student_fee_service: StudentFeeService::new(store.clone(), carry_over.clone()),
            payment_service: PaymentService::new(store.clone()),
            projection_service: ProjectionService::new(store.clone(), carry_over),
            legacy_fee_service: LegacyFeeService::new(store),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &ServerConfig) -> Result<AppState> {
    info!("Setting up document store ({:?})", config.storage);
    let store: Arc<dyn DocumentStore> = match config.storage {
        StorageBackend::Json => {
            let store = match &config.data_file {
                Some(path) => JsonDocumentStore::new(path)?,
                None => JsonDocumentStore::new_default()?,
            };
            info!("Using document file {}", store.path().display());
            Arc::new(store)
        }
        StorageBackend::Memory => Arc::new(MemoryDocumentStore::new()),
    };

    info!("Setting up domain services");
    Ok(AppState::new(store))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    // CORS setup to allow the frontend to make requests
    let cors = CorsLayer::new()
        .allow_origin(HeaderValue::from_static(FRONTEND_ORIGIN))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::router())
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_initialize_with_json_file() {
        let env = TestEnvironment::new().unwrap();
        let data_file = env.base_directory().join("fees").join("school_data.json");
        let config = ServerConfig {
            data_file: Some(data_file.clone()),
            ..ServerConfig::default()
        };

        let state = initialize_backend(&config).unwrap();
        state
            .legacy_fee_service
            .set_class_fee(domain::commands::legacy_fees::SetLegacyClassFeeCommand {
                class_id: "class-7a".to_string(),
                amount: rust_decimal::Decimal::from(300),
            })
            .unwrap();

        assert!(data_file.exists());
    }

    #[test]
    fn test_initialize_in_memory() {
        let config = ServerConfig {
            storage: StorageBackend::Memory,
            ..ServerConfig::default()
        };

        let state = initialize_backend(&config).unwrap();
        assert!(state.fee_config_service.list_class_fee_configs().unwrap().is_empty());
    }
}
