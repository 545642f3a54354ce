//! # IO Module
//!
//! Interface layer between HTTP clients and the fee domain. Requests arrive
//! as shared DTOs, are mapped to domain commands, and domain results and
//! errors are mapped back to JSON bodies and status codes.
//!
//! ## Current Implementation
//!
//! - **Web Framework**: Axum, with services injected through `AppState`
//! - **Serialization**: Serde JSON using the DTOs of the `shared` crate
//! - **Error Handling**: `FeeError` variants mapped to HTTP status codes

pub mod rest;
