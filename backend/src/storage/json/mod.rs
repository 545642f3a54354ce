//! # JSON File Storage Module
//!
//! Stores the whole application document as one pretty-printed JSON file.
//!
//! ## Features
//!
//! - Missing or empty file reads as an empty document
//! - Atomic writes with a temp file and rename
//! - Unknown top-level entities are preserved on every write

pub mod connection;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonDocumentStore;
