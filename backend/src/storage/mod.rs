//! # Storage Module
//!
//! Handles all data persistence for the fee subsystem.
//!
//! The whole application state lives in one document ([`AppDocument`]) that is
//! read and written as a unit through the [`DocumentStore`] port. Repositories
//! expose per-entity operations on top of that port so the domain layer never
//! touches the document directly.
//!
//! ## Backends
//!
//! - **JSON file** ([`JsonDocumentStore`]): the default for the server
//! - **In memory** ([`MemoryDocumentStore`]): tests and throwaway runs
//!
//! ## Concurrency
//!
//! Every repository mutation is read-modify-write of the full document with no
//! lock held across the two steps. Concurrent writers race and the last
//! full-document write wins, including over unrelated entities.

pub mod document;
pub mod json;
pub mod memory;
pub mod repositories;
pub mod traits;

pub use document::AppDocument;
pub use json::JsonDocumentStore;
pub use memory::MemoryDocumentStore;
pub use repositories::{
    DocumentStudentDirectory, FeeConfigRepository, LegacyFeeRepository, StudentFeeRepository,
};
pub use traits::{
    DocumentStore, FeeConfigStorage, LegacyFeeStorage, StudentDirectory, StudentFeeStorage,
};
