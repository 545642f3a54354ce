//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Persistence happens through a single port, [`DocumentStore`], which reads
//! and writes the entire application document. The per-entity traits are
//! implemented by repositories that do a read-modify-write of that document
//! on every mutation.

use anyhow::Result;

use crate::domain::models::{ClassFeeConfig, LegacyClassFee, StudentFeeState, StudentRecord};
use crate::storage::document::AppDocument;

/// Persistence port for the whole application document.
///
/// Each call is atomic on its own, but nothing spans a read and the following
/// write: two callers doing read-modify-write concurrently race, and the last
/// full-document write wins.
pub trait DocumentStore: Send + Sync {
    /// Read the last-written document (an empty document if none exists yet)
    fn read_document(&self) -> Result<AppDocument>;

    /// Replace the stored document
    fn write_document(&self, document: &AppDocument) -> Result<()>;
}

/// Trait defining the interface for class fee config storage operations
pub trait FeeConfigStorage: Send + Sync {
    /// Create or replace the config for `config.class_id`
    fn store_fee_config(&self, config: &ClassFeeConfig) -> Result<()>;

    /// Retrieve the config for a class
    fn get_fee_config(&self, class_id: &str) -> Result<Option<ClassFeeConfig>>;

    /// List all class fee configs
    fn list_fee_configs(&self) -> Result<Vec<ClassFeeConfig>>;
}

/// Trait defining the interface for per-student fee state storage operations
pub trait StudentFeeStorage: Send + Sync {
    /// Create or replace the state for `state.student_id`
    fn store_student_fee_state(&self, state: &StudentFeeState) -> Result<()>;

    /// Retrieve a student's persisted fee state
    fn get_student_fee_state(&self, student_id: &str) -> Result<Option<StudentFeeState>>;

    /// Every persisted state, in one read of the document
    fn list_student_fee_states(&self) -> Result<Vec<StudentFeeState>>;

    /// Delete a student's fee state
    /// Returns true if a state was found and deleted
    fn delete_student_fee_state(&self, student_id: &str) -> Result<bool>;
}

/// Read-only view of the student directory
pub trait StudentDirectory: Send + Sync {
    fn get_student(&self, student_id: &str) -> Result<Option<StudentRecord>>;

    /// Students of a class in directory order
    fn list_students_in_class(&self, class_id: &str) -> Result<Vec<StudentRecord>>;
}

/// Trait defining the interface for legacy flat fee storage operations
pub trait LegacyFeeStorage: Send + Sync {
    fn store_legacy_fee(&self, fee: &LegacyClassFee) -> Result<()>;

    fn get_legacy_fee(&self, class_id: &str) -> Result<Option<LegacyClassFee>>;
}
