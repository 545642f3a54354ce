//! Error kinds for fee operations.
//!
//! Most public fee operations absorb `NotFound` and `IndexOutOfRange` into a
//! logged no-op; the `try_*` service methods surface them.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Invalid fee configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Installment {index} not found for student {student_id} ({count} installments)")]
    IndexOutOfRange {
        student_id: String,
        index: u32,
        count: usize,
    },

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl FeeError {
    pub fn not_found(entity: &'static str, id: &str) -> Self {
        FeeError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Errors that the compatibility call surface turns into silent no-ops
    pub fn is_absorbable(&self) -> bool {
        !matches!(self, FeeError::Storage(_))
    }
}

pub type FeeResult<T> = std::result::Result<T, FeeError>;
