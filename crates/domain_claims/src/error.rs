//! Claims domain errors

use thiserror::Error;

use core_kernel::CoreError;

/// Errors that can occur in the claims intake domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("No cost reference found for the provided damage assessments")]
    NoCostReference,

    #[error("{0}")]
    Validation(String),

    #[error(
        "Inconsistent cost reference for {damage_type}/{severity}: base_cost {base_cost} != parts_cost {parts_cost} + labor"
    )]
    InconsistentReference {
        damage_type: String,
        severity: String,
        base_cost: i64,
        parts_cost: i64,
    },

    #[error("Duplicate cost reference for {damage_type}/{severity}")]
    DuplicateReference { damage_type: String, severity: String },

    #[error("Unknown cost reference entry: {0}")]
    UnknownReference(String),
}

impl ClaimError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClaimError::Validation(message.into())
    }

    /// Returns true for the not-found class (no priced rows matched)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClaimError::NoCostReference)
    }

    /// Returns true for caller input errors
    pub fn is_validation(&self) -> bool {
        matches!(self, ClaimError::Validation(_))
    }
}

impl From<ClaimError> for CoreError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::NoCostReference => CoreError::NotFound(err.to_string()),
            ClaimError::Validation(msg) => CoreError::Validation(msg),
            other => CoreError::Configuration(other.to_string()),
        }
    }
}
