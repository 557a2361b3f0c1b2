//! Domain errors.
//!
//! Library functions return `anyhow::Result`; these variants are the failures
//! callers may want to tell apart (`err.downcast_ref::<CaseError>()`).

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaseError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unable to find patch {0}")]
    PatchNotFound(String),

    #[error("unable to find cell zone {0}")]
    ZoneNotFound(String),

    #[error("field {field} not found at time {time}")]
    FieldNotFound { field: String, time: String },

    #[error("field {field} is a {found}, expected a {expected}")]
    FieldKind {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("{what}: expected {expected} values, got {found}")]
    SizeMismatch {
        what: String,
        expected: usize,
        found: usize,
    },

    #[error("invalid mesh: {0}")]
    InvalidMesh(String),
}

/// Returns the `CaseError` carried by an `anyhow::Error`, if any.
pub fn case_error(err: &anyhow::Error) -> Option<&CaseError> {
    err.downcast_ref::<CaseError>()
}
