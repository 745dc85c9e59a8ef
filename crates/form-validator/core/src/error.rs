// File: crates/form-validator/core/src/error.rs
// Purpose: Error taxonomy for controller construction and field lookups

use thiserror::Error;

/// Errors surfaced by the validator.
///
/// Validation failures themselves are not errors: they are reported as
/// `false` and as visual markers on the element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidatorError {
    /// The named form does not exist in the environment.
    #[error("Form '{0}' is not available in document")]
    FormNotFound(String),

    /// A field name passed to the controller is not tracked.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// A `data-same` reference points to a field that is not tracked.
    #[error("Field '{field}' must match unknown field '{target}'")]
    UnknownMatchField { field: String, target: String },
}

pub type Result<T> = std::result::Result<T, ValidatorError>;
