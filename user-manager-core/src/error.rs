//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Core layer error type
///
/// A missing user is not an error at this layer: lookups return `Option`
/// and deletes return `bool`.
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Input or stored record fails field constraints
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// Backing storage could not be read or parsed
    #[error("Storage read error: {0}")]
    StorageRead(String),

    /// Backing storage could not be written
    #[error("Storage write error: {0}")]
    StorageWrite(String),
}

impl CoreError {
    /// Whether it is expected behavior (bad user input), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err)
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
