//! Core error types

use thiserror::Error;

/// Errors surfaced by the playground core.
///
/// All variants except [`Error::UnknownAlgorithm`] are recoverable: the
/// session state machine guarantees no state changes when one is returned.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Algorithm identifier is not one of the supported algorithms.
    ///
    /// A well-formed host only offers the catalog's identifiers, so this
    /// indicates a programming error on the host side.
    #[error("unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    /// A parameter binding is missing or violates its schema constraint.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The active dataset is too small for the requested computation.
    #[error("insufficient data: need at least {required} samples, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Execution was requested with no active dataset for the context.
    #[error("no dataset available: upload a table or generate sample data")]
    NoDatasetAvailable,
}

impl Error {
    /// Shorthand for an [`Error::InvalidParameter`].
    pub(crate) fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
