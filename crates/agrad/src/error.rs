//! Error types for agrad.

use thiserror::Error;

/// Errors that can occur in differentiation drivers and AD-compatible primitives.
#[derive(Debug, Error)]
pub enum AdError {
    /// Operand sizes disagree (inner matrix dimensions, vector lengths).
    #[error("{op}: size mismatch: expected {expected}, got {actual}")]
    SizeMismatch {
        op: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Operation needs at least one element.
    #[error("{op}: argument must not be empty")]
    EmptyArgument { op: &'static str },

    /// A variable recorded on a different tape was passed to a tape operation.
    #[error("{op}: variable does not belong to this tape")]
    ForeignVariable { op: &'static str },

    /// The accelerated backend reported a failure.
    #[error("{op}: backend failure: {source}")]
    Backend {
        op: &'static str,
        #[source]
        source: BackendError,
    },
}

/// Failures reported by a matrix-multiply backend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BackendError {
    /// Kernel launch configuration is invalid for the device.
    #[error("invalid launch configuration: {message}")]
    InvalidLaunch { message: String },

    /// The backend is not compiled into this build.
    #[error("backend `{name}` is not available in this build")]
    Unsupported { name: &'static str },
}

impl AdError {
    /// Shorthand for [`AdError::SizeMismatch`].
    pub(crate) fn size_mismatch(op: &'static str, expected: usize, actual: usize) -> Self {
        Self::SizeMismatch {
            op,
            expected,
            actual,
        }
    }
}
