//! Error types for syntax-vae

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the decoder, encoder and sequence utilities.
///
/// Every failure is raised synchronously at the call that caused it. None
/// of them are retryable: the caller has to fix the configuration or the
/// input tensors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The recurrent cell name is neither `lstm` nor `gru`
    #[error("Unsupported RNN cell: {0}")]
    UnsupportedRnnCell(String),

    /// A tensor does not have the shape the module was configured for
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        context: &'static str,
        expected: String,
        actual: String,
    },

    /// Reduction axis outside the tensor rank
    #[error("Invalid axis {axis} for a tensor of rank {rank}")]
    InvalidAxis { axis: usize, rank: usize },

    /// Operation only exists on concrete recurrent networks
    #[error("{0} is not implemented for the base recurrent network")]
    NotImplemented(&'static str),

    /// A token id falls outside `0..vocab_size`
    #[error("Token id {token} out of range for a vocabulary of {vocab_size}")]
    TokenOutOfRange { token: i64, vocab_size: usize },

    /// A configuration value no module can be built from
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn shape_mismatch(
        context: &'static str,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::ShapeMismatch {
            context,
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}
