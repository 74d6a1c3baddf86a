//! Error types for registry configuration and mention combination.
//!
//! A cluster that loses its existence vote is not an error; see
//! [`ClusterOutcome::Rejected`](crate::ClusterOutcome::Rejected).

use thiserror::Error;

use crate::RecognizerId;

/// Errors that abort combination of a whole mention batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    /// The registry declares no recognizers at all.
    #[error("no recognizers are configured")]
    EmptyRecognizerSet,

    /// A batch entry or mention names a recognizer the registry does not know.
    #[error("unknown recognizer: {id}")]
    UnknownRecognizer { id: RecognizerId },

    /// A mention interval is empty, inverted, or runs past the document.
    #[error("invalid span [{start}, {end}) from {recognizer} in a document of {document_len} chars")]
    InvalidSpan {
        recognizer: RecognizerId,
        start: usize,
        end: usize,
        document_len: usize,
    },
}

/// Errors raised while building a [`CapabilityRegistry`](crate::CapabilityRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Configuration text could not be parsed.
    #[error("failed to parse recognizer configuration: {message}")]
    Parse { message: String },

    /// The same recognizer identity is declared more than once.
    #[error("recognizer declared twice: {id}")]
    DuplicateRecognizer { id: RecognizerId },
}

/// Result type for combination operations.
pub type CombineResult<T> = Result<T, CombineError>;
