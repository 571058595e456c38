//! Error types for normalizer construction and application.

use thiserror::Error;

/// Main error type for the normalization engine.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Regex pattern failed to compile
    #[error("Invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Literal replace pattern with no content
    #[error("Replace pattern must not be empty")]
    EmptyPattern,

    /// A step of a Sequence normalizer failed
    #[error("Sequence step {index} failed: {source}")]
    SequenceStepFailed {
        index: usize,
        #[source]
        source: Box<NormalizeError>,
    },

    /// Edit offset past the end of the normalized string
    #[error("Offset {offset} out of bounds (len {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    /// Edit range with start past end
    #[error("Invalid range {start}..{end}")]
    InvalidRange { start: usize, end: usize },

    /// Edit offset splitting a UTF-8 sequence
    #[error("Offset {offset} is not on a char boundary")]
    NotCharBoundary { offset: usize },
}

/// Result type alias for normalization operations.
pub type Result<T> = std::result::Result<T, NormalizeError>;
