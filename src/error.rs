//! Error types for index construction and queries.
//!
//! Every fallible library operation returns [`Result`]. The binary wraps these
//! in `anyhow` with additional context.

use thiserror::Error;

/// Broad category of an [`IndexError`], useful for callers that only care
/// whether a failure came from bad input, a bad index or a broken invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input unsuitable for building a structure
    Construction,
    /// Query index outside `[0, size)`
    Range,
    /// Empty pattern given to an occurrence query
    Pattern,
    /// Query parameter outside its accepted domain
    Argument,
    /// Internal consistency failure, never expected in practice
    Invariant,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    #[error("cannot build {0} from an empty sequence")]
    EmptyInput(&'static str),

    #[error("values at positions {position} and {} do not differ by exactly one", .position + 1)]
    NotPlusMinusOne { position: usize },

    #[error("indices ({i}, {j}) out of range [0, {size})")]
    OutOfRange { i: usize, j: usize, size: usize },

    #[error("pattern must contain at least one symbol")]
    EmptyPattern,

    #[error("minimum repetitions must be at least 2, got {0}")]
    TooFewRepetitions(usize),

    #[error("internal invariant violated: {0}")]
    Invariant(&'static str),
}

impl IndexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            IndexError::EmptyInput(_) | IndexError::NotPlusMinusOne { .. } => {
                ErrorKind::Construction
            }
            IndexError::OutOfRange { .. } => ErrorKind::Range,
            IndexError::EmptyPattern => ErrorKind::Pattern,
            IndexError::TooFewRepetitions(_) => ErrorKind::Argument,
            IndexError::Invariant(_) => ErrorKind::Invariant,
        }
    }
}

pub type Result<T> = std::result::Result<T, IndexError>;
