//! Error types for the shuffle argument crate.
//!
//! Constructive operations (key generation, commitment, encryption, proof
//! creation) return `Result<_, ShuffleError>`. Verification operations never
//! return an `Err` on well-formed input — an algebraic mismatch simply
//! yields `false`. See the crate-level docs for the full propagation policy.

use thiserror::Error;

/// Malformed byte encoding of a `Scalar` or `Point`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },

    #[error("bytes do not decode to a point on the curve")]
    NotOnCurve,
}

/// Top-level error type for the core library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShuffleError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("curve library initialization failed: {0}")]
    Runtime(String),
}

pub type Result<T> = std::result::Result<T, ShuffleError>;
