//! Error types for rsc-comics.
//!
//! Decoding absorbs these internally: every public `decode*` entry point
//! reports aggregate emptiness rather than a propagated error. They surface
//! only through [`crate::try_decode`] and the lower-level helpers.

/// Error type for decoding operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A streamed fragment never resolved to a well-formed List or Object.
    #[error("Malformed chunk for block {0}")]
    MalformedChunk(String),

    /// The document carries no payload block usable for the requested intent.
    #[error("No payload block found for {0}")]
    MissingBlock(String),

    /// A fixed-path step found a node of the wrong shape (or none at all).
    #[error("Unexpected tree shape at {0}")]
    UnexpectedShape(&'static str),

    /// No known page layout matched the payload.
    #[error("Unrecognized page layout")]
    Unrecognized,

    /// A record was missing a mandatory field (id, title or cover).
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Result type alias for decoding operations.
pub type Result<T> = std::result::Result<T, Error>;
