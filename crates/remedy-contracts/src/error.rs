//! Error types for the Remedy engine.
//!
//! Lookup operations never fail: unknown symptoms and medicine ids produce
//! empty results. Errors arise while building the engine, when a knowledge
//! document or engine configuration cannot be read, parsed, or violates a
//! table invariant. The demo also reports failures to encode output.

use thiserror::Error;

/// The unified error type for the Remedy crates.
#[derive(Debug, Error)]
pub enum RemedyError {
    /// A configuration or knowledge document could not be read or parsed.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// The knowledge tables parsed but break an invariant
    /// (duplicate ids, dangling references, out-of-range scores).
    #[error("invalid knowledge base: {reason}")]
    InvalidKnowledge { reason: String },

    /// A report could not be encoded for output.
    #[error("report serialization failed: {reason}")]
    Serialization { reason: String },
}

/// Convenience alias used throughout the Remedy crates.
pub type RemedyResult<T> = Result<T, RemedyError>;
