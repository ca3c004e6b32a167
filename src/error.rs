//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
///
/// Lookup misses are not errors; `get` and `remove` report them as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Capacity must be greater than zero
    #[error("Invalid capacity: {0} (must be greater than 0)")]
    InvalidCapacity(usize),

    /// Argument rejected before any mutation took place
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
