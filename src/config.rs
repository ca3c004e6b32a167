//! Configuration Module
//!
//! Handles loading cache configuration for host applications. The cache
//! itself never reads the environment; hosts build a `CacheConfig` and
//! pass its values to the constructor.

use std::env;

use crate::error::{CacheError, Result};

/// Environment variable holding the cache capacity
pub const MAX_SIZE_VAR: &str = "CACHE_MAX_SIZE";

/// Capacity used when nothing is configured
pub const DEFAULT_MAX_SIZE: usize = 10;

/// Cache configuration parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum accounted size the cache may hold
    pub max_size: usize,
}

impl CacheConfig {
    /// Creates a new CacheConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_SIZE` - Cache capacity (default: 10)
    ///
    /// A missing variable falls back to the default; one that does not parse
    /// is an error.
    pub fn from_env() -> Result<Self> {
        let max_size = match env::var(MAX_SIZE_VAR) {
            Ok(raw) => parse_max_size(&raw)?,
            Err(_) => DEFAULT_MAX_SIZE,
        };

        let config = Self { max_size };
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the cache cannot be built from.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidCapacity(self.max_size));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
        }
    }
}

fn parse_max_size(raw: &str) -> Result<usize> {
    raw.trim().parse().map_err(|_| {
        CacheError::InvalidConfig(format!(
            "{} must be a positive integer, got '{}'",
            MAX_SIZE_VAR, raw
        ))
    })
}
