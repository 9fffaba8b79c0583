//! Pagination configuration injected into the query engine at construction.

use serde::Deserialize;

use crate::errors::ConfigError;

/// Page size used when a request does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Upper bound on the number of edges a single page may carry.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Page size limits for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Page size used when `first` is absent, zero or negative.
    pub default_page_size: u32,
    /// Hard cap applied to every requested page size.
    pub max_page_size: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    /// Build a validated configuration.
    pub fn new(default_page_size: u32, max_page_size: u32) -> Result<Self, ConfigError> {
        let config = Self {
            default_page_size,
            max_page_size,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that `1 <= default_page_size <= max_page_size`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(ConfigError::ZeroMaxPageSize);
        }
        if self.default_page_size == 0 || self.default_page_size > self.max_page_size {
            return Err(ConfigError::DefaultOutOfRange {
                default: self.default_page_size,
                max: self.max_page_size,
            });
        }
        Ok(())
    }

    /// Effective page length for a client-requested size.
    ///
    /// Absent, zero and negative requests fall back to `default_page_size`;
    /// everything else is capped at `max_page_size`. The result is always in
    /// `[1, max_page_size]` for a validated configuration.
    pub fn effective_limit(&self, requested: Option<i64>) -> usize {
        let max = self.max_page_size.max(1) as i64;
        let size = match requested {
            Some(n) if n > 0 => n.min(max),
            _ => (self.default_page_size as i64).clamp(1, max),
        };
        size as usize
    }
}
