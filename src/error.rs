//! Error types for the SEO auditor.
//!
//! Only the I/O facing layers (fetching, sitemap crawling, export, config)
//! can fail. Signal extraction, rule evaluation, scoring and resolution
//! lookup are total and return plain values.

use thiserror::Error;

// ============================================================================
// DOMAIN ERROR TYPE
// ============================================================================

/// Errors surfaced by fetch, crawl and export operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or malformed URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network request failed (timeout, DNS, TLS, connection reset...)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Sitemap document could not be fetched or parsed
    #[error("Sitemap error: {0}")]
    Sitemap(String),

    /// Invalid configuration value
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// CSV export failed
    #[error("Export error: {0}")]
    Export(#[from] csv::Error),
}

impl AppError {
    /// Create an invalid URL error
    pub fn invalid_url(msg: impl Into<String>) -> Self {
        Self::InvalidUrl(msg.into())
    }

    /// Create a sitemap error
    pub fn sitemap(msg: impl Into<String>) -> Self {
        Self::Sitemap(msg.into())
    }
}

/// Result type alias using AppError.
pub type Result<T> = std::result::Result<T, AppError>;
