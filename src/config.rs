use std::env;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

const ENV_PREFIX: &str = "SEO_AUDIT_";

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; seo-audit/0.1)";

/// Top-level configuration for the auditor.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub batch: BatchConfig,
    pub sitemap: SitemapConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load from `.env` and `SEO_AUDIT_*` variables, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Build a config from an arbitrary key lookup (keys without prefix).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let http = HttpConfig {
            timeout_secs: parse_or(&lookup, "TIMEOUT_SECS", defaults.http.timeout_secs)?,
            max_redirects: parse_or(&lookup, "MAX_REDIRECTS", defaults.http.max_redirects)?,
            user_agent: lookup("USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        let batch = BatchConfig {
            max_urls: parse_or(&lookup, "MAX_URLS", defaults.batch.max_urls)?,
            concurrency: parse_or(&lookup, "CONCURRENCY", defaults.batch.concurrency)?,
            delay_ms: parse_or(&lookup, "DELAY_MS", defaults.batch.delay_ms)?,
        };
        if batch.concurrency == 0 {
            return Err(ConfigError::OutOfRange {
                key: "CONCURRENCY",
                reason: "must be at least 1",
            });
        }

        let sitemap = SitemapConfig {
            max_child_sitemaps: parse_or(
                &lookup,
                "SITEMAP_MAX_CHILDREN",
                defaults.sitemap.max_child_sitemaps,
            )?,
            max_urls: parse_or(&lookup, "SITEMAP_MAX_URLS", defaults.sitemap.max_urls)?,
            max_depth: parse_or(&lookup, "SITEMAP_MAX_DEPTH", defaults.sitemap.max_depth)?,
            ..defaults.sitemap
        };

        let telemetry = TelemetryConfig {
            log_level: lookup("LOG_LEVEL").unwrap_or(defaults.telemetry.log_level),
        };

        Ok(Self {
            http,
            batch,
            sitemap,
            telemetry,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        None => Ok(default),
    }
}

/// HTTP client settings for page and sitemap fetches.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 8,
            max_redirects: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Batch audit policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub max_urls: usize,
    pub concurrency: usize,
    pub delay_ms: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_urls: 10,
            concurrency: 2,
            delay_ms: 500,
        }
    }
}

/// Sitemap traversal limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapConfig {
    pub max_child_sitemaps: usize,
    pub max_urls: usize,
    pub max_depth: usize,
    pub jitter_min_ms: u64,
    pub jitter_max_ms: u64,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            max_child_sitemaps: 10,
            max_urls: 1000,
            max_depth: 2,
            jitter_min_ms: 200,
            jitter_max_ms: 500,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for SEO_AUDIT_{key}")]
    InvalidNumber { key: &'static str, value: String },
    #[error("SEO_AUDIT_{key} {reason}")]
    OutOfRange {
        key: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for BatchConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "max_urls={} concurrency={} delay={}ms",
            self.max_urls, self.concurrency, self.delay_ms
        )
    }
}
