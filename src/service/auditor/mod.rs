//! Audit strategies.
//!
//! [`AuditEngine`] is the pure composite (extract, evaluate, score, resolve)
//! every entry point goes through. [`HttpAuditor`] fetches a live page and
//! hands it to the engine. Both the batch runner and the CLI depend only on
//! the [`Auditor`] trait.

mod engine;
mod remote;

pub use engine::{AuditEngine, AUDIT_METHOD_FILE, AUDIT_METHOD_HTTP, AUDIT_METHOD_MARKUP};
pub use remote::HttpAuditor;

use async_trait::async_trait;

use crate::domain::AuditResult;
use crate::error::Result;

/// Strategy trait for URL auditing.
#[async_trait]
pub trait Auditor: Send + Sync {
    /// Analyze a single URL and return audit results.
    async fn analyze(&self, url: &str) -> Result<AuditResult>;

    /// Analyze multiple URLs sequentially.
    /// Default implementation calls `analyze` for each URL.
    async fn analyze_urls(&self, urls: &[String]) -> Vec<Result<AuditResult>> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            results.push(self.analyze(url).await);
        }
        results
    }

    /// Human-readable name for this auditor.
    fn name(&self) -> &'static str;
}
