//! Live-page auditing over HTTP.

use async_trait::async_trait;

use super::{AuditEngine, Auditor, AUDIT_METHOD_HTTP};
use crate::config::HttpConfig;
use crate::domain::AuditResult;
use crate::error::Result;
use crate::extractor::SignalExtractor;
use crate::service::http::PageFetcher;

/// Fetches a page and runs it through the [`AuditEngine`].
///
/// Signals are extracted against the final (post-redirect) URL, so a site
/// that redirects to https gets credit for it. The result keeps the URL the
/// caller asked for.
pub struct HttpAuditor {
    fetcher: PageFetcher,
    engine: AuditEngine,
}

impl HttpAuditor {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self::with_fetcher(PageFetcher::new(config)?))
    }

    pub fn with_fetcher(fetcher: PageFetcher) -> Self {
        Self {
            fetcher,
            engine: AuditEngine::with_method(AUDIT_METHOD_HTTP),
        }
    }

    pub fn fetcher(&self) -> &PageFetcher {
        &self.fetcher
    }
}

#[async_trait]
impl Auditor for HttpAuditor {
    async fn analyze(&self, url: &str) -> Result<AuditResult> {
        let page = self.fetcher.fetch(url).await?;
        let signals = SignalExtractor::extract(&page.html, &page.final_url, page.load_time_ms);
        Ok(self.engine.audit_signals(url, signals))
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
