//! On-page SEO auditing: signal extraction, a weighted rule table, score
//! aggregation and remediation lookup, plus the fetch, sitemap and batch
//! layers around them.

pub mod config;
pub mod domain;
pub mod error;
pub mod extractor;
pub mod lifecycle;
pub mod report;
pub mod service;
#[doc(hidden)]
pub mod test_utils;

pub use domain::{AuditResult, Grade, IssueKind, PageSignals, ResolutionRecord, ScoreCard};
pub use error::{AppError, Result};

use service::{AuditEngine, ResolutionCatalog, RuleEvaluation, RuleSet};

pub fn extract_signals(html: &str, url: &str, load_time_ms: u64) -> PageSignals {
    extractor::SignalExtractor::extract(html, url, load_time_ms)
}

pub fn evaluate_issues(signals: &PageSignals) -> RuleEvaluation {
    RuleSet::standard().evaluate(signals)
}

/// Never fails: unknown text gets the general resolution.
pub fn resolve_issue(issue_text: &str) -> &'static ResolutionRecord {
    ResolutionCatalog::global().resolve_text(issue_text)
}

pub fn compute_score(signals: &PageSignals) -> ScoreCard {
    service::scoring::compute_score(signals)
}

pub fn audit(html: &str, url: &str, load_time_ms: u64) -> AuditResult {
    AuditEngine::new().audit(html, url, load_time_ms)
}
