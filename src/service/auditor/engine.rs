use chrono::Utc;

use crate::domain::{AuditResult, PageSignals};
use crate::extractor::SignalExtractor;
use crate::service::catalog::ResolutionCatalog;
use crate::service::rules::RuleSet;
use crate::service::scoring::score_outcomes;

/// Markup handed to the engine directly, e.g. through [`crate::audit`].
pub const AUDIT_METHOD_MARKUP: &str = "markup";
pub const AUDIT_METHOD_HTTP: &str = "http";
pub const AUDIT_METHOD_FILE: &str = "file";

/// Turns markup into an [`AuditResult`]. Holds no mutable state, so one
/// engine can be shared by any number of concurrent audits.
#[derive(Clone, Copy)]
pub struct AuditEngine {
    rules: RuleSet,
    catalog: &'static ResolutionCatalog,
    method: &'static str,
}

impl AuditEngine {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::standard(),
            catalog: ResolutionCatalog::global(),
            method: AUDIT_METHOD_MARKUP,
        }
    }

    /// Engine whose results report `method` as their `auditMethod`.
    pub fn with_method(method: &'static str) -> Self {
        Self {
            method,
            ..Self::new()
        }
    }

    pub fn audit(&self, html: &str, url: &str, load_time_ms: u64) -> AuditResult {
        let signals = SignalExtractor::extract(html, url, load_time_ms);
        self.audit_signals(url, signals)
    }

    /// Scores signals that were already extracted (or deserialized).
    pub fn audit_signals(&self, url: &str, signals: PageSignals) -> AuditResult {
        let outcomes = self.rules.outcomes(&signals);
        let card = score_outcomes(&signals, &outcomes);
        let evaluation = RuleSet::collect_issues(&outcomes);
        let issues_with_resolutions = self.catalog.attach(&evaluation.issues);

        tracing::debug!(
            "Audited {}: score {} ({}), {} issues",
            url,
            card.total_score,
            card.grade,
            evaluation.issues.len()
        );

        AuditResult {
            url: url.to_string(),
            total_score: card.total_score,
            grade: card.grade,
            breakdown: card.breakdown,
            issues: evaluation.issues,
            issues_with_resolutions,
            signals,
            timestamp: Utc::now(),
            audit_method: self.method,
        }
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}
