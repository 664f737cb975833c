//! Multi-URL audits with bounded concurrency.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::Serialize;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::config::BatchConfig;
use crate::domain::AuditResult;
use crate::service::auditor::Auditor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchStatus {
    Success,
    Error,
}

/// Outcome for one URL of a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    pub url: String,
    pub status: BatchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<AuditResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchEntry {
    fn from_result(url: String, result: crate::error::Result<AuditResult>) -> Self {
        match result {
            Ok(audit) => Self {
                url,
                status: BatchStatus::Success,
                audit: Some(audit),
                error: None,
            },
            Err(err) => Self {
                url,
                status: BatchStatus::Error,
                audit: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == BatchStatus::Success
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub run_id: Uuid,
    /// One entry per processed URL, in input order.
    pub results: Vec<BatchEntry>,
    /// URLs submitted.
    pub total: usize,
    pub processed: usize,
    /// URLs dropped because of the batch size limit.
    pub skipped: usize,
    pub cancelled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl BatchReport {
    pub fn successes(&self) -> impl Iterator<Item = &AuditResult> {
        self.results.iter().filter_map(|entry| entry.audit.as_ref())
    }

    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|e| !e.is_success()).count()
    }
}

pub struct BatchRunner {
    auditor: Arc<dyn Auditor>,
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(auditor: Arc<dyn Auditor>, config: BatchConfig) -> Self {
        Self { auditor, config }
    }

    /// Audits up to `max_urls` URLs, `concurrency` at a time, pausing
    /// `delay_ms` between groups. A failing URL becomes an error entry.
    /// URLs not started when `cancel` fires are dropped from the report.
    pub async fn run(&self, urls: Vec<String>, cancel: &CancellationToken) -> BatchReport {
        let run_id = Uuid::new_v4();
        let total = urls.len();
        let limit = self.config.max_urls.min(total);
        let skipped = total - limit;
        let note = (skipped > 0).then(|| {
            format!(
                "Limited to first {} URLs for performance",
                self.config.max_urls
            )
        });

        tracing::info!(
            "[BATCH {}] Auditing {} of {} URLs with {} ({})",
            run_id,
            limit,
            total,
            self.auditor.name(),
            self.config
        );

        let mut results = Vec::with_capacity(limit);
        let mut cancelled = false;
        let group_size = self.config.concurrency.max(1);

        for (index, group) in urls[..limit].chunks(group_size).enumerate() {
            if index > 0 && self.config.delay_ms > 0 {
                tokio::select! {
                    _ = cancel.cancelled() => {}
                    _ = sleep(Duration::from_millis(self.config.delay_ms)) => {}
                }
            }
            if cancel.is_cancelled() {
                cancelled = true;
                tracing::warn!(
                    "[BATCH {}] Cancelled after {} of {} URLs",
                    run_id,
                    results.len(),
                    limit
                );
                break;
            }

            let audits = group.iter().map(|url| self.auditor.analyze(url));
            for (url, result) in group.iter().zip(join_all(audits).await) {
                if let Err(err) = &result {
                    tracing::warn!("[BATCH {}] {} failed: {}", run_id, url, err);
                }
                results.push(BatchEntry::from_result(url.clone(), result));
            }
            tracing::debug!("[BATCH {}] Processed {}/{}", run_id, results.len(), limit);
        }

        let report = BatchReport {
            run_id,
            processed: results.len(),
            results,
            total,
            skipped,
            cancelled,
            note,
        };
        tracing::info!(
            "[BATCH {}] Done: {} processed, {} failed, {} skipped",
            run_id,
            report.processed,
            report.failure_count(),
            report.skipped
        );
        report
    }
}
