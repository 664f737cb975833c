//! Flat CSV export, one row per audited URL.

use std::io::Write;

use serde::Serialize;

use crate::domain::{AuditResult, IssueWithResolution};
use crate::error::Result;
use crate::extractor::SitemapEntry;
use crate::service::{BatchEntry, BatchReport};

const ISSUE_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditRow {
    pub url: String,
    pub status: &'static str,
    pub score: Option<u8>,
    pub grade: Option<&'static str>,
    pub on_page: Option<i32>,
    pub technical: Option<i32>,
    pub content: Option<i32>,
    pub images: Option<i32>,
    pub user_experience: Option<i32>,
    pub advanced: Option<i32>,
    pub issue_count: usize,
    pub word_count: Option<u32>,
    pub load_time_ms: Option<u64>,
    pub issues: String,
    pub error: String,
}

impl From<&AuditResult> for AuditRow {
    fn from(result: &AuditResult) -> Self {
        let b = &result.breakdown;
        Self {
            url: result.url.clone(),
            status: "success",
            score: Some(result.total_score),
            grade: Some(result.grade.as_str()),
            on_page: Some(b.on_page),
            technical: Some(b.technical),
            content: Some(b.content),
            images: Some(b.images),
            user_experience: Some(b.user_experience),
            advanced: Some(b.advanced),
            issue_count: result.issues.len(),
            word_count: Some(result.signals.content.word_count),
            load_time_ms: Some(result.signals.performance.load_time_ms),
            issues: issues_blob(&result.issues_with_resolutions),
            error: String::new(),
        }
    }
}

impl From<&BatchEntry> for AuditRow {
    fn from(entry: &BatchEntry) -> Self {
        match &entry.audit {
            Some(audit) => Self::from(audit),
            None => Self {
                url: entry.url.clone(),
                status: "error",
                error: entry.error.clone().unwrap_or_default(),
                ..Default::default()
            },
        }
    }
}

/// `issue [priority] solution` entries joined by ` | `.
pub fn issues_blob(issues: &[IssueWithResolution]) -> String {
    issues
        .iter()
        .map(|i| {
            format!(
                "{} [{}] {}",
                i.issue.kind, i.resolution.priority, i.resolution.solution
            )
        })
        .collect::<Vec<_>>()
        .join(ISSUE_SEPARATOR)
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_audits<W: Write>(writer: W, results: &[AuditResult]) -> Result<()> {
    write_rows(writer, results.iter().map(AuditRow::from))
}

pub fn write_batch<W: Write>(writer: W, report: &BatchReport) -> Result<()> {
    write_rows(writer, report.results.iter().map(AuditRow::from))
}

pub fn write_sitemap<W: Write>(writer: W, entries: &[SitemapEntry]) -> Result<()> {
    write_rows(writer, entries)
}
