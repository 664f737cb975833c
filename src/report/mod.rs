//! Output rendering for audits, batch runs and sitemap crawls.

pub mod csv;
pub mod json;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use clap::ValueEnum;

use crate::domain::AuditResult;
use crate::error::Result;
use crate::extractor::SitemapEntry;
use crate::service::BatchReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    #[default]
    Json,
    Csv,
}

impl ReportFormat {
    /// Guess from a file extension, falling back to `fallback`.
    pub fn detect(path: &Path, fallback: Self) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => fallback,
        }
    }
}

/// Stdout, or a freshly created file.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => Ok(Box::new(BufWriter::new(File::create(path)?))),
        None => Ok(Box::new(io::stdout().lock())),
    }
}

pub fn write_audit<W: Write>(writer: W, format: ReportFormat, result: &AuditResult) -> Result<()> {
    match format {
        ReportFormat::Json => json::write_pretty(writer, result),
        ReportFormat::Csv => self::csv::write_audits(writer, std::slice::from_ref(result)),
    }
}

pub fn write_batch<W: Write>(writer: W, format: ReportFormat, report: &BatchReport) -> Result<()> {
    match format {
        ReportFormat::Json => json::write_pretty(writer, report),
        ReportFormat::Csv => self::csv::write_batch(writer, report),
    }
}

pub fn write_sitemap<W: Write>(
    writer: W,
    format: ReportFormat,
    entries: &[SitemapEntry],
) -> Result<()> {
    match format {
        ReportFormat::Json => json::write_pretty(writer, entries),
        ReportFormat::Csv => self::csv::write_sitemap(writer, entries),
    }
}
