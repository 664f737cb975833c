use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use seo_audit::config::AppConfig;
use seo_audit::domain::ResolutionRecord;
use seo_audit::lifecycle;
use seo_audit::report::{self, ReportFormat};
use seo_audit::service::auditor::AUDIT_METHOD_FILE;
use seo_audit::service::{
    discover_sitemap, AuditEngine, Auditor, BatchRunner, HttpAuditor, PageFetcher,
    ResolutionCatalog, SitemapCrawler,
};

#[derive(Parser, Debug)]
#[command(
    name = "seo-audit",
    about = "Audit web pages for on-page SEO issues and get remediation guidance",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub output: OutputArgs,

    /// Override the request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Output format (defaults to the --output extension, then json)
    #[arg(long, value_enum, global = true)]
    pub format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,
}

impl OutputArgs {
    fn resolved_format(&self) -> ReportFormat {
        match (self.format, &self.output) {
            (Some(format), _) => format,
            (None, Some(path)) => ReportFormat::detect(path, ReportFormat::Json),
            (None, None) => ReportFormat::Json,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch and audit a single URL
    Audit {
        url: String,
    },
    /// Audit a saved HTML file as if it had been served from --url
    File {
        path: PathBuf,
        #[arg(long)]
        url: String,
        /// Load time to record for the page
        #[arg(long, default_value_t = 0)]
        load_time_ms: u64,
    },
    /// Audit several URLs, optionally taken from a sitemap
    Batch(BatchArgs),
    /// List the page URLs of a sitemap
    Crawl {
        /// Sitemap URL, or a site root with --discover
        url: String,
        /// Look for /sitemap.xml on the site's origin
        #[arg(long)]
        discover: bool,
    },
    /// Show remediation guidance for an issue text
    Resolve {
        issue: String,
    },
}

#[derive(Args, Debug, Default)]
pub struct BatchArgs {
    pub urls: Vec<String>,
    /// Add every URL listed in this sitemap
    #[arg(long)]
    pub sitemap: Option<String>,
    #[arg(long)]
    pub max_urls: Option<usize>,
    #[arg(long)]
    pub concurrency: Option<usize>,
    #[arg(long)]
    pub delay_ms: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolvedIssue<'a> {
    issue: &'a str,
    #[serde(flatten)]
    resolution: &'a ResolutionRecord,
}

pub async fn run(cli: Cli, mut config: AppConfig) -> Result<()> {
    if let Some(timeout) = cli.timeout_secs {
        config.http.timeout_secs = timeout;
    }
    let format = cli.output.resolved_format();
    let writer = || report::open_output(cli.output.output.as_deref());

    match cli.command {
        Command::Audit { url } => {
            let auditor = HttpAuditor::new(&config.http)?;
            let result = auditor
                .analyze(&url)
                .await
                .with_context(|| format!("audit of {url} failed"))?;
            report::write_audit(writer()?, format, &result)?;
        }
        Command::File {
            path,
            url,
            load_time_ms,
        } => {
            let html = std::fs::read_to_string(&path)
                .with_context(|| format!("unable to read {}", path.display()))?;
            let result =
                AuditEngine::with_method(AUDIT_METHOD_FILE).audit(&html, &url, load_time_ms);
            report::write_audit(writer()?, format, &result)?;
        }
        Command::Batch(args) => {
            let batch_config = {
                let mut batch = config.batch.clone();
                batch.max_urls = args.max_urls.unwrap_or(batch.max_urls);
                batch.concurrency = args.concurrency.unwrap_or(batch.concurrency).max(1);
                batch.delay_ms = args.delay_ms.unwrap_or(batch.delay_ms);
                batch
            };

            let fetcher = PageFetcher::new(&config.http)?;
            let mut urls = args.urls;
            if let Some(sitemap) = &args.sitemap {
                let crawler = SitemapCrawler::new(fetcher.clone(), config.sitemap.clone());
                let entries = crawler.crawl(sitemap).await?;
                urls.extend(entries.into_iter().map(|entry| entry.loc));
            }
            if urls.is_empty() {
                bail!("no URLs to audit: pass URLs or --sitemap");
            }

            let cancel = CancellationToken::new();
            let watcher = lifecycle::cancel_on_ctrl_c(cancel.clone());
            let runner = BatchRunner::new(Arc::new(HttpAuditor::with_fetcher(fetcher)), batch_config);
            let batch_report = runner.run(urls, &cancel).await;
            cancel.cancel();
            watcher.await.ok();

            report::write_batch(writer()?, format, &batch_report)?;
        }
        Command::Crawl { url, discover } => {
            let sitemap_url = if discover {
                discover_sitemap(&url)?.to_string()
            } else {
                url
            };
            let crawler = SitemapCrawler::new(PageFetcher::new(&config.http)?, config.sitemap);
            let entries = crawler.crawl(&sitemap_url).await?;
            report::write_sitemap(writer()?, format, &entries)?;
        }
        Command::Resolve { issue } => {
            let resolution = ResolutionCatalog::global().resolve_text(&issue);
            let resolved = ResolvedIssue {
                issue: &issue,
                resolution,
            };
            report::json::write_pretty(writer()?, &resolved)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_batch_with_overrides() {
        let cli = Cli::try_parse_from([
            "seo-audit",
            "batch",
            "https://a.test",
            "https://b.test",
            "--concurrency",
            "4",
            "--format",
            "csv",
        ])
        .unwrap();

        assert_eq!(cli.output.resolved_format(), ReportFormat::Csv);
        match cli.command {
            Command::Batch(args) => {
                assert_eq!(args.urls.len(), 2);
                assert_eq!(args.concurrency, Some(4));
                assert!(args.sitemap.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_output_extension_picks_format() {
        let cli =
            Cli::try_parse_from(["seo-audit", "crawl", "https://a.test/sitemap.xml", "-o", "urls.csv"])
                .unwrap();
        assert_eq!(cli.output.resolved_format(), ReportFormat::Csv);
    }

    #[test]
    fn test_file_requires_url() {
        assert!(Cli::try_parse_from(["seo-audit", "file", "page.html"]).is_err());
    }
}
