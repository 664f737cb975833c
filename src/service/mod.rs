pub mod auditor;
pub mod batch;
pub mod catalog;
pub mod crawler;
pub mod http;
pub mod rules;
pub mod scoring;

pub use auditor::{AuditEngine, Auditor, HttpAuditor};
pub use batch::{BatchEntry, BatchReport, BatchRunner, BatchStatus};
pub use catalog::ResolutionCatalog;
pub use crawler::{discover_sitemap, SitemapCrawler};
pub use http::{create_client, FetchedPage, PageFetcher};
pub use rules::{RuleEvaluation, RuleSet, Verdict};
pub use scoring::compute_score;
