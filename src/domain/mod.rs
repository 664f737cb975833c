//! Domain types shared by the extractor, the rule engine and the reports.

pub mod audit;
pub mod issue;
pub mod signals;

pub use audit::{AuditResult, Bucket, Grade, ScoreBreakdown, ScoreCard};
pub use issue::{Issue, IssueCode, IssueKind, IssueWithResolution, Priority, ResolutionRecord};
pub use signals::{
    ContentStats, HeadingCounts, ImageStats, LinkStats, Metrics, PageSignals, Performance,
    SocialTags, TechnicalFlags, TextSignal,
};
