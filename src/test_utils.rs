//! Shared test utilities and fixtures
//!
//! Used by the unit tests and by the integration tests under `tests/`.

pub mod fixtures {
    use crate::domain::{
        ContentStats, HeadingCounts, ImageStats, LinkStats, PageSignals, Performance, SocialTags,
        TechnicalFlags, TextSignal,
    };

    pub const OPTIMAL_TITLE: &str = "Rust SEO Audit Guide: Scores, Issues and Fixes";
    pub const OPTIMAL_DESCRIPTION: &str = "Learn how the auditor extracts page signals, weighs every rule, and turns each issue into concrete remediation steps for your website.";

    /// Signals that pass every rule.
    pub fn optimal_signals() -> PageSignals {
        PageSignals {
            title: TextSignal::new(OPTIMAL_TITLE),
            meta_description: TextSignal::new(OPTIMAL_DESCRIPTION),
            meta_keywords: String::new(),
            headings: HeadingCounts {
                h1: 1,
                h2: 3,
                h3: 2,
                h1_texts: vec!["SEO Audit Guide".into()],
                ..Default::default()
            },
            images: ImageStats {
                total: 4,
                without_alt: 0,
                optimizable: 0,
            },
            links: LinkStats {
                total: 12,
                internal: 8,
                external: 4,
            },
            technical: TechnicalFlags {
                https: true,
                charset: true,
                viewport: true,
                canonical: true,
                favicon: true,
                language: true,
                schema: true,
                noindex: false,
            },
            content: ContentStats { word_count: 400 },
            social: SocialTags {
                og_title: true,
                og_description: true,
                og_image: true,
                twitter_card: true,
            },
            performance: Performance {
                load_time_ms: 1200,
            },
            schema_types: vec!["Organization".into()],
        }
    }

    /// A page that extracts to signals passing every rule when served over https.
    pub fn well_optimized_html() -> String {
        let body_text = "Search engines reward pages that explain one topic clearly. ".repeat(40);
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{OPTIMAL_TITLE}</title>
  <meta name="description" content="{OPTIMAL_DESCRIPTION}">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <link rel="canonical" href="https://example.com/guide">
  <link rel="icon" href="/favicon.ico">
  <meta property="og:title" content="SEO Audit Guide">
  <meta property="og:description" content="Scores, issues and fixes">
  <meta property="og:image" content="https://example.com/og.webp">
  <meta name="twitter:card" content="summary_large_image">
  <script type="application/ld+json">{{"@context": "https://schema.org", "@type": "Article"}}</script>
</head>
<body>
  <nav><a href="/">Home</a> <a href="/guide">Guide</a> <a href="https://docs.rs/">Docs</a></nav>
  <h1>SEO Audit Guide</h1>
  <h2>Why it matters</h2>
  <p>{body_text}</p>
  <img src="/img/chart.webp" alt="Score distribution chart">
</body>
</html>"#
        )
    }

    /// No head tags, no headings, no links, no content.
    pub fn empty_page_html() -> &'static str {
        "<html><head></head><body></body></html>"
    }

    pub fn urlset_xml(locs: &[&str]) -> String {
        let entries: String = locs
            .iter()
            .map(|loc| format!("  <url><loc>{loc}</loc><changefreq>weekly</changefreq></url>\n"))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</urlset>"
        )
    }

    pub fn sitemap_index_xml(children: &[&str]) -> String {
        let entries: String = children
            .iter()
            .map(|loc| format!("  <sitemap><loc>{loc}</loc></sitemap>\n"))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<sitemapindex xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n{entries}</sitemapindex>"
        )
    }
}

/// Helper assertions for tests
pub mod assertions {
    use crate::domain::{Issue, IssueCode};

    pub fn has_issue(issues: &[Issue], code: IssueCode) -> bool {
        issues.iter().any(|i| i.kind.code() == code)
    }

    pub fn issue_impact(issues: &[Issue], code: IssueCode) -> Option<u32> {
        issues
            .iter()
            .find(|i| i.kind.code() == code)
            .map(|i| i.score_impact)
    }

    /// Asserts that the issues contain `code`, optionally with a given deduction
    #[macro_export]
    macro_rules! assert_has_issue {
        ($issues:expr, $code:expr) => {
            assert!(
                $crate::test_utils::assertions::has_issue(&$issues, $code),
                "Expected to find issue {:?} but it was not present",
                $code
            );
        };
        ($issues:expr, $code:expr, $impact:expr) => {
            assert_eq!(
                $crate::test_utils::assertions::issue_impact(&$issues, $code),
                Some($impact),
                "Expected issue {:?} with impact {}",
                $code,
                $impact
            );
        };
    }

    /// Asserts that the issues do NOT contain `code`
    #[macro_export]
    macro_rules! assert_no_issue {
        ($issues:expr, $code:expr) => {
            assert!(
                !$crate::test_utils::assertions::has_issue(&$issues, $code),
                "Expected NOT to find issue {:?} but it was present",
                $code
            );
        };
    }
}
