use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use url::Url;

use crate::domain::{
    ContentStats, HeadingCounts, ImageStats, LinkStats, PageSignals, Performance, SocialTags,
    TechnicalFlags, TextSignal,
};

/// Sentinel `@type` recorded for JSON-LD blocks that fail to parse.
pub const INVALID_SCHEMA: &str = "Invalid";
/// Sentinel `@type` recorded for JSON-LD blocks without a type.
pub const UNKNOWN_SCHEMA: &str = "Unknown";

macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse($css).expect(concat!("invalid selector: ", $css)))
    }};
}

fn optimizable_image_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?i)\.(?:jpe?g|png)").expect("invalid image pattern"))
}

/// Turns fetched markup into a [`PageSignals`] record.
///
/// Never fails: anything missing from the document becomes an empty string,
/// a zero count or a `false` flag.
pub struct SignalExtractor;

impl SignalExtractor {
    pub fn extract(html: &str, source_url: &str, load_time_ms: u64) -> PageSignals {
        let document = Html::parse_document(html);
        Self::extract_from_document(&document, source_url, load_time_ms)
    }

    pub fn extract_from_document(
        document: &Html,
        source_url: &str,
        load_time_ms: u64,
    ) -> PageSignals {
        let parsed_url = Url::parse(source_url).ok();
        let hostname = parsed_url
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or_default();

        let schema_types = Self::extract_schema_types(document);

        PageSignals {
            title: Self::extract_title(document),
            meta_description: TextSignal::new(Self::meta_content(
                document,
                selector!("meta[name='description']"),
            )),
            meta_keywords: Self::meta_content(document, selector!("meta[name='keywords']")),
            headings: Self::count_headings(document),
            images: Self::analyze_images(document),
            links: Self::count_links(document, hostname),
            technical: TechnicalFlags {
                https: parsed_url.as_ref().is_some_and(|u| u.scheme() == "https"),
                charset: Self::has_attr(document, selector!("meta[charset]"), "charset"),
                viewport: Self::meta_content(document, selector!("meta[name='viewport']"))
                    .contains("width=device-width"),
                canonical: Self::has_attr(document, selector!("link[rel='canonical']"), "href"),
                favicon: document
                    .select(selector!(
                        "link[rel='icon'], link[rel='shortcut icon'], link[rel='apple-touch-icon']"
                    ))
                    .next()
                    .is_some(),
                language: Self::has_attr(document, selector!("html"), "lang"),
                schema: !schema_types.is_empty(),
                noindex: Self::meta_content(document, selector!("meta[name='robots']"))
                    .to_ascii_lowercase()
                    .contains("noindex"),
            },
            content: ContentStats {
                word_count: Self::count_words(document),
            },
            social: SocialTags {
                og_title: !Self::meta_content(document, selector!("meta[property='og:title']"))
                    .is_empty(),
                og_description: !Self::meta_content(
                    document,
                    selector!("meta[property='og:description']"),
                )
                .is_empty(),
                og_image: !Self::meta_content(document, selector!("meta[property='og:image']"))
                    .is_empty(),
                twitter_card: !Self::meta_content(document, selector!("meta[name='twitter:card']"))
                    .is_empty(),
            },
            performance: Performance { load_time_ms },
            schema_types,
        }
    }

    fn extract_title(document: &Html) -> TextSignal {
        document
            .select(selector!("title"))
            .next()
            .map(|el| TextSignal::new(el.text().collect::<String>()))
            .unwrap_or_default()
    }

    /// Trimmed `content` attribute of the first match, or an empty string.
    fn meta_content(document: &Html, selector: &Selector) -> String {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }

    fn has_attr(document: &Html, selector: &Selector, attr: &str) -> bool {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr(attr))
            .is_some_and(|value| !value.trim().is_empty())
    }

    fn count_headings(document: &Html) -> HeadingCounts {
        let count = |selector: &Selector| document.select(selector).count() as u32;

        HeadingCounts {
            h1: count(selector!("h1")),
            h2: count(selector!("h2")),
            h3: count(selector!("h3")),
            h4: count(selector!("h4")),
            h5: count(selector!("h5")),
            h6: count(selector!("h6")),
            h1_texts: document
                .select(selector!("h1"))
                .map(|el| el.text().collect::<String>().trim().to_string())
                .collect(),
        }
    }

    fn analyze_images(document: &Html) -> ImageStats {
        let mut stats = ImageStats::default();

        for img in document.select(selector!("img")) {
            stats.total += 1;

            let alt = img.value().attr("alt");
            if alt.map_or(true, |a| a.trim().is_empty()) {
                stats.without_alt += 1;
            }

            let src = img.value().attr("src").unwrap_or_default();
            if optimizable_image_pattern().is_match(src) && !src.contains(".webp") {
                stats.optimizable += 1;
            }
        }

        stats
    }

    /// Internal: href starts with `/` or mentions the page's hostname.
    /// External: everything else except fragment, `mailto:` and `tel:` hrefs.
    fn count_links(document: &Html, hostname: &str) -> LinkStats {
        let mut stats = LinkStats::default();

        for anchor in document.select(selector!("a[href]")) {
            stats.total += 1;
            let href = anchor.value().attr("href").unwrap_or_default().trim();

            let is_internal =
                href.starts_with('/') || (!hostname.is_empty() && href.contains(hostname));
            if is_internal {
                stats.internal += 1;
            } else if !(href.starts_with('#')
                || href.starts_with("mailto:")
                || href.starts_with("tel:"))
            {
                stats.external += 1;
            }
        }

        stats
    }

    fn count_words(document: &Html) -> u32 {
        document
            .select(selector!("body"))
            .next()
            .map(|body| body.text().collect::<String>().split_whitespace().count() as u32)
            .unwrap_or(0)
    }

    fn extract_schema_types(document: &Html) -> Vec<String> {
        document
            .select(selector!("script[type='application/ld+json']"))
            .flat_map(|script| Self::schema_block_types(&script))
            .collect()
    }

    fn schema_block_types(script: &ElementRef<'_>) -> Vec<String> {
        let raw = script.text().collect::<String>();
        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(items)) if !items.is_empty() => {
                items.iter().flat_map(Self::type_of).collect()
            }
            Ok(value) => Self::type_of(&value),
            Err(err) => {
                tracing::debug!("Skipping invalid JSON-LD block: {}", err);
                vec![INVALID_SCHEMA.to_string()]
            }
        }
    }

    fn type_of(value: &Value) -> Vec<String> {
        let types: Vec<String> = match value.get("@type") {
            Some(Value::String(t)) => vec![t.clone()],
            Some(Value::Array(ts)) => ts
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        if types.is_empty() {
            vec![UNKNOWN_SCHEMA.to_string()]
        } else {
            types
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "https://example.com/blog/post";

    #[test]
    fn test_extract_basic_head_signals() {
        let html = r#"<html lang="en"><head>
            <meta charset="utf-8">
            <title>  A Reasonably Descriptive Page Title Here  </title>
            <meta name="description" content="Short description">
            <meta name="viewport" content="width=device-width, initial-scale=1">
            <link rel="canonical" href="https://example.com/blog/post">
            <link rel="shortcut icon" href="/favicon.ico">
        </head><body></body></html>"#;

        let signals = SignalExtractor::extract(html, URL, 120);

        assert_eq!(signals.title.content, "A Reasonably Descriptive Page Title Here");
        assert_eq!(signals.title.length, 40);
        assert!(signals.meta_description.present);
        assert_eq!(signals.meta_description.length, 17);
        assert!(signals.technical.https);
        assert!(signals.technical.charset);
        assert!(signals.technical.viewport);
        assert!(signals.technical.canonical);
        assert!(signals.technical.favicon);
        assert!(signals.technical.language);
        assert_eq!(signals.performance.load_time_ms, 120);
    }

    #[test]
    fn test_malformed_html_yields_defaults() {
        let signals = SignalExtractor::extract("<div><p>unclosed <b>tags", "not a url", 0);

        assert!(!signals.title.present);
        assert_eq!(signals.title.length, 0);
        assert!(!signals.meta_description.present);
        assert_eq!(signals.headings.h1, 0);
        assert_eq!(signals.images.total, 0);
        assert_eq!(signals.links.total, 0);
        assert!(!signals.technical.https);
        assert!(!signals.technical.schema);
        assert_eq!(signals.content.word_count, 2);
        assert!(signals.is_consistent());
    }

    #[test]
    fn test_viewport_requires_device_width() {
        let html = r#"<head><meta name="viewport" content="initial-scale=1"></head>"#;
        assert!(!SignalExtractor::extract(html, URL, 0).technical.viewport);
    }

    #[test]
    fn test_heading_counts() {
        let html = "<body><h1>One</h1><h1>Two</h1><h2>a</h2><h3>b</h3><h3>c</h3><h6>d</h6></body>";
        let headings = SignalExtractor::extract(html, URL, 0).headings;

        assert_eq!(headings.h1, 2);
        assert_eq!(headings.h2, 1);
        assert_eq!(headings.h3, 2);
        assert_eq!(headings.h4, 0);
        assert_eq!(headings.h6, 1);
        assert_eq!(headings.h1_texts, vec!["One", "Two"]);
    }

    #[test]
    fn test_image_alt_and_format_counts() {
        let html = r#"<body>
            <img src="/a.jpg" alt="described">
            <img src="/b.PNG">
            <img src="/c.webp" alt="">
            <img src="/d.jpeg.webp" alt="fallback chain">
            <img>
        </body>"#;
        let images = SignalExtractor::extract(html, URL, 0).images;

        assert_eq!(images.total, 5);
        assert_eq!(images.without_alt, 3);
        assert_eq!(images.optimizable, 2);
    }

    #[test]
    fn test_link_classification() {
        let html = r##"<body>
            <a href="/about">About</a>
            <a href="https://example.com/contact">Contact</a>
            <a href="https://other.org/">Other</a>
            <a href="#top">Top</a>
            <a href="mailto:hi@example.org">Mail</a>
            <a href="tel:+123">Call</a>
            <a>No href</a>
        </body>"##;
        let links = SignalExtractor::extract(html, URL, 0).links;

        assert_eq!(links.total, 6);
        assert_eq!(links.internal, 2);
        assert_eq!(links.external, 1);
    }

    #[test]
    fn test_unparsable_source_url_only_counts_root_relative_links() {
        let html = r#"<body><a href="/x">x</a><a href="https://example.com/">y</a></body>"#;
        let links = SignalExtractor::extract(html, "::bad::", 0).links;

        assert_eq!(links.internal, 1);
        assert_eq!(links.external, 1);
    }

    #[test]
    fn test_word_count_splits_on_whitespace() {
        let html = "<body><p>one two\tthree</p>\n<p>  four  </p><div>five<span>six</span></div></body>";
        assert_eq!(SignalExtractor::extract(html, URL, 0).content.word_count, 5);
    }

    #[test]
    fn test_schema_types_and_invalid_blocks() {
        let html = r#"<head>
            <script type="application/ld+json">{"@type": "Organization", "name": "Acme"}</script>
            <script type="application/ld+json">{ not json </script>
            <script type="application/ld+json">{"@type": ["Article", "NewsArticle"]}</script>
            <script type="application/ld+json">{"@context": "https://schema.org"}</script>
        </head>"#;
        let signals = SignalExtractor::extract(html, URL, 0);

        assert!(signals.technical.schema);
        assert_eq!(
            signals.schema_types,
            vec!["Organization", "Invalid", "Article", "NewsArticle", "Unknown"]
        );
    }

    #[test]
    fn test_social_and_robots() {
        let html = r#"<head>
            <meta property="og:title" content="Title">
            <meta property="og:description" content="  ">
            <meta property="og:image" content="https://example.com/og.png">
            <meta name="robots" content="NOINDEX, follow">
        </head>"#;
        let signals = SignalExtractor::extract(html, URL, 0);

        assert!(signals.social.og_title);
        assert!(!signals.social.og_description);
        assert!(signals.social.og_image);
        assert!(!signals.social.twitter_card);
        assert!(signals.technical.noindex);
    }

    #[test]
    fn test_plain_http_is_not_https() {
        assert!(!SignalExtractor::extract("", "http://example.com", 0).technical.https);
    }
}
