//! Per-page signals extracted from fetched markup.
//!
//! A `PageSignals` value is built once per fetch, read by the rule set and
//! the score aggregator, and then dropped. Field names serialize in
//! camelCase because downstream consumers read them as `metrics`.

use serde::{Deserialize, Serialize};

/// A text signal together with its derived length and presence flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSignal {
    pub content: String,
    pub length: usize,
    pub present: bool,
}

impl TextSignal {
    /// Trims the content and derives `length` (in chars) and `present`.
    pub fn new(content: impl AsRef<str>) -> Self {
        let content = content.as_ref().trim().to_string();
        Self {
            length: content.chars().count(),
            present: !content.is_empty(),
            content,
        }
    }

    pub fn absent() -> Self {
        Self::default()
    }

    /// `length` and `present` agree with `content`.
    pub fn is_consistent(&self) -> bool {
        self.length == self.content.chars().count()
            && self.present == !self.content.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadingCounts {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
    pub h4: u32,
    pub h5: u32,
    pub h6: u32,
    #[serde(default)]
    pub h1_texts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub total: u32,
    pub without_alt: u32,
    /// JPEG/PNG images that could be served as WebP.
    #[serde(default)]
    pub optimizable: u32,
}

impl ImageStats {
    /// Percentage of images carrying alt text; 100 when there are none.
    pub fn alt_coverage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        let with_alt = self.total.saturating_sub(self.without_alt);
        (with_alt as f64 / self.total as f64 * 1000.0).round() / 10.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkStats {
    pub total: u32,
    pub internal: u32,
    #[serde(default)]
    pub external: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalFlags {
    pub https: bool,
    pub charset: bool,
    pub viewport: bool,
    pub canonical: bool,
    pub favicon: bool,
    pub language: bool,
    pub schema: bool,
    #[serde(default)]
    pub noindex: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub word_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialTags {
    pub og_title: bool,
    pub og_description: bool,
    pub og_image: bool,
    #[serde(default)]
    pub twitter_card: bool,
}

impl SocialTags {
    pub fn is_complete(&self) -> bool {
        self.og_title && self.og_description && self.og_image && self.twitter_card
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Performance {
    pub load_time_ms: u64,
}

/// Flat record of everything the rule set and aggregator look at.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    pub title: TextSignal,
    pub meta_description: TextSignal,
    #[serde(default)]
    pub meta_keywords: String,
    pub headings: HeadingCounts,
    pub images: ImageStats,
    pub links: LinkStats,
    pub technical: TechnicalFlags,
    pub content: ContentStats,
    pub social: SocialTags,
    pub performance: Performance,
    /// `@type` of each JSON-LD block, `"Invalid"` for blocks that failed to parse.
    #[serde(default)]
    pub schema_types: Vec<String>,
}

impl PageSignals {
    /// Report view of these signals with the derived summaries filled in.
    pub fn metrics(&self) -> Metrics<'_> {
        Metrics {
            title: &self.title,
            meta_description: &self.meta_description,
            meta_keywords: &self.meta_keywords,
            headings: &self.headings,
            images: ImageMetrics {
                stats: &self.images,
                alt_text_coverage: self.images.alt_coverage(),
            },
            links: &self.links,
            technical: &self.technical,
            content: &self.content,
            social: &self.social,
            social_complete: self.social.is_complete(),
            performance: &self.performance,
            schema_types: &self.schema_types,
        }
    }

    /// Checks the invariants the extractor guarantees.
    pub fn is_consistent(&self) -> bool {
        self.title.is_consistent()
            && self.meta_description.is_consistent()
            && self.images.without_alt <= self.images.total
            && self.images.optimizable <= self.images.total
            && self.links.internal <= self.links.total
            && self.links.external <= self.links.total
            && (self.schema_types.is_empty() || self.technical.schema)
    }
}

/// The `metrics` object of an audit report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics<'a> {
    title: &'a TextSignal,
    meta_description: &'a TextSignal,
    meta_keywords: &'a str,
    headings: &'a HeadingCounts,
    images: ImageMetrics<'a>,
    links: &'a LinkStats,
    technical: &'a TechnicalFlags,
    content: &'a ContentStats,
    social: &'a SocialTags,
    social_complete: bool,
    performance: &'a Performance,
    schema_types: &'a [String],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageMetrics<'a> {
    #[serde(flatten)]
    stats: &'a ImageStats,
    alt_text_coverage: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_signal_trims_and_counts_chars() {
        let signal = TextSignal::new("  Café au lait  ");
        assert_eq!(signal.content, "Café au lait");
        assert_eq!(signal.length, 12);
        assert!(signal.present);
        assert!(signal.is_consistent());
    }

    #[test]
    fn blank_text_is_absent() {
        let signal = TextSignal::new("   \n\t ");
        assert_eq!(signal, TextSignal::absent());
        assert!(!signal.present);
    }

    #[test]
    fn alt_coverage_handles_empty_and_partial() {
        assert_eq!(ImageStats::default().alt_coverage(), 100.0);
        let stats = ImageStats {
            total: 3,
            without_alt: 1,
            optimizable: 0,
        };
        assert_eq!(stats.alt_coverage(), 66.7);
    }

    #[test]
    fn signals_deserialize_from_camel_case_payload() {
        let json = r#"{
            "title": {"content": "Home", "length": 4, "present": true},
            "metaDescription": {"content": "", "length": 0, "present": false},
            "headings": {"h1": 1, "h2": 0, "h3": 0, "h4": 0, "h5": 0, "h6": 0},
            "images": {"total": 2, "withoutAlt": 1},
            "links": {"total": 5, "internal": 3},
            "technical": {"https": true, "charset": true, "viewport": true,
                          "canonical": false, "favicon": true, "language": true, "schema": false},
            "content": {"wordCount": 120},
            "social": {"ogTitle": false, "ogDescription": false, "ogImage": false},
            "performance": {"loadTimeMs": 800}
        }"#;

        let signals: PageSignals = serde_json::from_str(json).unwrap();
        assert_eq!(signals.images.without_alt, 1);
        assert_eq!(signals.content.word_count, 120);
        assert!(signals.is_consistent());
    }

    #[test]
    fn schema_flag_without_types_is_consistent() {
        let mut signals = PageSignals::default();
        signals.technical.schema = true;
        assert!(signals.is_consistent());

        signals.technical.schema = false;
        signals.schema_types = vec!["Article".into()];
        assert!(!signals.is_consistent());
    }

    #[test]
    fn metrics_view_adds_coverage_and_social_summary() {
        let mut signals = PageSignals::default();
        signals.images = ImageStats {
            total: 4,
            without_alt: 1,
            optimizable: 0,
        };
        signals.social = SocialTags {
            og_title: true,
            og_description: true,
            og_image: true,
            twitter_card: false,
        };

        let value = serde_json::to_value(signals.metrics()).unwrap();
        assert_eq!(value["images"]["total"], 4);
        assert_eq!(value["images"]["withoutAlt"], 1);
        assert_eq!(value["images"]["altTextCoverage"], 75.0);
        assert_eq!(value["socialComplete"], false);
        assert_eq!(value["social"]["ogImage"], true);
        assert_eq!(value["technical"]["schema"], false);
    }

    #[test]
    fn missing_required_group_is_rejected() {
        let json = r#"{"title": {"content": "", "length": 0, "present": false}}"#;
        let err = serde_json::from_str::<PageSignals>(json).unwrap_err();
        assert!(err.to_string().contains("missing field"));
    }
}
