//! Issue identity and remediation records.

use std::borrow::Cow;
use std::fmt;

use serde::{Serialize, Serializer};

/// A triggered rule. Count-carrying variants render their count into the
/// issue text and derive their deduction from the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IssueKind {
    MissingTitle,
    TitleLength,
    MissingMetaDescription,
    MetaDescriptionLength,
    MissingH1,
    MultipleH1,
    MissingAltText { count: u32 },
    MissingCanonical,
    MissingViewport,
    SlowLoad,
    NoStructuredData,
    ThinContent,
    NoHttps,
    MissingCharset,
    MissingFavicon,
    MissingLanguage,
    NoH2,
    UnoptimizedImages { count: u32 },
    IncompleteOpenGraph,
    MissingOpenGraphImage,
    NoInternalLinks,
    Noindex,
    NoLinks,
}

/// Fieldless discriminant of [`IssueKind`]; keys the resolution catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    MissingTitle,
    TitleLength,
    MissingMetaDescription,
    MetaDescriptionLength,
    MissingH1,
    MultipleH1,
    MissingAltText,
    MissingCanonical,
    MissingViewport,
    SlowLoad,
    NoStructuredData,
    ThinContent,
    NoHttps,
    MissingCharset,
    MissingFavicon,
    MissingLanguage,
    NoH2,
    UnoptimizedImages,
    IncompleteOpenGraph,
    MissingOpenGraphImage,
    NoInternalLinks,
    Noindex,
    NoLinks,
}

impl IssueCode {
    pub const ALL: [IssueCode; 23] = [
        IssueCode::MissingTitle,
        IssueCode::TitleLength,
        IssueCode::MissingMetaDescription,
        IssueCode::MetaDescriptionLength,
        IssueCode::MissingH1,
        IssueCode::MultipleH1,
        IssueCode::MissingAltText,
        IssueCode::MissingCanonical,
        IssueCode::MissingViewport,
        IssueCode::SlowLoad,
        IssueCode::NoStructuredData,
        IssueCode::ThinContent,
        IssueCode::NoHttps,
        IssueCode::MissingCharset,
        IssueCode::MissingFavicon,
        IssueCode::MissingLanguage,
        IssueCode::NoH2,
        IssueCode::UnoptimizedImages,
        IssueCode::IncompleteOpenGraph,
        IssueCode::MissingOpenGraphImage,
        IssueCode::NoInternalLinks,
        IssueCode::Noindex,
        IssueCode::NoLinks,
    ];
}

const ALT_TEXT_PATTERN: &str = "images missing alt";
const OPTIMIZE_PATTERN: &str = "images could be optimized";

impl IssueKind {
    pub fn code(&self) -> IssueCode {
        match self {
            Self::MissingTitle => IssueCode::MissingTitle,
            Self::TitleLength => IssueCode::TitleLength,
            Self::MissingMetaDescription => IssueCode::MissingMetaDescription,
            Self::MetaDescriptionLength => IssueCode::MetaDescriptionLength,
            Self::MissingH1 => IssueCode::MissingH1,
            Self::MultipleH1 => IssueCode::MultipleH1,
            Self::MissingAltText { .. } => IssueCode::MissingAltText,
            Self::MissingCanonical => IssueCode::MissingCanonical,
            Self::MissingViewport => IssueCode::MissingViewport,
            Self::SlowLoad => IssueCode::SlowLoad,
            Self::NoStructuredData => IssueCode::NoStructuredData,
            Self::ThinContent => IssueCode::ThinContent,
            Self::NoHttps => IssueCode::NoHttps,
            Self::MissingCharset => IssueCode::MissingCharset,
            Self::MissingFavicon => IssueCode::MissingFavicon,
            Self::MissingLanguage => IssueCode::MissingLanguage,
            Self::NoH2 => IssueCode::NoH2,
            Self::UnoptimizedImages { .. } => IssueCode::UnoptimizedImages,
            Self::IncompleteOpenGraph => IssueCode::IncompleteOpenGraph,
            Self::MissingOpenGraphImage => IssueCode::MissingOpenGraphImage,
            Self::NoInternalLinks => IssueCode::NoInternalLinks,
            Self::Noindex => IssueCode::Noindex,
            Self::NoLinks => IssueCode::NoLinks,
        }
    }

    /// Points removed from the score when this issue is raised.
    pub fn deduction(&self) -> u32 {
        match self {
            Self::MissingTitle | Self::MissingMetaDescription | Self::MissingH1 => 15,
            Self::TitleLength
            | Self::MetaDescriptionLength
            | Self::MultipleH1
            | Self::MissingViewport
            | Self::SlowLoad
            | Self::ThinContent
            | Self::NoInternalLinks => 10,
            Self::MissingAltText { count } => count.saturating_mul(2).min(15),
            Self::UnoptimizedImages { count } => count.saturating_mul(2).min(10),
            Self::NoHttps => 20,
            Self::Noindex => 25,
            Self::NoH2 | Self::IncompleteOpenGraph | Self::NoLinks => 8,
            Self::MissingCanonical
            | Self::NoStructuredData
            | Self::MissingCharset
            | Self::MissingLanguage
            | Self::MissingOpenGraphImage => 5,
            Self::MissingFavicon => 3,
        }
    }

    /// Static label for fieldless kinds; `None` for count-carrying ones.
    fn label(&self) -> Option<&'static str> {
        let label = match self {
            Self::MissingTitle => "Missing page title",
            Self::TitleLength => "Title length not optimal (30-60 characters)",
            Self::MissingMetaDescription => "Missing meta description",
            Self::MetaDescriptionLength => {
                "Meta description length not optimal (120-160 characters)"
            }
            Self::MissingH1 => "Missing H1 tag",
            Self::MultipleH1 => "Multiple H1 tags found",
            Self::MissingCanonical => "Missing canonical URL",
            Self::MissingViewport => "Missing mobile-friendly viewport meta tag",
            Self::SlowLoad => "Page load time exceeds 3 seconds",
            Self::NoStructuredData => "No structured data (Schema.org) found",
            Self::ThinContent => "Content is too short (less than 300 words)",
            Self::NoHttps => "Website not using HTTPS/SSL",
            Self::MissingCharset => "Missing charset declaration",
            Self::MissingFavicon => "Missing favicon",
            Self::MissingLanguage => "Missing HTML language declaration",
            Self::NoH2 => "No H2 headings found - poor content structure",
            Self::IncompleteOpenGraph => {
                "Incomplete Open Graph tags (missing title or description)"
            }
            Self::MissingOpenGraphImage => "Missing Open Graph image",
            Self::NoInternalLinks => "No internal links found - poor site navigation",
            Self::Noindex => "Page set to noindex - will not appear in search results",
            Self::NoLinks => "No links found on page - poor user experience",
            Self::MissingAltText { .. } | Self::UnoptimizedImages { .. } => return None,
        };
        Some(label)
    }

    /// Human-readable issue text.
    pub fn text(&self) -> Cow<'static, str> {
        match self {
            Self::MissingAltText { count } => {
                Cow::Owned(format!("{count} {ALT_TEXT_PATTERN} text"))
            }
            Self::UnoptimizedImages { count } => Cow::Owned(format!(
                "{count} {OPTIMIZE_PATTERN} (consider WebP format)"
            )),
            other => Cow::Borrowed(other.label().unwrap_or_default()),
        }
    }

    /// Maps free-form issue text back to a kind: exact label first, then
    /// the two count-carrying patterns. `None` when nothing matches.
    pub fn from_text(text: &str) -> Option<Self> {
        if let Some(kind) = FIELDLESS
            .iter()
            .find(|kind| kind.label() == Some(text))
        {
            return Some(*kind);
        }

        if text.contains(ALT_TEXT_PATTERN) {
            return Some(Self::MissingAltText {
                count: leading_count(text),
            });
        }
        if text.contains(OPTIMIZE_PATTERN) {
            return Some(Self::UnoptimizedImages {
                count: leading_count(text),
            });
        }
        None
    }
}

const FIELDLESS: [IssueKind; 21] = [
    IssueKind::MissingTitle,
    IssueKind::TitleLength,
    IssueKind::MissingMetaDescription,
    IssueKind::MetaDescriptionLength,
    IssueKind::MissingH1,
    IssueKind::MultipleH1,
    IssueKind::MissingCanonical,
    IssueKind::MissingViewport,
    IssueKind::SlowLoad,
    IssueKind::NoStructuredData,
    IssueKind::ThinContent,
    IssueKind::NoHttps,
    IssueKind::MissingCharset,
    IssueKind::MissingFavicon,
    IssueKind::MissingLanguage,
    IssueKind::NoH2,
    IssueKind::IncompleteOpenGraph,
    IssueKind::MissingOpenGraphImage,
    IssueKind::NoInternalLinks,
    IssueKind::Noindex,
    IssueKind::NoLinks,
];

fn leading_count(text: &str) -> u32 {
    text.split_whitespace()
        .next()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0)
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// An issue raised by the rule set, with the points it cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub kind: IssueKind,
    pub score_impact: u32,
}

impl Issue {
    pub fn new(kind: IssueKind) -> Self {
        Self {
            score_impact: kind.deduction(),
            kind,
        }
    }
}

impl Serialize for Issue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        IssuePayload::from(self).serialize(serializer)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IssuePayload {
    issue: String,
    code: IssueCode,
    score_impact: u32,
}

impl From<&Issue> for IssuePayload {
    fn from(issue: &Issue) -> Self {
        Self {
            issue: issue.kind.to_string(),
            code: issue.kind.code(),
            score_impact: issue.score_impact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static remediation guidance for one kind of issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRecord {
    pub priority: Priority,
    pub category: &'static str,
    pub solution: &'static str,
    pub implementation: &'static [&'static str],
    pub example: &'static str,
    pub impact: &'static str,
    pub time_to_fix: &'static str,
}

/// An issue joined with its resolution; serializes flat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueWithResolution {
    #[serde(flatten)]
    pub issue: Issue,
    #[serde(flatten)]
    pub resolution: ResolutionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_text_renders_count_and_caps_deduction() {
        let kind = IssueKind::MissingAltText { count: 5 };
        assert_eq!(kind.to_string(), "5 images missing alt text");
        assert_eq!(kind.deduction(), 10);

        assert_eq!(IssueKind::MissingAltText { count: 40 }.deduction(), 15);
        assert_eq!(IssueKind::UnoptimizedImages { count: 3 }.deduction(), 6);
        assert_eq!(IssueKind::UnoptimizedImages { count: 9 }.deduction(), 10);
    }

    #[test]
    fn unoptimized_images_text() {
        let kind = IssueKind::UnoptimizedImages { count: 2 };
        assert_eq!(
            kind.to_string(),
            "2 images could be optimized (consider WebP format)"
        );
    }

    #[test]
    fn text_round_trips_for_every_fieldless_kind() {
        for kind in FIELDLESS {
            assert_eq!(IssueKind::from_text(&kind.to_string()), Some(kind));
        }
    }

    #[test]
    fn pattern_match_recovers_count() {
        assert_eq!(
            IssueKind::from_text("7 images missing alt text"),
            Some(IssueKind::MissingAltText { count: 7 })
        );
        assert_eq!(
            IssueKind::from_text("some images could be optimized"),
            Some(IssueKind::UnoptimizedImages { count: 0 })
        );
        assert_eq!(IssueKind::from_text("Missing page title!"), None);
        assert_eq!(IssueKind::from_text(""), None);
    }

    #[test]
    fn every_code_is_reachable_from_a_kind() {
        let mut codes: Vec<IssueCode> = FIELDLESS.iter().map(IssueKind::code).collect();
        codes.push(IssueKind::MissingAltText { count: 1 }.code());
        codes.push(IssueKind::UnoptimizedImages { count: 1 }.code());
        codes.sort();
        let mut all = IssueCode::ALL.to_vec();
        all.sort();
        assert_eq!(codes, all);
    }

    #[test]
    fn issue_serializes_text_code_and_impact() {
        let issue = Issue::new(IssueKind::MissingAltText { count: 3 });
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["issue"], "3 images missing alt text");
        assert_eq!(value["code"], "missing_alt_text");
        assert_eq!(value["scoreImpact"], 6);
    }
}
