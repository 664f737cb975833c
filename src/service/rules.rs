//! The weighted rule table shared by issue reporting and scoring.
//!
//! Each rule inspects a [`PageSignals`] record and returns a [`Verdict`].
//! A `Fail` carries the issue kind; its deduction comes from
//! [`IssueKind::deduction`]. A `Pass` earns the rule's reward in the score
//! aggregator. A `Skip` means the rule does not apply to this page.

use serde::Serialize;

use crate::domain::{Bucket, Issue, IssueKind, PageSignals};

pub const TITLE_MIN_CHARS: usize = 30;
pub const TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MIN_CHARS: usize = 120;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;
pub const MIN_WORD_COUNT: u32 = 300;
pub const MAX_LOAD_TIME_MS: u64 = 3000;
/// External link count above which a page without internal links is flagged.
pub const EXTERNAL_LINK_THRESHOLD: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Skip,
    Fail(IssueKind),
}

pub struct Rule {
    pub name: &'static str,
    pub bucket: Bucket,
    /// Points added when the check passes.
    pub reward: i32,
    check: fn(&PageSignals) -> Verdict,
}

impl Rule {
    pub fn check(&self, signals: &PageSignals) -> Verdict {
        (self.check)(signals)
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("bucket", &self.bucket)
            .field("reward", &self.reward)
            .finish()
    }
}

/// One rule applied to one page.
#[derive(Debug, Clone, Copy)]
pub struct RuleOutcome {
    pub rule: &'static Rule,
    pub verdict: Verdict,
}

impl RuleOutcome {
    /// Signed score adjustment: the reward on pass, minus the deduction on fail.
    pub fn delta(&self) -> i32 {
        match self.verdict {
            Verdict::Pass => self.rule.reward,
            Verdict::Skip => 0,
            Verdict::Fail(kind) => -(kind.deduction() as i32),
        }
    }
}

/// Issues raised by a rule set run, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluation {
    pub issues: Vec<Issue>,
    /// Sum of issue deductions, as a non-positive number.
    pub total_delta: i32,
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    rules: &'static [Rule],
}

impl RuleSet {
    pub fn standard() -> Self {
        Self {
            rules: &STANDARD_RULES,
        }
    }

    pub fn rules(&self) -> &'static [Rule] {
        self.rules
    }

    /// Runs every rule; no rule short-circuits another.
    pub fn outcomes(&self, signals: &PageSignals) -> Vec<RuleOutcome> {
        self.rules
            .iter()
            .map(|rule| RuleOutcome {
                rule,
                verdict: rule.check(signals),
            })
            .collect()
    }

    pub fn evaluate(&self, signals: &PageSignals) -> RuleEvaluation {
        Self::collect_issues(&self.outcomes(signals))
    }

    pub fn collect_issues(outcomes: &[RuleOutcome]) -> RuleEvaluation {
        let issues: Vec<Issue> = outcomes
            .iter()
            .filter_map(|outcome| match outcome.verdict {
                Verdict::Fail(kind) => Some(Issue::new(kind)),
                _ => None,
            })
            .collect();
        let total_delta = -issues.iter().map(|i| i.score_impact as i32).sum::<i32>();

        RuleEvaluation {
            issues,
            total_delta,
        }
    }

    /// Largest score a page can earn on top of the base.
    pub fn max_reward(&self) -> i32 {
        self.rules.iter().map(|r| r.reward).sum()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

fn fail_if(condition: bool, kind: IssueKind) -> Verdict {
    if condition {
        Verdict::Fail(kind)
    } else {
        Verdict::Pass
    }
}

fn check_title(s: &PageSignals) -> Verdict {
    if !s.title.present {
        Verdict::Fail(IssueKind::MissingTitle)
    } else {
        fail_if(
            !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&s.title.length),
            IssueKind::TitleLength,
        )
    }
}

fn check_meta_description(s: &PageSignals) -> Verdict {
    if !s.meta_description.present {
        Verdict::Fail(IssueKind::MissingMetaDescription)
    } else {
        fail_if(
            !(META_DESCRIPTION_MIN_CHARS..=META_DESCRIPTION_MAX_CHARS)
                .contains(&s.meta_description.length),
            IssueKind::MetaDescriptionLength,
        )
    }
}

fn check_h1(s: &PageSignals) -> Verdict {
    match s.headings.h1 {
        0 => Verdict::Fail(IssueKind::MissingH1),
        1 => Verdict::Pass,
        _ => Verdict::Fail(IssueKind::MultipleH1),
    }
}

fn check_h2(s: &PageSignals) -> Verdict {
    match (s.headings.h2, s.content.word_count > MIN_WORD_COUNT) {
        (0, true) => Verdict::Fail(IssueKind::NoH2),
        (0, false) => Verdict::Skip,
        _ => Verdict::Pass,
    }
}

fn check_content_length(s: &PageSignals) -> Verdict {
    fail_if(s.content.word_count < MIN_WORD_COUNT, IssueKind::ThinContent)
}

fn check_https(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.https, IssueKind::NoHttps)
}

fn check_charset(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.charset, IssueKind::MissingCharset)
}

fn check_canonical(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.canonical, IssueKind::MissingCanonical)
}

fn check_language(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.language, IssueKind::MissingLanguage)
}

fn check_noindex(s: &PageSignals) -> Verdict {
    fail_if(s.technical.noindex, IssueKind::Noindex)
}

fn check_alt_text(s: &PageSignals) -> Verdict {
    let count = s.images.without_alt;
    fail_if(count > 0, IssueKind::MissingAltText { count })
}

fn check_image_formats(s: &PageSignals) -> Verdict {
    let count = s.images.optimizable;
    fail_if(count > 0, IssueKind::UnoptimizedImages { count })
}

fn check_viewport(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.viewport, IssueKind::MissingViewport)
}

fn check_load_time(s: &PageSignals) -> Verdict {
    fail_if(
        s.performance.load_time_ms > MAX_LOAD_TIME_MS,
        IssueKind::SlowLoad,
    )
}

fn check_favicon(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.favicon, IssueKind::MissingFavicon)
}

fn check_has_links(s: &PageSignals) -> Verdict {
    fail_if(s.links.total == 0, IssueKind::NoLinks)
}

fn check_internal_links(s: &PageSignals) -> Verdict {
    if s.links.external <= EXTERNAL_LINK_THRESHOLD {
        return Verdict::Skip;
    }
    fail_if(s.links.internal == 0, IssueKind::NoInternalLinks)
}

fn check_schema(s: &PageSignals) -> Verdict {
    fail_if(!s.technical.schema, IssueKind::NoStructuredData)
}

fn check_open_graph(s: &PageSignals) -> Verdict {
    fail_if(
        !(s.social.og_title && s.social.og_description),
        IssueKind::IncompleteOpenGraph,
    )
}

fn check_open_graph_image(s: &PageSignals) -> Verdict {
    fail_if(!s.social.og_image, IssueKind::MissingOpenGraphImage)
}

#[rustfmt::skip]
static STANDARD_RULES: [Rule; 20] = [
    Rule { name: "title", bucket: Bucket::OnPage, reward: 4, check: check_title },
    Rule { name: "meta_description", bucket: Bucket::OnPage, reward: 3, check: check_meta_description },
    Rule { name: "h1", bucket: Bucket::OnPage, reward: 3, check: check_h1 },
    Rule { name: "alt_text", bucket: Bucket::Images, reward: 2, check: check_alt_text },
    Rule { name: "canonical", bucket: Bucket::Technical, reward: 2, check: check_canonical },
    Rule { name: "viewport", bucket: Bucket::UserExperience, reward: 2, check: check_viewport },
    Rule { name: "load_time", bucket: Bucket::UserExperience, reward: 2, check: check_load_time },
    Rule { name: "structured_data", bucket: Bucket::Advanced, reward: 2, check: check_schema },
    Rule { name: "content_length", bucket: Bucket::Content, reward: 3, check: check_content_length },
    Rule { name: "https", bucket: Bucket::Technical, reward: 3, check: check_https },
    Rule { name: "charset", bucket: Bucket::Technical, reward: 1, check: check_charset },
    Rule { name: "favicon", bucket: Bucket::UserExperience, reward: 1, check: check_favicon },
    Rule { name: "language", bucket: Bucket::Technical, reward: 1, check: check_language },
    Rule { name: "h2", bucket: Bucket::OnPage, reward: 1, check: check_h2 },
    Rule { name: "image_formats", bucket: Bucket::Images, reward: 1, check: check_image_formats },
    Rule { name: "open_graph", bucket: Bucket::Advanced, reward: 2, check: check_open_graph },
    Rule { name: "open_graph_image", bucket: Bucket::Advanced, reward: 1, check: check_open_graph_image },
    Rule { name: "internal_links", bucket: Bucket::UserExperience, reward: 0, check: check_internal_links },
    Rule { name: "noindex", bucket: Bucket::Technical, reward: 0, check: check_noindex },
    Rule { name: "has_links", bucket: Bucket::UserExperience, reward: 1, check: check_has_links },
];
