use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::issue::{Issue, IssueWithResolution};
use super::signals::PageSignals;

/// Score category a rule contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    OnPage,
    Technical,
    Content,
    Images,
    UserExperience,
    Advanced,
}

impl Bucket {
    pub const ALL: [Bucket; 6] = [
        Bucket::OnPage,
        Bucket::Technical,
        Bucket::Content,
        Bucket::Images,
        Bucket::UserExperience,
        Bucket::Advanced,
    ];
}

/// Signed per-bucket subtotal of score adjustments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub on_page: i32,
    pub technical: i32,
    pub content: i32,
    pub images: i32,
    pub user_experience: i32,
    pub advanced: i32,
}

impl ScoreBreakdown {
    pub fn add(&mut self, bucket: Bucket, delta: i32) {
        *self.get_mut(bucket) += delta;
    }

    pub fn get(&self, bucket: Bucket) -> i32 {
        match bucket {
            Bucket::OnPage => self.on_page,
            Bucket::Technical => self.technical,
            Bucket::Content => self.content,
            Bucket::Images => self.images,
            Bucket::UserExperience => self.user_experience,
            Bucket::Advanced => self.advanced,
        }
    }

    fn get_mut(&mut self, bucket: Bucket) -> &mut i32 {
        match bucket {
            Bucket::OnPage => &mut self.on_page,
            Bucket::Technical => &mut self.technical,
            Bucket::Content => &mut self.content,
            Bucket::Images => &mut self.images,
            Bucket::UserExperience => &mut self.user_experience,
            Bucket::Advanced => &mut self.advanced,
        }
    }

    pub fn total(&self) -> i32 {
        Bucket::ALL.iter().map(|b| self.get(*b)).sum()
    }
}

/// Letter grade for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "F")]
    F,
}

/// Lower bound of each band, highest first.
const GRADE_BANDS: [(u8, Grade); 10] = [
    (90, Grade::APlus),
    (85, Grade::A),
    (80, Grade::AMinus),
    (75, Grade::BPlus),
    (70, Grade::B),
    (65, Grade::BMinus),
    (60, Grade::CPlus),
    (55, Grade::C),
    (50, Grade::CMinus),
    (40, Grade::D),
];

impl Grade {
    pub fn from_score(score: u8) -> Self {
        GRADE_BANDS
            .iter()
            .find(|(floor, _)| score >= *floor)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::F)
    }

    /// 0 for F up to 10 for A+.
    pub fn rank(&self) -> u8 {
        match self {
            Grade::F => 0,
            Grade::D => 1,
            Grade::CMinus => 2,
            Grade::C => 3,
            Grade::CPlus => 4,
            Grade::BMinus => 5,
            Grade::B => 6,
            Grade::BPlus => 7,
            Grade::AMinus => 8,
            Grade::A => 9,
            Grade::APlus => 10,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::D => "D",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the score aggregator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreCard {
    pub total_score: u8,
    pub breakdown: ScoreBreakdown,
    pub grade: Grade,
}

/// Full audit of one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub url: String,
    #[serde(rename = "score")]
    pub total_score: u8,
    pub grade: Grade,
    #[serde(rename = "scoreBreakdown")]
    pub breakdown: ScoreBreakdown,
    pub issues: Vec<Issue>,
    pub issues_with_resolutions: Vec<IssueWithResolution>,
    #[serde(rename = "metrics", serialize_with = "serialize_metrics")]
    pub signals: PageSignals,
    pub timestamp: DateTime<Utc>,
    pub audit_method: &'static str,
}

fn serialize_metrics<S>(signals: &PageSignals, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    signals.metrics().serialize(serializer)
}
