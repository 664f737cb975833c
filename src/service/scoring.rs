//! Score aggregation over the shared rule table.

use crate::domain::{Grade, PageSignals, ScoreBreakdown, ScoreCard};

use super::rules::{RuleOutcome, RuleSet};

/// Starting score before any rule adjusts it.
pub const BASE_SCORE: i32 = 70;

pub fn compute_score(signals: &PageSignals) -> ScoreCard {
    score_outcomes(signals, &RuleSet::standard().outcomes(signals))
}

/// Folds already-evaluated outcomes into a score card, so callers that also
/// report issues evaluate the rules only once.
pub fn score_outcomes(signals: &PageSignals, outcomes: &[RuleOutcome]) -> ScoreCard {
    assert!(
        signals.is_consistent(),
        "page signals violate extractor invariants: {signals:?}"
    );

    let mut breakdown = ScoreBreakdown::default();
    for outcome in outcomes {
        breakdown.add(outcome.rule.bucket, outcome.delta());
    }

    let total_score = (BASE_SCORE + breakdown.total()).clamp(0, 100) as u8;

    ScoreCard {
        total_score,
        breakdown,
        grade: Grade::from_score(total_score),
    }
}
