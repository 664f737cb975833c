use seo_audit::domain::{
    Grade, ImageStats, IssueCode, IssueKind, PageSignals, Priority, TextSignal,
};
use seo_audit::test_utils::fixtures::{empty_page_html, optimal_signals, well_optimized_html};
use seo_audit::{
    assert_has_issue, assert_no_issue, audit, compute_score, evaluate_issues, extract_signals,
    resolve_issue,
};

/// Signals from the "title absent" walkthrough: everything else is healthy.
fn title_absent_signals() -> PageSignals {
    let mut signals = optimal_signals();
    signals.title = TextSignal::absent();
    signals.meta_description = TextSignal::new("d".repeat(140));
    signals.images = ImageStats {
        total: 4,
        without_alt: 0,
        optimizable: 0,
    };
    signals.content.word_count = 400;
    signals.performance.load_time_ms = 1200;
    signals
}

/// Flips each boolean and pushes counts to the extremes, one field at a time.
fn signal_variants() -> Vec<PageSignals> {
    let base = optimal_signals();
    let mut variants = vec![base.clone(), PageSignals::default()];

    let mutations: [fn(&mut PageSignals); 14] = [
        |s| s.title = TextSignal::absent(),
        |s| s.title = TextSignal::new("short"),
        |s| s.meta_description = TextSignal::absent(),
        |s| s.headings.h1 = 0,
        |s| s.headings.h1 = 4,
        |s| s.headings.h2 = 0,
        |s| {
            s.images.total = 50;
            s.images.without_alt = 50;
            s.images.optimizable = 50;
        },
        |s| s.technical.https = false,
        |s| s.technical.noindex = true,
        |s| s.links = Default::default(),
        |s| {
            s.links.total = 30;
            s.links.internal = 0;
            s.links.external = 30;
        },
        |s| s.content.word_count = 0,
        |s| s.performance.load_time_ms = 60_000,
        |s| s.social = Default::default(),
    ];

    for mutate in &mutations {
        let mut variant = base.clone();
        mutate(&mut variant);
        variants.push(variant);

        let mut degraded = PageSignals::default();
        mutate(&mut degraded);
        if degraded.is_consistent() {
            variants.push(degraded);
        }
    }
    variants
}

#[test]
fn missing_title_and_title_length_are_mutually_exclusive() {
    for mut signals in signal_variants() {
        signals.title = TextSignal::absent();
        let evaluation = evaluate_issues(&signals);
        assert_has_issue!(evaluation.issues, IssueCode::MissingTitle, 15);
        assert_no_issue!(evaluation.issues, IssueCode::TitleLength);
    }
}

#[test]
fn score_is_always_within_bounds() {
    for signals in signal_variants() {
        let card = compute_score(&signals);
        assert!(card.total_score <= 100);
        assert_eq!(card.grade, Grade::from_score(card.total_score));
    }
}

#[test]
fn resolve_issue_is_total() {
    let inputs = [
        "",
        "Missing page title",
        "3 images missing alt text",
        "12 images could be optimized (consider WebP format)",
        "Totally unknown issue",
        "\u{1F600}",
    ];
    for text in inputs {
        let record = resolve_issue(text);
        assert!(!record.solution.is_empty(), "{text:?}");
        assert!(!record.category.is_empty());
    }
    assert_eq!(resolve_issue("Totally unknown issue").priority, Priority::Medium);
    assert_eq!(resolve_issue("Totally unknown issue").category, "General");
}

#[test]
fn alt_text_count_is_consistent() {
    let mut signals = optimal_signals();
    signals.images.total = 9;
    signals.images.without_alt = 5;

    let evaluation = evaluate_issues(&signals);
    let issue = evaluation
        .issues
        .iter()
        .find(|i| matches!(i.kind, IssueKind::MissingAltText { .. }))
        .expect("alt issue raised");
    assert!(issue.kind.to_string().contains('5'));
    assert_eq!(issue.score_impact, 10);
}

#[test]
fn audit_is_idempotent_modulo_timestamp() {
    let html = well_optimized_html();
    let mut first = audit(&html, "https://example.com/guide", 700);
    let second = audit(&html, "https://example.com/guide", 700);

    first.timestamp = second.timestamp;
    assert_eq!(first, second);
}

#[test]
fn title_absent_scenario() {
    let signals = title_absent_signals();
    let evaluation = evaluate_issues(&signals);
    assert_eq!(evaluation.issues.len(), 1);
    assert_eq!(evaluation.issues[0].kind, IssueKind::MissingTitle);
    assert_eq!(evaluation.total_delta, -15);

    let card = compute_score(&signals);
    assert_eq!(card.total_score, 86);
    assert_eq!(card.grade, Grade::A);
    assert_eq!(card.breakdown.on_page, -8);
    assert!(card.breakdown.technical > 0);
    assert!(card.breakdown.advanced > 0);
}

#[test]
fn title_absent_payload_scores_without_schema_types() {
    let json = r#"{
        "title": {"content": "", "length": 0, "present": false},
        "metaDescription": {"content": "", "length": 0, "present": false},
        "headings": {"h1": 1, "h2": 2, "h3": 0, "h4": 0, "h5": 0, "h6": 0},
        "images": {"total": 4, "withoutAlt": 0},
        "links": {"total": 12, "internal": 8, "external": 4},
        "technical": {"https": true, "charset": true, "viewport": true, "canonical": true,
                      "favicon": true, "language": true, "schema": true},
        "content": {"wordCount": 400},
        "social": {"ogTitle": true, "ogDescription": true, "ogImage": true, "twitterCard": true},
        "performance": {"loadTimeMs": 1200}
    }"#;
    let mut signals: PageSignals = serde_json::from_str(json).unwrap();
    signals.meta_description = TextSignal::new("d".repeat(140));
    assert!(signals.schema_types.is_empty());

    let card = compute_score(&signals);
    assert_eq!(card.total_score, 86);
    assert_eq!(card.grade, Grade::A);
    assert_eq!(card.breakdown.on_page, -8);
}

#[test]
fn empty_page_scenario() {
    let result = audit(empty_page_html(), "http://example.com/", 0);

    assert_eq!(result.total_score, 0);
    assert_eq!(result.grade, Grade::F);
    for code in [
        IssueCode::MissingTitle,
        IssueCode::MissingMetaDescription,
        IssueCode::MissingH1,
        IssueCode::NoHttps,
        IssueCode::MissingCharset,
        IssueCode::MissingFavicon,
        IssueCode::MissingLanguage,
        IssueCode::NoStructuredData,
        IssueCode::ThinContent,
        IssueCode::NoLinks,
    ] {
        assert_has_issue!(result.issues, code);
    }
}

#[test]
fn extraction_matches_standalone_entry_point() {
    let html = well_optimized_html();
    let signals = extract_signals(&html, "https://example.com/guide", 900);
    let result = audit(&html, "https://example.com/guide", 900);

    assert_eq!(result.signals, signals);
    assert_eq!(compute_score(&signals).total_score, result.total_score);
}
