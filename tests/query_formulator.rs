// tests/query_formulator.rs
// Query formulation is pure: no configuration, no I/O, no clock.

use trending_topic_analyzer::query::{build_search_query, DEFAULT_MODIFIER, DEFAULT_RECENCY};
use trending_topic_analyzer::snapshot::TimeRange;

#[test]
fn identical_inputs_yield_identical_queries() {
    let runs: Vec<String> = (0..3)
        .map(|_| build_search_query("Example Topic", "sports", "24h"))
        .collect();
    assert_eq!(runs[0], runs[1]);
    assert_eq!(runs[1], runs[2]);
    assert_eq!(
        runs[0],
        "Example Topic game news injury trade performance today latest"
    );
}

#[test]
fn every_known_category_has_a_distinct_modifier() {
    let categories = [
        "sports",
        "finance",
        "politics",
        "celebrity",
        "tech",
        "healthcare",
        "automotive",
    ];
    let mut queries: Vec<String> = categories
        .iter()
        .map(|c| build_search_query("X", c, "24h"))
        .collect();
    queries.sort();
    queries.dedup();
    assert_eq!(queries.len(), categories.len(), "modifiers must not collide");
    for q in &queries {
        assert_ne!(*q, format!("X {DEFAULT_MODIFIER} today latest"));
    }
}

#[test]
fn unrecognized_inputs_fall_back_to_documented_defaults() {
    let q = build_search_query("Obscure Thing", "numismatics", "90d");
    assert_eq!(q, format!("Obscure Thing {DEFAULT_MODIFIER} {DEFAULT_RECENCY}"));
}

#[test]
fn time_range_tokens_round_trip_into_the_recency_table() {
    let day = build_search_query("X", "tech", TimeRange::Last24h.as_token());
    assert!(day.ends_with("today latest"));
    let week = build_search_query("X", "tech", TimeRange::Last7d.as_token());
    assert!(week.ends_with("this week recent"));
    // 30d has no table entry; it uses the documented default
    let month = build_search_query("X", "tech", TimeRange::Last30d.as_token());
    assert!(month.ends_with(DEFAULT_RECENCY));
}
