// src/query.rs
//! Search-query formulation. Pure and deterministic: the same
//! (topic, category, time-range) always yields the same query string.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Modifier phrase appended for categories with no entry in the table.
pub const DEFAULT_MODIFIER: &str = "news latest";

/// Recency phrase appended for time-range tokens with no entry in the table.
pub const DEFAULT_RECENCY: &str = "recent news";

static CATEGORY_MODIFIERS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sports", "game news injury trade performance"),
        ("finance", "stock earnings news market analysis"),
        ("politics", "election news policy statement government"),
        ("celebrity", "news entertainment latest update"),
        ("tech", "product launch announcement technology news"),
        ("healthcare", "medical news health update research"),
        ("automotive", "car auto news release review"),
    ])
});

static RECENCY_PHRASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([("24h", "today latest"), ("7d", "this week recent")])
});

/// Build the search query for a topic: name + category modifier + recency
/// phrase. Category matching is case-insensitive; unknown categories and
/// time-range tokens use the documented defaults.
pub fn build_search_query(topic_name: &str, category: &str, time_range: &str) -> String {
    let modifier = CATEGORY_MODIFIERS
        .get(category.trim().to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(DEFAULT_MODIFIER);
    let recency = RECENCY_PHRASES
        .get(time_range)
        .copied()
        .unwrap_or(DEFAULT_RECENCY);
    format!("{} {} {}", topic_name.trim(), modifier, recency)
}
