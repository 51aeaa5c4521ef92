// src/search/mod.rs
//! Web-context acquisition: an ordered provider chain that degrades
//! gracefully instead of failing. Per-attempt failures are logged and
//! counted; the caller always receives a `ProviderResult`.

pub mod duckduckgo;
pub mod fallback;
pub mod google;
pub mod types;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;

use crate::config::SearchConfig;
use crate::error::SearchError;

pub use crate::search::duckduckgo::DuckDuckGoProvider;
pub use crate::search::fallback::SyntheticProvider;
pub use crate::search::google::GoogleSearchProvider;
pub use crate::search::types::{ProviderResult, SearchHit, SearchProvider};

/// One-time metrics registration (no-op without an installed recorder).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("search_attempts_total", "Provider attempts issued by the chain.");
        describe_counter!(
            "search_provider_skips_total",
            "Providers skipped for missing configuration."
        );
        describe_counter!(
            "search_provider_errors_total",
            "Provider transport/status/payload failures."
        );
        describe_counter!(
            "search_fallback_total",
            "Requests answered by the synthetic generator."
        );
        describe_histogram!("search_fetch_ms", "Provider fetch time in milliseconds.");
    });
}

/// Normalize provider text: HTML entity decode, strip tags, collapse
/// whitespace, cap length.
pub fn normalize_snippet(s: &str) -> String {
    let mut out = html_escape::decode_html_entities(s).to_string();

    static RE_TAGS: OnceCell<regex::Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| regex::Regex::new(r"(?is)</?[^>]+>").unwrap());
    out = re_tags.replace_all(&out, "").to_string();

    static RE_WS: OnceCell<regex::Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| regex::Regex::new(r"\s+").unwrap());
    out = re_ws.replace_all(&out, " ").trim().to_string();

    if out.chars().count() > 500 {
        out = out.chars().take(500).collect();
    }
    out
}

/// Extract up to five recurring themes from a result's headlines. Local and
/// deterministic; order follows first occurrence.
pub fn identify_themes(result: &ProviderResult) -> Vec<String> {
    static RE_WORD: OnceCell<regex::Regex> = OnceCell::new();
    let re_word = RE_WORD.get_or_init(|| regex::Regex::new(r"\b[a-z0-9]+\b").unwrap());

    let mut themes = Vec::new();
    for hit in &result.hits {
        let lower = hit.headline.to_ascii_lowercase();
        for m in re_word.find_iter(&lower) {
            let w = m.as_str();
            if w.len() > 4 && !themes.iter().any(|t| t == w) {
                themes.push(w.to_string());
            }
        }
    }
    themes.truncate(5);

    if themes.is_empty() {
        vec!["trending".into(), "news".into(), "popular".into()]
    } else {
        themes
    }
}

/// Ordered set of content-retrieval backends tried in sequence until one
/// yields a usable result; terminates in the synthetic generator, so a run
/// always produces a `ProviderResult`.
pub struct ProviderChain {
    providers: Vec<Box<dyn SearchProvider>>,
    synthetic: SyntheticProvider,
}

impl ProviderChain {
    pub fn new(providers: Vec<Box<dyn SearchProvider>>) -> Self {
        Self {
            providers,
            synthetic: SyntheticProvider::new(),
        }
    }

    /// The evidenced priority order: credentialed Google first, keyless
    /// DuckDuckGo second, synthetic terminal.
    pub fn standard(config: &SearchConfig) -> Self {
        Self::new(vec![
            Box::new(GoogleSearchProvider::new(config)),
            Box::new(DuckDuckGoProvider::new()),
        ])
    }

    /// Try providers in priority order; never fails. When every live provider
    /// is skipped or errors, the synthetic generator answers and the last
    /// failure is attached as a note.
    pub async fn run(&self, query: &str) -> ProviderResult {
        ensure_metrics_described();

        let mut last_failure: Option<String> = None;

        for provider in &self.providers {
            if !provider.is_configured() {
                tracing::debug!(provider = provider.name(), "provider not configured, skipping");
                counter!("search_provider_skips_total").increment(1);
                continue;
            }

            counter!("search_attempts_total").increment(1);
            let t0 = std::time::Instant::now();
            match provider.search(query).await {
                Ok(result) => {
                    histogram!("search_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
                    tracing::info!(
                        provider = provider.name(),
                        hits = result.hits.len(),
                        "search succeeded"
                    );
                    return result;
                }
                // Late credential discovery counts as a skip, not a failure.
                Err(SearchError::MissingCredentials) => {
                    counter!("search_provider_skips_total").increment(1);
                }
                Err(e) => {
                    tracing::warn!(provider = provider.name(), error = %e, "provider failed");
                    counter!("search_provider_errors_total").increment(1);
                    last_failure = Some(format!("{}: {e}", provider.name()));
                }
            }
        }

        counter!("search_fallback_total").increment(1);
        let mut result = self.synthetic.generate(query);
        result.note = Some(match last_failure {
            Some(failure) => format!("all live providers failed; last error from {failure}"),
            None => "no live search provider configured".to_string(),
        });
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_snippet_decodes_strips_and_collapses() {
        let s = "  Fed&nbsp;holds <b>rates</b>   steady  ";
        assert_eq!(normalize_snippet(s), "Fed holds rates steady");
    }

    #[test]
    fn themes_come_from_headlines_in_order() {
        let result = ProviderResult::new(
            "q",
            vec![
                SearchHit {
                    headline: "Record Eclipse Draws Crowds".into(),
                    source: "s".into(),
                    snippet: "".into(),
                },
                SearchHit {
                    headline: "Eclipse Crowds Surge Again Today".into(),
                    source: "s".into(),
                    snippet: "".into(),
                },
            ],
            "summary",
            "google",
        );
        let themes = identify_themes(&result);
        assert_eq!(themes, vec!["record", "eclipse", "draws", "crowds", "surge"]);
    }

    #[test]
    fn themes_fall_back_when_headlines_are_empty() {
        let result = ProviderResult::new("q", Vec::new(), "summary", "google");
        assert_eq!(identify_themes(&result), vec!["trending", "news", "popular"]);
    }
}
