// src/search/fallback.rs
//! Terminal synthetic generator. Never fails: fabricates deterministic
//! placeholder content so the chain's contract stays total. Everything it
//! returns is tagged with the "fallback" provenance marker.

use crate::error::SearchError;
use crate::search::types::{ProviderResult, SearchHit, SearchProvider};

const SPORT_WORDS: [&str; 4] = ["sport", "game", "player", "team"];

#[derive(Debug, Default, Clone)]
pub struct SyntheticProvider;

impl SyntheticProvider {
    pub fn new() -> Self {
        Self
    }

    /// Fabricate placeholder content from the query's leading term.
    /// Deterministic: identical queries produce identical results.
    pub fn generate(&self, query: &str) -> ProviderResult {
        let main_topic = query.split_whitespace().next().unwrap_or("topic");
        let title = capitalize(main_topic);

        let headlines = [
            format!("{title} Makes Headlines in Major Development"),
            format!("Breaking: Latest Updates on {title} Situation"),
            format!("Analysis: Why {title} is Trending Across Platforms"),
        ];
        let sources = if looks_like_sports(query) {
            ["espn.com", "reuters.com", "ap.org"]
        } else {
            ["cnn.com", "bbc.com", "reuters.com"]
        };

        let hits = headlines
            .into_iter()
            .zip(sources)
            .map(|(headline, source)| SearchHit {
                snippet: format!("Coverage of {title} across major outlets."),
                headline,
                source: source.to_string(),
            })
            .collect();

        let summary = format!(
            "Multiple sources reporting on {title} with significant coverage across news and social media platforms."
        );

        ProviderResult::new(query, hits, summary, "fallback")
    }
}

#[async_trait::async_trait]
impl SearchProvider for SyntheticProvider {
    async fn search(&self, query: &str) -> Result<ProviderResult, SearchError> {
        Ok(self.generate(query))
    }

    fn name(&self) -> &'static str {
        "fallback"
    }
}

fn looks_like_sports(query: &str) -> bool {
    let lower = query.to_ascii_lowercase();
    SPORT_WORDS.iter().any(|w| lower.contains(w))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
