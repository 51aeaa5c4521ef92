// src/search/google.rs
//! Google Custom Search backend: primary, credentialed provider.

use std::time::Duration;

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::search::normalize_snippet;
use crate::search::types::{ProviderResult, SearchHit, SearchProvider};

const ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    items: Vec<GoogleItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleItem {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

pub struct GoogleSearchProvider {
    http: reqwest::Client,
    api_key: String,
    cse_id: String,
}

impl GoogleSearchProvider {
    pub fn new(config: &SearchConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("trending-topic-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self {
            http,
            api_key: config.google_api_key.clone(),
            cse_id: config.google_cse_id.clone(),
        }
    }

    fn normalize(query: &str, body: GoogleResponse) -> ProviderResult {
        let mut hits = Vec::with_capacity(body.items.len());
        for item in body.items {
            let headline = normalize_snippet(item.title.as_deref().unwrap_or_default());
            let snippet = normalize_snippet(item.snippet.as_deref().unwrap_or_default());
            if headline.is_empty() && snippet.is_empty() {
                continue;
            }
            hits.push(SearchHit {
                headline,
                source: item.link.unwrap_or_default(),
                snippet,
            });
        }

        let summary = if hits.is_empty() {
            format!("Google search results for {query}")
        } else {
            hits.iter()
                .take(3)
                .map(|h| h.snippet.as_str())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        };

        ProviderResult::new(query, hits, summary, "google")
    }
}

#[async_trait::async_trait]
impl SearchProvider for GoogleSearchProvider {
    fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.cse_id.is_empty()
    }

    async fn search(&self, query: &str) -> Result<ProviderResult, SearchError> {
        if !self.is_configured() {
            return Err(SearchError::MissingCredentials);
        }

        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", "5"),
                ("safe", "medium"),
                // favor the past week for trending content
                ("dateRestrict", "w1"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SearchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let parsed: GoogleResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Malformed(format!("google payload: {e}")))?;

        Ok(Self::normalize(query, parsed))
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
