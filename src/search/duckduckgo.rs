// src/search/duckduckgo.rs
//! DuckDuckGo Instant Answers backend: keyless secondary provider. Coverage
//! is thinner than a full search API, but it needs no credentials.

use std::time::Duration;

use serde::Deserialize;

use crate::error::SearchError;
use crate::search::normalize_snippet;
use crate::search::types::{ProviderResult, SearchHit, SearchProvider};

const ENDPOINT: &str = "https://api.duckduckgo.com/";

#[derive(Debug, Deserialize)]
struct DdgResponse {
    #[serde(rename = "Abstract", default)]
    abstract_text: String,
    #[serde(rename = "RelatedTopics", default)]
    related_topics: Vec<DdgTopic>,
}

#[derive(Debug, Deserialize)]
struct DdgTopic {
    #[serde(rename = "Text")]
    text: Option<String>,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
}

pub struct DuckDuckGoProvider {
    http: reqwest::Client,
}

impl Default for DuckDuckGoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DuckDuckGoProvider {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .user_agent("trending-topic-analyzer/0.1")
            .connect_timeout(Duration::from_secs(4))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("reqwest client");
        Self { http }
    }

    fn normalize(query: &str, body: DdgResponse) -> ProviderResult {
        let mut hits = Vec::new();
        for topic in body.related_topics.into_iter().take(3) {
            let text = normalize_snippet(topic.text.as_deref().unwrap_or_default());
            if text.is_empty() {
                continue;
            }
            hits.push(SearchHit {
                headline: text.clone(),
                source: topic.first_url.unwrap_or_else(|| "duckduckgo.com".into()),
                snippet: text,
            });
        }

        let abstract_text = normalize_snippet(&body.abstract_text);
        let summary = if abstract_text.is_empty() {
            format!("Information about {query}")
        } else {
            abstract_text
        };

        ProviderResult::new(query, hits, summary, "duckduckgo")
    }
}

#[async_trait::async_trait]
impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str) -> Result<ProviderResult, SearchError> {
        let resp = self
            .http
            .get(ENDPOINT)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SearchError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let parsed: DdgResponse = serde_json::from_str(&body)
            .map_err(|e| SearchError::Malformed(format!("duckduckgo payload: {e}")))?;

        Ok(Self::normalize(query, parsed))
    }

    fn name(&self) -> &'static str {
        "duckduckgo"
    }
}
