// src/search/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// One retrieved content item, normalized across backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub headline: String,
    pub source: String,
    pub snippet: String,
}

/// Normalized search outcome, identical in shape regardless of which backend
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderResult {
    pub query: String,
    pub found: bool,
    pub hits: Vec<SearchHit>,
    pub content_summary: String,
    pub provider: String,
    pub fetched_at: DateTime<Utc>,
    /// Set by the chain when every live provider failed and the synthetic
    /// generator supplied the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ProviderResult {
    /// The only constructor: `found` is derived, keeping the invariant that
    /// it is true iff there are hits or a non-empty summary.
    pub fn new(
        query: impl Into<String>,
        hits: Vec<SearchHit>,
        content_summary: impl Into<String>,
        provider: &'static str,
    ) -> Self {
        let content_summary = content_summary.into();
        let found = !hits.is_empty() || !content_summary.is_empty();
        Self {
            query: query.into(),
            found,
            hits,
            content_summary,
            provider: provider.to_string(),
            fetched_at: Utc::now(),
            note: None,
        }
    }
}

/// One content-retrieval backend in the chain.
#[async_trait::async_trait]
pub trait SearchProvider: Send + Sync {
    /// Preconditions (credentials) supplied via external configuration.
    /// `false` means the chain skips this provider without counting a failure.
    fn is_configured(&self) -> bool {
        true
    }

    async fn search(&self, query: &str) -> Result<ProviderResult, SearchError>;

    fn name(&self) -> &'static str;
}
