// src/error.rs
//! Error taxonomy for the enrichment pipeline.
//!
//! Provider- and decode-level failures are absorbed into degraded results and
//! never reach the caller; only `EnrichmentError` is caller-visible.

use thiserror::Error;

/// Failure of a single search-provider attempt. Recorded by the chain for
/// diagnostics, then swallowed as it advances to the next provider.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Expected precondition, not a network failure: the provider is skipped.
    #[error("provider credentials not configured")]
    MissingCredentials,

    #[error("search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("search returned status {0}")]
    Status(u16),

    #[error("malformed search payload: {0}")]
    Malformed(String),
}

/// Transport-level failure of a generation request. Distinct from data-shape
/// problems, which are classified into `CompletionOutcome::Unstructured`.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The client has no credentials; `StructuredCompletion` checks
    /// availability up front, so this only surfaces on direct client use.
    #[error("completion client not configured")]
    Unavailable,

    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion service returned status {0}")]
    Status(u16),
}

/// The only errors that abort a pipeline run. Everything else degrades into
/// stage-local markers inside the result.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("no trending data found for topic id {0}")]
    TopicNotFound(u64),

    #[error("store read failed: {0}")]
    Store(#[source] anyhow::Error),
}
