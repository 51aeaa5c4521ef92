//! Demo that runs one full enrichment against an in-memory topic store.
//! Live search/model calls happen only when credentials are present in the
//! environment; otherwise the run shows the degraded (fallback) path.

use std::sync::Arc;

use trending_topic_analyzer::completion::OpenAiCompletion;
use trending_topic_analyzer::config::EnrichmentConfig;
use trending_topic_analyzer::{
    EnrichmentOrchestrator, InMemoryStore, ProviderChain, StructuredCompletion, TimeRange,
    TopicRecord,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = EnrichmentConfig::from_env();

    let store = InMemoryStore::new().with_topic(
        42,
        TopicRecord {
            name: "Example Topic".into(),
            category: "sports".into(),
            business: "media".into(),
        },
    );

    let orchestrator = EnrichmentOrchestrator::new(
        Arc::new(store),
        ProviderChain::standard(&config.search),
        StructuredCompletion::new(Arc::new(OpenAiCompletion::new(&config.model))),
    );

    let time_range = TimeRange::parse(
        &std::env::args().nth(1).unwrap_or_else(|| "24h".to_string()),
    );
    let result = orchestrator.analyze_topic(42, time_range).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
