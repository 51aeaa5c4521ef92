// src/enrich/mod.rs
//! Enrichment orchestrator: snapshot fetch → web context → three independent
//! analysis stages run concurrently and merged by name. A failing stage is
//! isolated at its boundary; only an absent topic aborts the run.

pub mod distribution;
pub mod report;

use std::sync::Arc;

use chrono::Utc;
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::completion::{CompletionOutcome, CompletionRequest, FallbackShell, StructuredCompletion};
use crate::enrich::distribution::equal_weight_breakdowns;
use crate::error::EnrichmentError;
use crate::prompts;
use crate::query::build_search_query;
use crate::search::{identify_themes, ProviderChain, ProviderResult};
use crate::snapshot::{TimeRange, TopicSnapshot};
use crate::store::TopicStore;

pub use crate::enrich::report::{
    DistributionCommentary, DistributionReport, EnrichmentResult, InsightsSummary, StageOutcome,
    SummaryReport, TopicIdentity, TrendReport, WebContext,
};

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("enrich_runs_total", "Full enrichment runs started.");
        describe_counter!("enrich_not_found_total", "Runs aborted on an absent topic.");
        describe_counter!(
            "enrich_stage_failures_total",
            "Analysis stages that ended in a stage-local error."
        );
    });
}

/// Sequences the pipeline over explicit, injectable collaborator handles.
pub struct EnrichmentOrchestrator {
    store: Arc<dyn TopicStore>,
    chain: ProviderChain,
    completion: StructuredCompletion,
}

impl EnrichmentOrchestrator {
    pub fn new(
        store: Arc<dyn TopicStore>,
        chain: ProviderChain,
        completion: StructuredCompletion,
    ) -> Self {
        Self {
            store,
            chain,
            completion,
        }
    }

    /// Full enrichment: all five stages. The result always carries topic
    /// identity once the snapshot fetch succeeded, even if every analysis
    /// stage degraded.
    pub async fn analyze_topic(
        &self,
        topic_id: u64,
        time_range: TimeRange,
    ) -> Result<EnrichmentResult, EnrichmentError> {
        ensure_metrics_described();
        counter!("enrich_runs_total").increment(1);

        let snapshot = self.fetch_snapshot(topic_id, time_range).await?;
        tracing::info!(topic_id, topic = %snapshot.topic_name, "starting enrichment");

        let web = self.fetch_web_context(&snapshot).await;

        // Stages 3-5 share only immutable inputs; merge is by field name, so
        // completion order cannot reorder the output.
        let (trending_analysis, popularity_distribution, content_summary) = tokio::join!(
            self.trend_reasoning(&snapshot, &web),
            self.distribution_reasoning(&snapshot),
            self.content_summary(&snapshot, &web),
        );

        Ok(EnrichmentResult {
            topic: TopicIdentity {
                topic_id,
                topic_name: snapshot.topic_name.clone(),
                category: snapshot.category.clone(),
                business: snapshot.business.clone(),
                analysis_timestamp: Utc::now(),
            },
            trending_analysis,
            popularity_distribution,
            content_summary,
            web_context: web,
            snapshot,
        })
    }

    /// Lightweight variant: stages 1-2 only, projected for latency-sensitive
    /// callers.
    pub async fn insights_summary(
        &self,
        topic_id: u64,
        time_range: TimeRange,
    ) -> Result<InsightsSummary, EnrichmentError> {
        let snapshot = self.fetch_snapshot(topic_id, time_range).await?;
        let web = self.fetch_web_context(&snapshot).await;

        let mut geographic_focus = snapshot.top_regions;
        geographic_focus.truncate(3);

        Ok(InsightsSummary {
            topic_name: snapshot.topic_name,
            trend_score: snapshot.avg_trend_score,
            content_summary: web.narrative,
            key_themes: web.key_themes,
            geographic_focus,
            analysis_type: "summary".to_string(),
        })
    }

    async fn fetch_snapshot(
        &self,
        topic_id: u64,
        time_range: TimeRange,
    ) -> Result<TopicSnapshot, EnrichmentError> {
        let record = self
            .store
            .read(topic_id)
            .await
            .map_err(EnrichmentError::Store)?
            .ok_or_else(|| {
                counter!("enrich_not_found_total").increment(1);
                EnrichmentError::TopicNotFound(topic_id)
            })?;
        Ok(TopicSnapshot::from_record(topic_id, record, time_range))
    }

    /// Stage 2. Total: the chain cannot fail, and a degraded narration call
    /// falls back to a deterministic narrative referencing the topic.
    async fn fetch_web_context(&self, snapshot: &TopicSnapshot) -> WebContext {
        let search_query = build_search_query(
            &snapshot.topic_name,
            &snapshot.category,
            snapshot.time_range.as_token(),
        );
        let result = self.chain.run(&search_query).await;
        let key_themes = identify_themes(&result);
        let narrative = self.narrate(&snapshot.topic_name, &result).await;

        WebContext {
            search_query,
            result,
            narrative,
            key_themes,
        }
    }

    async fn narrate(&self, topic_name: &str, result: &ProviderResult) -> String {
        let request =
            CompletionRequest::user_prompt(prompts::narrate_search_results(topic_name, result));
        match self.completion.request(&request).await {
            // The narration prompt asks for prose, so the usual case is an
            // "unstructured" classification whose raw text is the narrative.
            Ok(CompletionOutcome::Unstructured { raw_text, .. }) if !raw_text.is_empty() => {
                raw_text
            }
            Ok(CompletionOutcome::Structured { fields }) => fields
                .get("summary")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(fields).to_string()),
            Ok(CompletionOutcome::Unstructured { .. }) => fallback_narrative(topic_name),
            Err(e) => {
                tracing::warn!(error = %e, "narration call failed");
                fallback_narrative(topic_name)
            }
        }
    }

    /// Stage 3.
    async fn trend_reasoning(
        &self,
        snapshot: &TopicSnapshot,
        web: &WebContext,
    ) -> StageOutcome<TrendReport> {
        let request = CompletionRequest::user_prompt(prompts::trending_analysis(
            snapshot,
            &web.narrative,
            &web.key_themes,
        ));
        match self.completion.request(&request).await {
            Ok(outcome) => coerce_stage(outcome, TrendReport::shell),
            Err(e) => stage_error("trend_reasoning", format!("trend analysis failed: {e}")),
        }
    }

    /// Stage 4. The numeric breakdowns are local and always present; only
    /// the qualitative commentary depends on the model.
    async fn distribution_reasoning(
        &self,
        snapshot: &TopicSnapshot,
    ) -> StageOutcome<DistributionReport> {
        let distribution_data = equal_weight_breakdowns(snapshot);

        let request =
            CompletionRequest::user_prompt(prompts::distribution_commentary(&distribution_data));
        let commentary = match self.completion.request(&request).await {
            Ok(outcome) => coerce_stage(outcome, DistributionCommentary::shell),
            Err(e) => stage_error(
                "distribution_commentary",
                format!("distribution commentary failed: {e}"),
            ),
        };

        StageOutcome::Report(DistributionReport {
            distribution_data,
            commentary,
        })
    }

    /// Stage 5.
    async fn content_summary(
        &self,
        snapshot: &TopicSnapshot,
        web: &WebContext,
    ) -> StageOutcome<SummaryReport> {
        let request = CompletionRequest::user_prompt(prompts::content_summary(
            &snapshot.topic_name,
            &snapshot.category,
            &web.narrative,
        ));
        let topic_name = snapshot.topic_name.clone();
        let category = snapshot.category.clone();
        match self.completion.request(&request).await {
            Ok(outcome) => coerce_stage(outcome, move |shell| {
                SummaryReport::shell(&topic_name, &category, shell)
            }),
            Err(e) => stage_error("content_summary", format!("content summary failed: {e}")),
        }
    }
}

fn fallback_narrative(topic_name: &str) -> String {
    format!("No model narrative available for {topic_name}; see the provider results.")
}

fn stage_error<T>(stage: &'static str, error: String) -> StageOutcome<T> {
    tracing::warn!(stage, %error, "stage failed, isolating");
    counter!("enrich_stage_failures_total", "stage" => stage).increment(1);
    StageOutcome::Error { error }
}

/// Coerce a completion outcome into a stage outcome: schema-check structured
/// documents, turn everything else into a best-effort shell.
fn coerce_stage<T, F>(outcome: CompletionOutcome, shell_fn: F) -> StageOutcome<T>
where
    T: DeserializeOwned,
    F: FnOnce(&FallbackShell) -> T,
{
    match outcome {
        CompletionOutcome::Structured { fields } => {
            let raw = Value::Object(fields);
            match serde_json::from_value::<T>(raw.clone()) {
                Ok(report) => StageOutcome::Report(report),
                Err(e) => {
                    let raw_text = raw.to_string();
                    let shell = FallbackShell {
                        excerpt: crate::completion::excerpt_of(&raw_text),
                        note: format!("schema mismatch: {e}"),
                    };
                    StageOutcome::Fallback {
                        raw_text,
                        reason: format!("schema mismatch: {e}"),
                        shell: shell_fn(&shell),
                    }
                }
            }
        }
        CompletionOutcome::Unstructured {
            raw_text,
            reason,
            shell,
        } => StageOutcome::Fallback {
            raw_text,
            reason,
            shell: shell_fn(&shell),
        },
    }
}
