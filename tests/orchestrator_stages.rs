// tests/orchestrator_stages.rs
// Stage isolation and short-circuit behavior of the full pipeline, driven
// through injected test doubles for store, search, and completion.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use trending_topic_analyzer::completion::{
    CompletionClient, CompletionRequest, StructuredCompletion, UNAVAILABLE_MARKER,
};
use trending_topic_analyzer::enrich::{EnrichmentOrchestrator, StageOutcome};
use trending_topic_analyzer::error::{CompletionError, EnrichmentError, SearchError};
use trending_topic_analyzer::search::{ProviderChain, ProviderResult, SearchProvider};
use trending_topic_analyzer::{InMemoryStore, TimeRange, TopicRecord};

const NARRATION: &str =
    "Example Topic is trending after an overtime playoff win that dominated coverage.";
const TREND_JSON: &str = r#"{"trending_reason":{"primary_cause":"Playoff upset drove coverage","specific_event":"Semifinal overtime win","timing_factor":"Game ended last night"},"trend_patterns":{"velocity":"rapid","momentum":"accelerating"}}"#;
const DISTRIBUTION_JSON: &str = r#"{"category_analysis":{"dominant_category":"sports","category_insights":"Single-category topic"},"engagement_analysis":{"engagement_types":"search volume and mentions"}}"#;
const SUMMARY_JSON: &str = r#"{"topic_overview":{"what_it_is":"A playoff series","why_notable":"Overtime finish","context":"Sports"},"stakeholders":{"key_people":["Star Player"]}}"#;

#[derive(Clone, Copy)]
enum Script {
    Json(&'static str),
    Prose(&'static str),
    Transport(u16),
}

/// Routes each analysis call by the fixed opening of its prompt.
struct RoutedCompletion {
    available: bool,
    narration: Script,
    trend: Script,
    distribution: Script,
    summary: Script,
    calls: Arc<AtomicUsize>,
}

impl RoutedCompletion {
    fn all_good() -> Self {
        Self {
            available: true,
            narration: Script::Prose(NARRATION),
            trend: Script::Json(TREND_JSON),
            distribution: Script::Json(DISTRIBUTION_JSON),
            summary: Script::Json(SUMMARY_JSON),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn wrap(self) -> (StructuredCompletion, Arc<AtomicUsize>) {
        let calls = self.calls.clone();
        (StructuredCompletion::new(Arc::new(self)), calls)
    }
}

#[async_trait::async_trait]
impl CompletionClient for RoutedCompletion {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let prompt = request.user.as_str();
        let script = if prompt.contains("web search results") {
            self.narration
        } else if prompt.contains("expert trending topics analyst") {
            self.trend
        } else if prompt.contains("popularity distribution") {
            self.distribution
        } else if prompt.contains("comprehensive content summary") {
            self.summary
        } else {
            panic!("unrecognized prompt routed to completion stub: {prompt}");
        };
        match script {
            Script::Json(t) | Script::Prose(t) => Ok(t.to_string()),
            Script::Transport(code) => Err(CompletionError::Status(code)),
        }
    }

    fn name(&self) -> &'static str {
        "routed-stub"
    }
}

struct CountingProvider {
    calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl SearchProvider for CountingProvider {
    async fn search(&self, query: &str) -> Result<ProviderResult, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ProviderResult::new(
            query,
            Vec::new(),
            "live summary",
            "counting",
        ))
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn example_store() -> InMemoryStore {
    InMemoryStore::new().with_topic(
        42,
        TopicRecord {
            name: "Example Topic".into(),
            category: "sports".into(),
            business: "media".into(),
        },
    )
}

fn orchestrator_with(
    store: InMemoryStore,
    providers: Vec<Box<dyn SearchProvider>>,
    completion: StructuredCompletion,
) -> EnrichmentOrchestrator {
    EnrichmentOrchestrator::new(Arc::new(store), ProviderChain::new(providers), completion)
}

#[tokio::test]
async fn absent_topic_short_circuits_with_no_outbound_calls() {
    let provider_calls = Arc::new(AtomicUsize::new(0));
    let provider = Box::new(CountingProvider {
        calls: provider_calls.clone(),
    });
    let (completion, completion_calls) = RoutedCompletion::all_good().wrap();
    let orchestrator = orchestrator_with(InMemoryStore::new(), vec![provider], completion);

    let err = orchestrator
        .analyze_topic(99, TimeRange::Last24h)
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichmentError::TopicNotFound(99)));

    let err = orchestrator
        .insights_summary(99, TimeRange::Last24h)
        .await
        .unwrap_err();
    assert!(matches!(err, EnrichmentError::TopicNotFound(99)));

    assert_eq!(provider_calls.load(Ordering::SeqCst), 0);
    assert_eq!(completion_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_search_still_produces_a_synthetic_web_context() {
    // no live providers at all: the chain must degrade, not fail
    let (completion, _) = RoutedCompletion::all_good().wrap();
    let orchestrator = orchestrator_with(example_store(), Vec::new(), completion);

    let result = orchestrator
        .analyze_topic(42, TimeRange::Last24h)
        .await
        .unwrap();

    assert_eq!(result.topic.topic_name, "Example Topic");
    assert_eq!(result.web_context.result.provider, "fallback");
    assert!(result.web_context.result.found);
    assert!(!result.web_context.result.content_summary.is_empty());
    assert_eq!(result.web_context.narrative, NARRATION);

    match &result.trending_analysis {
        StageOutcome::Report(report) => {
            assert_eq!(report.trending_reason.primary_cause, "Playoff upset drove coverage");
        }
        other => panic!("expected a report, got {other:?}"),
    }
    assert!(result.content_summary.is_report());
}

#[tokio::test]
async fn trend_stage_failure_does_not_block_siblings() {
    let mut scripted = RoutedCompletion::all_good();
    scripted.trend = Script::Transport(500);
    let (completion, _) = scripted.wrap();
    let orchestrator = orchestrator_with(example_store(), Vec::new(), completion);

    let result = orchestrator
        .analyze_topic(42, TimeRange::Last24h)
        .await
        .unwrap();

    assert!(result.trending_analysis.is_error());
    assert!(result
        .trending_analysis
        .degradation()
        .unwrap()
        .contains("trend analysis failed"));

    // siblings completed and merged by name
    match &result.popularity_distribution {
        StageOutcome::Report(report) => {
            assert_eq!(report.distribution_data.category_breakdown["sports"], 100.0);
            assert!(report.commentary.is_report());
        }
        other => panic!("expected a report, got {other:?}"),
    }
    assert!(result.content_summary.is_report());
    assert_eq!(result.topic.topic_name, "Example Topic");
}

#[tokio::test]
async fn trend_decode_failure_coerces_to_a_shell() {
    let mut scripted = RoutedCompletion::all_good();
    scripted.trend = Script::Prose("The upset is why, honestly.");
    let (completion, _) = scripted.wrap();
    let orchestrator = orchestrator_with(example_store(), Vec::new(), completion);

    let result = orchestrator
        .analyze_topic(42, TimeRange::Last24h)
        .await
        .unwrap();

    match &result.trending_analysis {
        StageOutcome::Fallback {
            raw_text, shell, ..
        } => {
            assert_eq!(raw_text, "The upset is why, honestly.");
            assert_eq!(shell.trending_reason.primary_cause, "The upset is why, honestly.");
        }
        other => panic!("expected a fallback, got {other:?}"),
    }
    assert!(result.content_summary.is_report());
}

#[tokio::test]
async fn unavailable_model_degrades_every_model_stage_but_keeps_local_numbers() {
    let mut scripted = RoutedCompletion::all_good();
    scripted.available = false;
    let (completion, completion_calls) = scripted.wrap();
    let orchestrator = orchestrator_with(example_store(), Vec::new(), completion);

    let result = orchestrator
        .analyze_topic(42, TimeRange::Last24h)
        .await
        .unwrap();

    assert_eq!(completion_calls.load(Ordering::SeqCst), 0);

    // deterministic narrative referencing the topic name
    assert!(result.web_context.narrative.contains("Example Topic"));

    match &result.trending_analysis {
        StageOutcome::Fallback { reason, .. } => assert_eq!(reason, UNAVAILABLE_MARKER),
        other => panic!("expected a fallback, got {other:?}"),
    }
    match &result.content_summary {
        StageOutcome::Fallback { reason, shell, .. } => {
            assert_eq!(reason, UNAVAILABLE_MARKER);
            assert_eq!(shell.topic_overview.what_it_is, "Trending topic: Example Topic");
        }
        other => panic!("expected a fallback, got {other:?}"),
    }

    // the numeric breakdowns never depend on the model
    match &result.popularity_distribution {
        StageOutcome::Report(report) => {
            assert_eq!(report.distribution_data.category_breakdown["sports"], 100.0);
            assert_eq!(report.distribution_data.geographic_breakdown.len(), 2);
            match &report.commentary {
                StageOutcome::Fallback { reason, .. } => assert_eq!(reason, UNAVAILABLE_MARKER),
                other => panic!("expected fallback commentary, got {other:?}"),
            }
        }
        other => panic!("expected a report, got {other:?}"),
    }
}
