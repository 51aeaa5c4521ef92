// src/enrich/report.rs
//! Typed result shapes for the enrichment pipeline. Every analysis section
//! is schema-checked; documents that miss the schema are coerced into
//! best-effort shells at the boundary instead of flowing through untyped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::completion::FallbackShell;
use crate::enrich::distribution::DistributionData;
use crate::search::ProviderResult;

/// Outcome of one analysis stage, merged into the aggregate by field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageOutcome<T> {
    /// The model returned a document matching the stage schema.
    Report(T),
    /// The model responded but not in the stage schema; the shell carries a
    /// best-effort value, `raw_text` the response as received.
    Fallback {
        raw_text: String,
        reason: String,
        shell: T,
    },
    /// The stage failed (transport or unexpected); siblings are unaffected.
    Error { error: String },
}

impl<T> StageOutcome<T> {
    pub fn is_report(&self) -> bool {
        matches!(self, StageOutcome::Report(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StageOutcome::Error { .. })
    }

    /// Reason text for degraded outcomes, `None` for reports.
    pub fn degradation(&self) -> Option<&str> {
        match self {
            StageOutcome::Report(_) => None,
            StageOutcome::Fallback { reason, .. } => Some(reason),
            StageOutcome::Error { error } => Some(error),
        }
    }
}

// ---- Stage 3: trend reasoning ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingReason {
    pub primary_cause: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specific_event: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing_factor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub story_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_drivers: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub viral_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendPatterns {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_insight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographic_appeal: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_fit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_relevance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_impact: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak_prediction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub related_trends: Option<String>,
}

/// Sectioned reasoning about why the topic trends. `trending_reason` anchors
/// the schema: a document without it is coerced to a shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub trending_reason: TrendingReason,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_analysis: Option<ContentAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend_patterns: Option<TrendPatterns>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_context: Option<BusinessContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Prediction>,
}

impl TrendReport {
    pub fn shell(shell: &FallbackShell) -> Self {
        let primary_cause = if shell.excerpt.is_empty() {
            shell.note.clone()
        } else {
            shell.excerpt.clone()
        };
        Self {
            trending_reason: TrendingReason {
                primary_cause,
                specific_event: Some("analysis generated but not in structured form".into()),
                timing_factor: Some("unable to parse structured analysis".into()),
            },
            content_analysis: None,
            trend_patterns: None,
            business_context: None,
            prediction: None,
        }
    }
}

// ---- Stage 4: popularity distribution ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dominant_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cross_category_appeal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_insights: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BusinessAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_business: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_crossover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commercial_potential: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_concentration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regional_variations: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_factors: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_types: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience_behavior: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_patterns: Option<String>,
}

/// Qualitative commentary on the local breakdowns. `category_analysis`
/// anchors the schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionCommentary {
    pub category_analysis: CategoryAnalysis,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_analysis: Option<BusinessAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_analysis: Option<GeographicAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_analysis: Option<EngagementAnalysis>,
}

impl DistributionCommentary {
    pub fn shell(shell: &FallbackShell) -> Self {
        let note = if shell.excerpt.is_empty() {
            shell.note.clone()
        } else {
            shell.excerpt.clone()
        };
        Self {
            category_analysis: CategoryAnalysis {
                category_insights: Some(note),
                ..CategoryAnalysis::default()
            },
            business_analysis: None,
            geographic_analysis: None,
            engagement_analysis: None,
        }
    }
}

/// Stage 4 payload: the numeric breakdowns are computed locally and present
/// even when the commentary call degrades.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionReport {
    pub distribution_data: DistributionData,
    pub commentary: StageOutcome<DistributionCommentary>,
}

// ---- Stage 5: content summary ----

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicOverview {
    pub what_it_is: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_notable: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentThemes {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_themes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_tone: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stakeholders {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_people: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub affected_parties: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_events: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub what_next: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Significance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub immediate_impact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub broader_implications: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_context: Option<String>,
}

/// Stakeholder/timeline/significance summary. `topic_overview` anchors the
/// schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub topic_overview: TopicOverview,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_themes: Option<ContentThemes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stakeholders: Option<Stakeholders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<Timeline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub significance: Option<Significance>,
}

impl SummaryReport {
    pub fn shell(topic_name: &str, category: &str, shell: &FallbackShell) -> Self {
        let why_notable = if shell.excerpt.is_empty() {
            shell.note.clone()
        } else {
            shell.excerpt.clone()
        };
        Self {
            topic_overview: TopicOverview {
                what_it_is: format!("Trending topic: {topic_name}"),
                why_notable: Some(why_notable),
                context: Some(format!("Category: {category}")),
            },
            content_themes: None,
            stakeholders: None,
            timeline: None,
            significance: None,
        }
    }
}

// ---- Aggregates ----

/// Web context acquired in stage 2; feeds stages 3 and 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebContext {
    pub search_query: String,
    pub result: ProviderResult,
    pub narrative: String,
    pub key_themes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicIdentity {
    pub topic_id: u64,
    pub topic_name: String,
    pub category: String,
    pub business: String,
    pub analysis_timestamp: DateTime<Utc>,
}

/// Aggregate result of a full enrichment run. Topic identity is always
/// present once the snapshot fetch succeeded, whatever the stages did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub topic: TopicIdentity,
    pub trending_analysis: StageOutcome<TrendReport>,
    pub popularity_distribution: StageOutcome<DistributionReport>,
    pub content_summary: StageOutcome<SummaryReport>,
    pub web_context: WebContext,
    pub snapshot: crate::snapshot::TopicSnapshot,
}

/// Trimmed projection for latency-sensitive callers: stages 1-2 only.
/// Deliberately timestamp-free so identical inputs and identical external
/// responses produce identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsSummary {
    pub topic_name: String,
    pub trend_score: f64,
    pub content_summary: String,
    pub key_themes: Vec<String>,
    pub geographic_focus: Vec<String>,
    pub analysis_type: String,
}
