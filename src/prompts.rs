// src/prompts.rs
//! Prompt builders for the analysis calls. The wording is plumbing, not
//! contract: stages key off the structured response schemas, not off any
//! phrase here.

use crate::enrich::distribution::DistributionData;
use crate::search::ProviderResult;
use crate::snapshot::TopicSnapshot;

pub fn trending_analysis(snapshot: &TopicSnapshot, narrative: &str, themes: &[String]) -> String {
    format!(
        r#"You are an expert trending topics analyst. Analyze why this topic is trending.

TOPIC TRENDING DATA:
- Topic Name: {name}
- Category: {category}
- Business Vertical: {business}
- Current Trend Score: {avg}/100
- Peak Trend Score: {peak}/100
- Total Volume: {volume} interactions
- Geographic Focus: {regions:?}
- Active Countries: {countries:?}
- Stat Types: {stats:?}
- Time Range: {range}

WEB CONTENT CONTEXT:
Content Summary: {narrative}
Key Themes: {themes:?}

Respond with a JSON object containing: "trending_reason" (primary_cause,
specific_event, timing_factor), "content_analysis" (content_type,
story_summary, key_drivers, viral_factors), "trend_patterns" (velocity,
momentum, geographic_insight, demographic_appeal), "business_context"
(category_fit, business_relevance, market_impact) and "prediction"
(trend_duration, peak_prediction, related_trends).

Focus on factual analysis based on the data provided. If web context is
limited, indicate this clearly."#,
        name = snapshot.topic_name,
        category = snapshot.category,
        business = snapshot.business,
        avg = snapshot.avg_trend_score,
        peak = snapshot.peak_trend_score,
        volume = snapshot.total_volume,
        regions = snapshot.top_regions,
        countries = snapshot.countries,
        stats = snapshot.stat_types,
        range = snapshot.time_range.as_token(),
    )
}

pub fn distribution_commentary(data: &DistributionData) -> String {
    format!(
        r#"Analyze the popularity distribution of this trending topic across dimensions.

DISTRIBUTION DATA:
Category Breakdown: {category:?}
Business Breakdown: {business:?}
Geographic Distribution: {geographic:?}
Stat Type Distribution: {stat:?}

Respond with a JSON object containing: "category_analysis"
(dominant_category, cross_category_appeal, category_insights),
"business_analysis" (primary_business, business_crossover,
commercial_potential), "geographic_analysis" (geographic_concentration,
regional_variations, cultural_factors) and "engagement_analysis"
(engagement_types, audience_behavior, growth_patterns)."#,
        category = data.category_breakdown,
        business = data.business_breakdown,
        geographic = data.geographic_breakdown,
        stat = data.stat_type_breakdown,
    )
}

pub fn content_summary(topic_name: &str, category: &str, narrative: &str) -> String {
    format!(
        r#"Create a comprehensive content summary for this trending topic.

TOPIC: {topic_name}
CATEGORY: {category}
WEB CONTENT: {narrative}

Respond with a JSON object containing: "topic_overview" (what_it_is,
why_notable, context), "content_themes" (primary_themes, secondary_themes,
emotional_tone), "stakeholders" (key_people, organizations,
affected_parties), "timeline" (key_events, current_status, what_next) and
"significance" (immediate_impact, broader_implications, historical_context).

Base the summary on factual content. If information is limited, indicate
this clearly."#
    )
}

pub fn narrate_search_results(topic_name: &str, result: &ProviderResult) -> String {
    let headlines: Vec<&str> = result.hits.iter().map(|h| h.headline.as_str()).collect();
    format!(
        r#"Analyze these web search results for the trending topic "{topic_name}".

Headlines: {headlines:?}
Snippets: {snippets}

Write a concise plain-text summary (2-3 sentences) of what specific event or
content is making this topic trend, the main story behind it, and why it
would generate high search interest. Avoid speculation."#,
        snippets = result.content_summary,
    )
}
