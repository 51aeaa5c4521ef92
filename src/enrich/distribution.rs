// src/enrich/distribution.rs
//! Local, model-free popularity breakdowns. Equal weight across each known
//! dimension list; always available even when every external service is down.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::snapshot::TopicSnapshot;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistributionData {
    pub category_breakdown: BTreeMap<String, f64>,
    pub business_breakdown: BTreeMap<String, f64>,
    pub geographic_breakdown: BTreeMap<String, f64>,
    pub stat_type_breakdown: BTreeMap<String, f64>,
}

/// Equal-weight percentage breakdowns over the snapshot's dimension lists.
/// Empty lists produce empty maps rather than dividing by zero.
pub fn equal_weight_breakdowns(snapshot: &TopicSnapshot) -> DistributionData {
    DistributionData {
        category_breakdown: BTreeMap::from([(snapshot.category.clone(), 100.0)]),
        business_breakdown: BTreeMap::from([(snapshot.business.clone(), 100.0)]),
        geographic_breakdown: equal_shares(&snapshot.top_regions),
        stat_type_breakdown: equal_shares(&snapshot.stat_types),
    }
}

fn equal_shares(keys: &[String]) -> BTreeMap<String, f64> {
    if keys.is_empty() {
        return BTreeMap::new();
    }
    let share = 100.0 / keys.len() as f64;
    keys.iter().map(|k| (k.clone(), share)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{TimeRange, TopicRecord};

    fn snapshot() -> TopicSnapshot {
        TopicSnapshot::from_record(
            1,
            TopicRecord {
                name: "Example".into(),
                category: "sports".into(),
                business: "media".into(),
            },
            TimeRange::Last24h,
        )
    }

    #[test]
    fn single_dimensions_get_the_full_hundred() {
        let data = equal_weight_breakdowns(&snapshot());
        assert_eq!(data.category_breakdown["sports"], 100.0);
        assert_eq!(data.business_breakdown["media"], 100.0);
    }

    #[test]
    fn list_dimensions_split_evenly() {
        let data = equal_weight_breakdowns(&snapshot());
        assert_eq!(data.geographic_breakdown.len(), 2);
        assert_eq!(data.geographic_breakdown["US-PA"], 50.0);
        assert_eq!(data.geographic_breakdown["US-TX"], 50.0);
        assert_eq!(data.stat_type_breakdown["mentions"], 50.0);
    }

    #[test]
    fn empty_lists_do_not_divide_by_zero() {
        let mut snap = snapshot();
        snap.top_regions.clear();
        let data = equal_weight_breakdowns(&snap);
        assert!(data.geographic_breakdown.is_empty());
    }
}
