//! # State Document
//!
//! The aggregate document the state store persists, plus read-side views
//! over it (latest metric per name, weight-unit preference).
//!
//! Unknown document keys survive a load/save cycle only through explicit
//! fields here; everything defaults so an empty `{}` file deserializes to
//! a blank state.

use crate::graph::{CustomEdge, CustomMetricNode};
use crate::types::{MetricName, WeightUnit};
use crate::versions::InterventionVersion;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// RECORDS
// =============================================================================

/// One logged metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricRecord {
    pub id: String,
    pub user_id: String,
    pub metric_name: MetricName,
    pub value: f64,
    pub unit: String,
    #[serde(default)]
    pub note: Option<String>,
    pub recorded_at: String,
    #[serde(default)]
    pub synced_from: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Per-user display preferences. Only the weight unit matters to the
/// engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreference {
    pub id: String,
    pub user_id: String,
    pub weight_unit: WeightUnit,
    pub created_at: String,
    pub updated_at: String,
}

/// The most recent reading of one metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricLatest {
    pub metric_name: MetricName,
    pub value: f64,
    pub unit: String,
}

// =============================================================================
// AGGREGATE DOCUMENT
// =============================================================================

/// Everything the store persists, as one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub metrics: Vec<MetricRecord>,
    #[serde(default)]
    pub user_preferences: Vec<UserPreference>,
    #[serde(default)]
    pub intervention_versions: Vec<InterventionVersion>,
    #[serde(default)]
    pub graph_custom_metrics: Vec<CustomMetricNode>,
    #[serde(default)]
    pub graph_custom_edges: Vec<CustomEdge>,
}

impl AppState {
    /// Latest reading per metric for a user, in canonical metric order.
    ///
    /// Ties on `recordedAt` keep the earlier record, matching strict
    /// greater-than comparison on insert.
    #[must_use]
    pub fn latest_metrics(&self, user_id: &str) -> Vec<MetricLatest> {
        let mut latest_by_name: BTreeMap<MetricName, &MetricRecord> = BTreeMap::new();
        for record in self.metrics.iter().filter(|r| r.user_id == user_id) {
            match latest_by_name.get(&record.metric_name) {
                Some(existing) if record.recorded_at <= existing.recorded_at => {}
                _ => {
                    latest_by_name.insert(record.metric_name, record);
                }
            }
        }
        MetricName::ALL
            .into_iter()
            .filter_map(|name| latest_by_name.get(&name))
            .map(|record| MetricLatest {
                metric_name: record.metric_name,
                value: record.value,
                unit: record.unit.clone(),
            })
            .collect()
    }

    /// The user's preferred mass unit, kg when no preference is stored.
    #[must_use]
    pub fn weight_unit_for(&self, user_id: &str) -> WeightUnit {
        self.user_preferences
            .iter()
            .find(|p| p.user_id == user_id)
            .map_or(WeightUnit::default(), |p| p.weight_unit)
    }
}

// =============================================================================
// TIMESTAMPS
// =============================================================================

/// Current instant as an ISO-8601 UTC string with millisecond precision,
/// the stamp format used throughout the document.
#[must_use]
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user: &str, metric: MetricName, value: f64, recorded_at: &str) -> MetricRecord {
        MetricRecord {
            id: format!("{user}-{metric}-{recorded_at}"),
            user_id: user.into(),
            metric_name: metric,
            value,
            unit: "kg".into(),
            note: None,
            recorded_at: recorded_at.into(),
            synced_from: None,
            created_at: recorded_at.into(),
            updated_at: recorded_at.into(),
        }
    }

    #[test]
    fn latest_metrics_picks_newest_per_name() {
        let state = AppState {
            metrics: vec![
                record("u1", MetricName::Weight, 82.0, "2026-01-01T00:00:00.000Z"),
                record("u1", MetricName::Weight, 80.5, "2026-02-01T00:00:00.000Z"),
                record("u2", MetricName::Weight, 95.0, "2026-03-01T00:00:00.000Z"),
            ],
            ..AppState::default()
        };
        let latest = state.latest_metrics("u1");
        assert_eq!(latest.len(), 1);
        assert!((latest[0].value - 80.5).abs() < f64::EPSILON);
    }

    #[test]
    fn latest_metrics_follows_canonical_order() {
        let state = AppState {
            metrics: vec![
                record("u1", MetricName::Sleep, 7.0, "2026-01-01T00:00:00.000Z"),
                record("u1", MetricName::Weight, 80.0, "2026-01-01T00:00:00.000Z"),
            ],
            ..AppState::default()
        };
        let names: Vec<MetricName> = state
            .latest_metrics("u1")
            .into_iter()
            .map(|l| l.metric_name)
            .collect();
        assert_eq!(names, [MetricName::Weight, MetricName::Sleep]);
    }

    #[test]
    fn weight_unit_defaults_to_kg() {
        let state = AppState::default();
        assert_eq!(state.weight_unit_for("nobody"), WeightUnit::Kg);
    }

    #[test]
    fn empty_document_deserializes_to_blank_state() {
        let state: AppState = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn now_iso_uses_millisecond_utc() {
        let stamp = now_iso();
        assert!(stamp.ends_with('Z'));
        assert_eq!(stamp.len(), "2026-08-26T00:00:00.000Z".len());
    }
}
