//! # Core Type Definitions
//!
//! Shared vocabulary for the metric graph and effect engine:
//! - The seven tracked metric names and their improvement directions
//! - Graph enums (tier, domain, edge direction/strength/kind)
//! - Effect confidence levels
//! - Error taxonomy (`VitalError`)
//!
//! All enums use explicit serde renames so the JSON wire shape matches the
//! stored document exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// METRIC NAMES
// =============================================================================

/// The seven directly tracked (core-tier) metrics.
///
/// Supporting-tier graph nodes are context only and never carry a logged
/// value; anything outside this enum cannot appear in a metric record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    Weight,
    BodyFat,
    Vo2Max,
    Rhr,
    Hrv,
    Sleep,
    Stress,
}

impl MetricName {
    /// All metrics in canonical display order.
    pub const ALL: [MetricName; 7] = [
        MetricName::Weight,
        MetricName::BodyFat,
        MetricName::Vo2Max,
        MetricName::Rhr,
        MetricName::Hrv,
        MetricName::Sleep,
        MetricName::Stress,
    ];

    /// The stable slug used in documents, graph node ids, and the API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            MetricName::Weight => "weight",
            MetricName::BodyFat => "body_fat",
            MetricName::Vo2Max => "vo2_max",
            MetricName::Rhr => "rhr",
            MetricName::Hrv => "hrv",
            MetricName::Sleep => "sleep",
            MetricName::Stress => "stress",
        }
    }

    /// Parse a slug. Returns `None` for anything outside the seven metrics.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        MetricName::ALL.into_iter().find(|m| m.as_str() == value)
    }

    /// Which way a delta counts as progress for this metric.
    #[must_use]
    pub const fn improvement_direction(self) -> ImprovementDirection {
        match self {
            MetricName::Vo2Max | MetricName::Hrv | MetricName::Sleep => {
                ImprovementDirection::Higher
            }
            MetricName::Weight | MetricName::BodyFat | MetricName::Rhr | MetricName::Stress => {
                ImprovementDirection::Lower
            }
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a higher or a lower reading counts as improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImprovementDirection {
    Higher,
    Lower,
}

// =============================================================================
// UNITS
// =============================================================================

/// User-selectable mass unit for the weight metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

impl WeightUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
        }
    }

    /// Parse "kg" / "lbs". Returns `None` for non-mass units.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "kg" => Some(WeightUnit::Kg),
            "lbs" => Some(WeightUnit::Lbs),
            _ => None,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GRAPH ENUMS
// =============================================================================

/// Node tier: core nodes map 1:1 to tracked metrics, supporting nodes are
/// context only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeTier {
    Core,
    Supporting,
}

/// Physiological system a graph node belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Cardiovascular,
    Respiratory,
    Nervous,
    Metabolic,
    Musculoskeletal,
    Recovery,
}

impl Domain {
    /// Parse a lowercase domain slug.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cardiovascular" => Some(Domain::Cardiovascular),
            "respiratory" => Some(Domain::Respiratory),
            "nervous" => Some(Domain::Nervous),
            "metabolic" => Some(Domain::Metabolic),
            "musculoskeletal" => Some(Domain::Musculoskeletal),
            "recovery" => Some(Domain::Recovery),
            _ => None,
        }
    }
}

/// Sign of a relationship: source up moves target up (direct) or down
/// (inverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeDirection {
    Direct,
    Inverse,
}

/// Qualitative effect strength of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStrength {
    Low,
    Moderate,
    High,
}

impl EdgeStrength {
    /// Numeric weight used by impact ranking (low=1, moderate=2, high=3).
    #[must_use]
    pub const fn score(self) -> f64 {
        match self {
            EdgeStrength::Low => 1.0,
            EdgeStrength::Moderate => 2.0,
            EdgeStrength::High => 3.0,
        }
    }
}

/// Whether an edge claims causation or mere correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Causal,
    Correlative,
}

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Confidence level attached to an intervention effect.
///
/// Ordered `Low < Moderate < High` so the highest contributing confidence
/// can be picked with `max`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Moderate,
    High,
}

impl Confidence {
    /// Parse a lowercase confidence slug.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Confidence::Low),
            "moderate" => Some(Confidence::Moderate),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the engine and the state store.
///
/// All variants except `Io`/`Serialization` are local, recoverable
/// conditions the caller is expected to translate into a user-visible
/// message. `Concurrency` means a relational commit could not complete and
/// the mutation should be retried, never silently swallowed.
#[derive(Debug, Error)]
pub enum VitalError {
    /// Targeted lookup of a graph node/edge or intervention id failed.
    #[error("not found: {0}")]
    NotFound(String),

    /// Duplicate node/edge id on creation.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Edge references a node absent from the merged set.
    #[error("invalid endpoints: {0}")]
    InvalidEndpoints(String),

    /// Malformed create/import payload. For batch imports the message
    /// carries positional context (`metrics[i]: …`, `edges[j]: …`).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Relational backend transaction could not be committed; retry.
    #[error("concurrent mutation failed: {0}")]
    Concurrency(String),

    /// Backend I/O failure (file unreadable, transaction aborted).
    #[error("I/O error: {0}")]
    Io(String),

    /// Document could not be encoded/decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_name_round_trips_through_slug() {
        for metric in MetricName::ALL {
            assert_eq!(MetricName::parse(metric.as_str()), Some(metric));
        }
        assert_eq!(MetricName::parse("steps"), None);
    }

    #[test]
    fn improvement_directions_match_catalog() {
        assert_eq!(
            MetricName::Vo2Max.improvement_direction(),
            ImprovementDirection::Higher
        );
        assert_eq!(
            MetricName::Weight.improvement_direction(),
            ImprovementDirection::Lower
        );
        assert_eq!(
            MetricName::Sleep.improvement_direction(),
            ImprovementDirection::Higher
        );
        assert_eq!(
            MetricName::Stress.improvement_direction(),
            ImprovementDirection::Lower
        );
    }

    #[test]
    fn confidence_orders_low_to_high() {
        assert!(Confidence::Low < Confidence::Moderate);
        assert!(Confidence::Moderate < Confidence::High);
        assert_eq!(
            [Confidence::Moderate, Confidence::High, Confidence::Low]
                .into_iter()
                .max(),
            Some(Confidence::High)
        );
    }

    #[test]
    fn serde_uses_snake_case_slugs() {
        let json = serde_json::to_string(&MetricName::BodyFat).expect("serialize");
        assert_eq!(json, "\"body_fat\"");
        let unit: WeightUnit = serde_json::from_str("\"lbs\"").expect("deserialize");
        assert_eq!(unit, WeightUnit::Lbs);
    }
}
