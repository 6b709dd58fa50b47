//! # Effect Engine
//!
//! Pure simulation of an intervention stack against a user's latest metric
//! values: unit normalization, sequential effect application, direction and
//! confidence classification per metric.
//!
//! Effects compound: each one is applied against the already-updated
//! predicted value, intervention by intervention, in selection order.

use crate::catalog::METRIC_DEFINITIONS;
use crate::conflicts::ConflictDetector;
use crate::interventions::{Intervention, InterventionEffect, intervention_by_id};
use crate::state::MetricLatest;
use crate::types::{Confidence, ImprovementDirection, MetricName, WeightUnit};
use serde::Serialize;
use std::collections::BTreeMap;

/// 1 kg expressed in pounds.
const LBS_PER_KG: f64 = 2.204_62;

/// Deltas below this magnitude classify as unchanged.
const DIRECTION_EPSILON: f64 = 0.001;

// =============================================================================
// UNIT CONVERSION
// =============================================================================

/// Convert a mass value between kg and lbs.
#[must_use]
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lbs) => value * LBS_PER_KG,
        (WeightUnit::Lbs, WeightUnit::Kg) => value / LBS_PER_KG,
        _ => value,
    }
}

/// Express an effect's magnitude in the unit the metric is currently
/// tracked in.
///
/// Weight effects convert between mass units; a `%` effect on vo2_max or
/// hrv becomes a fraction of baseline; everything else passes through.
#[must_use]
pub fn normalize_effect(
    metric: MetricName,
    effect: &InterventionEffect,
    current_unit: &str,
    weight_unit: WeightUnit,
) -> f64 {
    if metric == MetricName::Weight {
        if effect.unit == current_unit {
            return effect.change_value;
        }
        if let Some(from) = WeightUnit::parse(&effect.unit) {
            if let Some(to) = WeightUnit::parse(current_unit) {
                return convert_weight(effect.change_value, from, to);
            }
            return convert_weight(effect.change_value, from, weight_unit);
        }
        return effect.change_value;
    }
    if effect.unit == "%" && relative_percent_metric(metric) {
        return effect.change_value / 100.0;
    }
    effect.change_value
}

/// Apply one effect to a baseline value.
#[must_use]
pub fn apply_effect(
    metric: MetricName,
    baseline: f64,
    effect: &InterventionEffect,
    current_unit: &str,
    weight_unit: WeightUnit,
) -> f64 {
    let normalized = normalize_effect(metric, effect, current_unit, weight_unit);
    if effect.unit == "%" && relative_percent_metric(metric) {
        baseline * (1.0 + normalized)
    } else {
        baseline + normalized
    }
}

/// Metrics where a `%` unit scales the baseline instead of adding points.
const fn relative_percent_metric(metric: MetricName) -> bool {
    matches!(metric, MetricName::Vo2Max | MetricName::Hrv)
}

// =============================================================================
// SIMULATION RESULT
// =============================================================================

/// Whether a predicted delta moves the metric in its improving direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeDirection {
    Improved,
    Worsened,
    Unchanged,
}

/// One metric's row of the simulation table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRow {
    pub metric_name: MetricName,
    pub metric_label: &'static str,
    pub current: f64,
    pub predicted: f64,
    pub delta: f64,
    pub confidence: Confidence,
    pub direction: ChangeDirection,
}

/// Full outcome of simulating a stack of interventions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub current: BTreeMap<MetricName, f64>,
    pub predicted: BTreeMap<MetricName, f64>,
    pub table: Vec<SimulationRow>,
    pub warnings: Vec<String>,
    pub interventions: Vec<Intervention>,
}

// =============================================================================
// STACK SIMULATION
// =============================================================================

/// Simulate the selected interventions against the latest recorded values.
///
/// Unknown ids are dropped; selection order is preserved and determines
/// compounding order. A metric never logged starts from 0. Per-metric
/// confidence is the highest among its contributing effects, defaulting to
/// moderate when nothing targeted the metric.
#[must_use]
pub fn simulate_stack(
    latest_metrics: &[MetricLatest],
    selected_ids: &[String],
    weight_unit: WeightUnit,
    detector: &dyn ConflictDetector,
) -> SimulationResult {
    let selected: Vec<&Intervention> = selected_ids
        .iter()
        .filter_map(|id| intervention_by_id(id))
        .collect();

    let latest_by_metric: BTreeMap<MetricName, &MetricLatest> = latest_metrics
        .iter()
        .map(|entry| (entry.metric_name, entry))
        .collect();

    let mut current: BTreeMap<MetricName, f64> = BTreeMap::new();
    let mut predicted: BTreeMap<MetricName, f64> = BTreeMap::new();
    for definition in &METRIC_DEFINITIONS {
        let value = latest_by_metric.get(&definition.key).map_or(0.0, |l| l.value);
        current.insert(definition.key, value);
        predicted.insert(definition.key, value);
    }

    for intervention in &selected {
        for effect in &intervention.effects {
            let current_unit = latest_by_metric
                .get(&effect.metric)
                .map(|l| l.unit.as_str())
                .unwrap_or_else(|| {
                    if effect.metric == MetricName::Weight {
                        weight_unit.as_str()
                    } else {
                        effect.unit.as_str()
                    }
                });
            let baseline = predicted.get(&effect.metric).copied().unwrap_or(0.0);
            predicted.insert(
                effect.metric,
                apply_effect(effect.metric, baseline, effect, current_unit, weight_unit),
            );
        }
    }

    let warnings = detector.detect(&selected);

    let table = METRIC_DEFINITIONS
        .iter()
        .map(|definition| {
            let baseline = current.get(&definition.key).copied().unwrap_or(0.0);
            let next = predicted.get(&definition.key).copied().unwrap_or(0.0);
            let delta = next - baseline;
            SimulationRow {
                metric_name: definition.key,
                metric_label: definition.label,
                current: baseline,
                predicted: next,
                delta,
                confidence: metric_confidence(definition.key, &selected),
                direction: classify_direction(definition.key, delta),
            }
        })
        .collect();

    SimulationResult {
        current,
        predicted,
        table,
        warnings,
        interventions: selected.into_iter().cloned().collect(),
    }
}

/// Highest confidence among effects targeting `metric`, moderate if none.
fn metric_confidence(metric: MetricName, selected: &[&Intervention]) -> Confidence {
    selected
        .iter()
        .flat_map(|i| i.effects.iter())
        .filter(|e| e.metric == metric)
        .map(|e| e.confidence)
        .max()
        .unwrap_or(Confidence::Moderate)
}

fn classify_direction(metric: MetricName, delta: f64) -> ChangeDirection {
    if delta.abs() < DIRECTION_EPSILON {
        return ChangeDirection::Unchanged;
    }
    let improved = match metric.improvement_direction() {
        ImprovementDirection::Lower => delta < 0.0,
        ImprovementDirection::Higher => delta > 0.0,
    };
    if improved {
        ChangeDirection::Improved
    } else {
        ChangeDirection::Worsened
    }
}

// =============================================================================
// TESTS
// =============================================================================
