//! # Intervention Catalog
//!
//! The built-in interventions a user can stack in a simulation, each a
//! protocol with per-metric expected effects and known contraindication
//! scenarios.

use crate::types::{Confidence, MetricName};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// =============================================================================
// MODELS
// =============================================================================

/// Expected change to a single metric after completing a protocol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterventionEffect {
    pub metric: MetricName,
    /// Signed magnitude. Interpreted per `unit`: `%` on vo2_max/hrv scales
    /// the baseline, everything else adds.
    pub change_value: f64,
    pub unit: String,
    pub confidence: Confidence,
    pub assumptions: String,
    /// Optional `[low, high]` expected outcome band in the same unit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
}

/// A known bad pairing of protocols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contraindication {
    /// Free-text scenario description matched by keyword against the
    /// selected intervention ids.
    pub scenario: String,
    pub warning: String,
}

/// A selectable protocol with expected effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intervention {
    pub id: String,
    pub name: String,
    pub category: String,
    pub duration_weeks: u32,
    pub frequency: String,
    pub description: String,
    pub effects: Vec<InterventionEffect>,
    pub contraindications: Vec<Contraindication>,
}

// =============================================================================
// BUILT-IN CATALOG
// =============================================================================

fn effect(
    metric: MetricName,
    change_value: f64,
    unit: &str,
    confidence: Confidence,
    assumptions: &str,
    range: [f64; 2],
) -> InterventionEffect {
    InterventionEffect {
        metric,
        change_value,
        unit: unit.into(),
        confidence,
        assumptions: assumptions.into(),
        range: Some(range),
    }
}

fn contraindication(scenario: &str, warning: &str) -> Contraindication {
    Contraindication {
        scenario: scenario.into(),
        warning: warning.into(),
    }
}

static INTERVENTIONS: LazyLock<Vec<Intervention>> = LazyLock::new(|| {
    use Confidence::{Low, Moderate};
    use MetricName::{BodyFat, Hrv, Rhr, Sleep, Stress, Vo2Max, Weight};
    vec![
        Intervention {
            id: "weight_training_5x5".into(),
            name: "Weight Training (Starting Strength 5x5)".into(),
            category: "strength".into(),
            duration_weeks: 8,
            frequency: "3x/week".into(),
            description: "Barbell compound training focused on progressive overload for strength and lean mass.".into(),
            effects: vec![
                effect(Weight, 2.3, "kg", Moderate,
                    "Average adherence, sufficient recovery and protein intake.", [1.4, 3.2]),
                effect(BodyFat, -1.0, "%", Low,
                    "Assumes mostly maintenance calories.", [-2.0, 0.0]),
                effect(Vo2Max, 3.0, "%", Low,
                    "Indirect transfer from improved work capacity.", [1.0, 5.0]),
            ],
            contraindications: vec![contraindication(
                "heavy_cardio + weight_training + caloric_deficit",
                "Combining high-volume cardio with strength training in a caloric deficit can impair hypertrophy and recovery. Prioritize sleep and protein intake.",
            )],
        },
        Intervention {
            id: "cardio_moderate_3x".into(),
            name: "Cardio (Moderate Intensity, 3x/week)".into(),
            category: "cardio".into(),
            duration_weeks: 8,
            frequency: "3x/week".into(),
            description: "Zone 2 + moderate interval conditioning for cardiovascular health.".into(),
            effects: vec![
                effect(Weight, -1.8, "kg", Moderate,
                    "No compensatory overeating.", [-2.3, -1.3]),
                effect(Vo2Max, 10.0, "%", Moderate,
                    "Consistent frequency and progressive overload.", [7.0, 12.0]),
                effect(Rhr, -5.0, "bpm", Moderate,
                    "No concurrent illness or overtraining.", [-7.0, -3.0]),
                effect(Hrv, 10.0, "%", Moderate,
                    "Adequate recovery and sleep quality.", [6.0, 14.0]),
            ],
            contraindications: vec![contraindication(
                "heavy_cardio + severe_sleep_debt",
                "High cardio load with chronic sleep debt may worsen stress and blunt recovery.",
            )],
        },
        Intervention {
            id: "diet_500_deficit".into(),
            name: "Diet Intervention (500 kcal/day deficit)".into(),
            category: "diet".into(),
            duration_weeks: 8,
            frequency: "Daily".into(),
            description: "Structured clean eating plan with moderate caloric deficit and high satiety foods.".into(),
            effects: vec![
                effect(Weight, -4.1, "kg", Moderate,
                    "Average adherence around 500 kcal/day deficit.", [-5.4, -3.2]),
                effect(BodyFat, -2.5, "%", Moderate,
                    "Protein intake is maintained.", [-3.2, -1.8]),
                effect(Sleep, 0.0, "hours", Low,
                    "Neutral effect unless hunger disrupts sleep.", [-0.2, 0.2]),
            ],
            contraindications: vec![contraindication(
                "aggressive_deficit + high_training_volume",
                "Combining a large caloric deficit with high training volume can increase fatigue, hunger, and muscle loss risk.",
            )],
        },
        Intervention {
            id: "screen_time_reduction".into(),
            name: "Screen Time Reduction (No screens 1 hour before bed)".into(),
            category: "sleep".into(),
            duration_weeks: 4,
            frequency: "Daily".into(),
            description: "Reduces evening screen exposure to improve sleep onset and recovery.".into(),
            effects: vec![
                effect(Sleep, 0.75, "hours", Moderate,
                    "Consistent digital sunset routine.", [0.5, 1.0]),
                effect(Hrv, 15.0, "%", Moderate,
                    "Sleep quality improves alongside sleep duration.", [10.0, 18.0]),
                effect(Stress, -2.0, "1-10", Moderate,
                    "Reduced cognitive load and better evening wind-down.", [-3.0, -1.0]),
            ],
            contraindications: vec![],
        },
    ]
});

// =============================================================================
// ACCESSORS
// =============================================================================

/// All built-in interventions, in catalog order.
#[must_use]
pub fn builtin_interventions() -> &'static [Intervention] {
    &INTERVENTIONS
}

/// Look up a built-in intervention by id.
#[must_use]
pub fn intervention_by_id(id: &str) -> Option<&'static Intervention> {
    INTERVENTIONS.iter().find(|i| i.id == id)
}

// =============================================================================
// TESTS
// =============================================================================
