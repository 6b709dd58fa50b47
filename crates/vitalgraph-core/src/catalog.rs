//! # Built-in Catalog
//!
//! Immutable seed data created at process start:
//! - The seven metric definitions (labels, default units, plausible ranges)
//! - The built-in graph: 22 nodes (7 core, 15 supporting) and 39 edges
//!
//! Accessors hand out copies; the seed itself is never mutated in place.

use crate::graph::{GraphConfig, MetricEdge, MetricNode};
use crate::types::{
    Domain, EdgeDirection, EdgeKind, EdgeStrength, MetricName, NodeTier, WeightUnit,
};
use std::sync::LazyLock;

// =============================================================================
// METRIC DEFINITIONS
// =============================================================================

/// Static description of a tracked metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricDefinition {
    pub key: MetricName,
    pub label: &'static str,
    pub default_unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
}

/// The seven tracked metrics in canonical order.
pub const METRIC_DEFINITIONS: [MetricDefinition; 7] = [
    MetricDefinition {
        key: MetricName::Weight,
        label: "Weight",
        default_unit: "kg",
        min: 30.0,
        max: 300.0,
        description: "Body mass in kg or lbs.",
    },
    MetricDefinition {
        key: MetricName::BodyFat,
        label: "Body Fat %",
        default_unit: "%",
        min: 2.0,
        max: 70.0,
        description: "Estimated or measured body fat percentage.",
    },
    MetricDefinition {
        key: MetricName::Vo2Max,
        label: "VO2 Max",
        default_unit: "ml/kg/min",
        min: 10.0,
        max: 90.0,
        description: "Aerobic capacity score.",
    },
    MetricDefinition {
        key: MetricName::Rhr,
        label: "Resting Heart Rate",
        default_unit: "bpm",
        min: 30.0,
        max: 130.0,
        description: "Heart beats per minute at rest.",
    },
    MetricDefinition {
        key: MetricName::Hrv,
        label: "Heart Rate Variability",
        default_unit: "ms",
        min: 5.0,
        max: 250.0,
        description: "Variability in heartbeat intervals.",
    },
    MetricDefinition {
        key: MetricName::Sleep,
        label: "Sleep Duration",
        default_unit: "hours",
        min: 0.0,
        max: 16.0,
        description: "Average nightly sleep duration.",
    },
    MetricDefinition {
        key: MetricName::Stress,
        label: "Stress Level",
        default_unit: "1-10",
        min: 1.0,
        max: 10.0,
        description: "Self-reported stress level.",
    },
];

/// Lookup the definition for a metric.
#[must_use]
pub fn metric_definition(metric: MetricName) -> &'static MetricDefinition {
    // ALL and METRIC_DEFINITIONS share the same canonical order.
    &METRIC_DEFINITIONS[metric as usize]
}

/// Display label for a metric.
#[must_use]
pub fn metric_label(metric: MetricName) -> &'static str {
    metric_definition(metric).label
}

/// Unit a new record defaults to. Weight follows the user's preference.
#[must_use]
pub fn default_unit_for(metric: MetricName, weight_unit: WeightUnit) -> &'static str {
    if metric == MetricName::Weight {
        weight_unit.as_str()
    } else {
        metric_definition(metric).default_unit
    }
}

// =============================================================================
// BUILT-IN GRAPH NODES
// =============================================================================

fn node(
    id: &str,
    label: &str,
    x: f64,
    y: f64,
    tier: NodeTier,
    domain: Domain,
    description: &str,
) -> MetricNode {
    MetricNode {
        id: id.into(),
        label: label.into(),
        x,
        y,
        tier,
        domain,
        description: description.into(),
    }
}

static GRAPH_NODES: LazyLock<Vec<MetricNode>> = LazyLock::new(|| {
    use Domain::{Cardiovascular, Metabolic, Musculoskeletal, Nervous, Recovery, Respiratory};
    use NodeTier::{Core, Supporting};
    vec![
        node("weight", "Weight", 220.0, 410.0, Core, Metabolic,
            "Total body mass; interacts with cardiovascular strain, composition, and performance metrics."),
        node("body_fat", "Body Fat %", 390.0, 230.0, Core, Metabolic,
            "Body composition marker tied to metabolic flexibility, aerobic efficiency, and risk profile."),
        node("vo2_max", "VO2 Max", 660.0, 170.0, Core, Respiratory,
            "Integrated cardio-respiratory fitness capacity and a key endurance performance indicator."),
        node("rhr", "Resting HR", 930.0, 230.0, Core, Cardiovascular,
            "Baseline autonomic/cardiovascular load marker that shifts with fitness, stress, and hydration."),
        node("hrv", "HRV", 1100.0, 410.0, Core, Nervous,
            "Autonomic nervous system variability signal, often used as a recovery/readiness proxy."),
        node("sleep", "Sleep", 930.0, 590.0, Core, Recovery,
            "Sleep duration metric linked to cognitive, hormonal, and autonomic recovery outcomes."),
        node("stress", "Stress", 660.0, 650.0, Core, Nervous,
            "Self-reported stress load that strongly influences sleep, recovery, and training response."),
        node("blood_pressure", "Blood Pressure", 1130.0, 250.0, Supporting, Cardiovascular,
            "Hemodynamic pressure marker influenced by vascular tone, fluid balance, and sympathetic load."),
        node("resting_resp_rate", "Resting Resp Rate", 980.0, 90.0, Supporting, Respiratory,
            "Resting respiratory frequency; can increase with stress, illness, poor recovery, or low fitness."),
        node("spo2", "SpO2", 770.0, 70.0, Supporting, Respiratory,
            "Peripheral oxygen saturation, reflecting blood oxygen loading and respiratory efficiency."),
        node("lactate_threshold", "Lactate Threshold", 540.0, 90.0, Supporting, Respiratory,
            "Exercise intensity where lactate accumulation accelerates; key endurance adaptation marker."),
        node("training_load", "Training Load", 1170.0, 560.0, Supporting, Musculoskeletal,
            "Recent internal/external workload aggregate (e.g., sRPE, volume, intensity, monotony)."),
        node("recovery_readiness", "Recovery Readiness", 1010.0, 760.0, Supporting, Recovery,
            "Composite readiness estimate from sleep, HRV, fatigue, soreness, and perceived exertion."),
        node("hydration", "Hydration", 1230.0, 410.0, Supporting, Metabolic,
            "Hydration/electrolyte status proxy that can influence HR, blood pressure, and training capacity."),
        node("glucose_control", "Glucose Control", 360.0, 90.0, Supporting, Metabolic,
            "Insulin sensitivity and glycemic stability proxy linked with adiposity and energy regulation."),
        node("inflammation", "Inflammation", 760.0, 810.0, Supporting, Recovery,
            "Systemic inflammatory load proxy (e.g., soreness, CRP trends, immune stress response)."),
        node("muscle_mass", "Muscle Mass", 220.0, 590.0, Supporting, Musculoskeletal,
            "Lean mass reserve that impacts strength, resting metabolism, and long-term resilience."),
        node("strength_index", "Strength Index", 260.0, 760.0, Supporting, Musculoskeletal,
            "Relative force output trend (e.g., normalized 1RM/isometric metrics)."),
        node("energy_availability", "Energy Availability", 500.0, 780.0, Supporting, Metabolic,
            "Dietary energy remaining after training demand; low values can suppress recovery/hormones."),
        node("hormonal_balance", "Hormonal Balance", 600.0, 810.0, Supporting, Metabolic,
            "Stress/anabolic hormone environment shaping adaptation, mood, and body composition shifts."),
        node("sleep_quality", "Sleep Quality", 940.0, 760.0, Supporting, Recovery,
            "Sleep architecture/restorative quality proxy beyond duration alone."),
        node("mood", "Mood", 680.0, 830.0, Supporting, Nervous,
            "Affective state impacting stress perception, adherence, and recovery behavior."),
    ]
});

// =============================================================================
// BUILT-IN GRAPH EDGES
// =============================================================================

fn edge(
    id: &str,
    source: &str,
    target: &str,
    direction: EdgeDirection,
    effect_strength: EdgeStrength,
    kind: EdgeKind,
    description: &str,
) -> MetricEdge {
    MetricEdge {
        id: id.into(),
        source: source.into(),
        target: target.into(),
        direction,
        effect_strength,
        kind,
        description: description.into(),
    }
}

static GRAPH_EDGES: LazyLock<Vec<MetricEdge>> = LazyLock::new(|| {
    use EdgeDirection::{Direct, Inverse};
    use EdgeKind::{Causal, Correlative};
    use EdgeStrength::{High, Low, Moderate};
    vec![
        edge("sleep_to_hrv", "sleep", "hrv", Direct, High, Causal,
            "More sleep generally improves HRV through improved recovery and autonomic balance."),
        edge("stress_to_sleep", "stress", "sleep", Inverse, High, Causal,
            "Higher stress often shortens sleep duration and worsens sleep quality."),
        edge("stress_to_hrv", "stress", "hrv", Inverse, High, Correlative,
            "Increased stress load is commonly associated with reduced HRV."),
        edge("sleep_to_stress", "sleep", "stress", Inverse, Moderate, Causal,
            "Adequate sleep lowers perceived stress reactivity."),
        edge("vo2_to_rhr", "vo2_max", "rhr", Inverse, High, Correlative,
            "Improved aerobic fitness is associated with lower resting heart rate."),
        edge("vo2_to_hrv", "vo2_max", "hrv", Direct, Moderate, Correlative,
            "Cardiorespiratory fitness can improve HRV over time."),
        edge("weight_to_vo2", "weight", "vo2_max", Inverse, Moderate, Correlative,
            "Higher body weight can reduce relative VO2 max if capacity does not rise proportionally."),
        edge("bodyfat_to_vo2", "body_fat", "vo2_max", Inverse, Moderate, Correlative,
            "Lower body fat generally improves movement efficiency and relative aerobic metrics."),
        edge("bodyfat_to_weight", "body_fat", "weight", Direct, Moderate, Correlative,
            "Body fat contributes directly to total body weight."),
        edge("rhr_to_stress", "rhr", "stress", Direct, Low, Correlative,
            "Elevated resting heart rate can signal sympathetic load and stress."),
        edge("blood_pressure_to_rhr", "blood_pressure", "rhr", Direct, Moderate, Correlative,
            "Higher vascular pressure load often coexists with elevated resting pulse."),
        edge("hydration_to_blood_pressure", "hydration", "blood_pressure", Inverse, Moderate, Causal,
            "Improved fluid/electrolyte balance can reduce transient blood pressure strain."),
        edge("hydration_to_rhr", "hydration", "rhr", Inverse, Low, Correlative,
            "Dehydration can elevate resting heart rate through reduced plasma volume."),
        edge("vo2_to_resting_resp_rate", "vo2_max", "resting_resp_rate", Inverse, Moderate, Correlative,
            "Higher aerobic efficiency is typically associated with lower resting respiratory rate."),
        edge("resting_resp_rate_to_stress", "resting_resp_rate", "stress", Direct, Low, Correlative,
            "Higher resting respiratory rate often tracks with stress or fatigue load."),
        edge("spo2_to_vo2", "spo2", "vo2_max", Direct, Moderate, Correlative,
            "Better oxygen saturation supports aerobic capacity and exercise tolerance."),
        edge("lactate_threshold_to_vo2", "lactate_threshold", "vo2_max", Direct, High, Causal,
            "Threshold improvements often accompany VO2 max and endurance performance gains."),
        edge("training_load_to_inflammation", "training_load", "inflammation", Direct, Moderate, Causal,
            "Accumulated workload can increase inflammatory signals and tissue stress."),
        edge("training_load_to_recovery", "training_load", "recovery_readiness", Inverse, High, Causal,
            "High acute load without recovery tends to reduce readiness."),
        edge("training_load_to_rhr", "training_load", "rhr", Direct, Low, Correlative,
            "Overreaching periods can temporarily elevate resting heart rate."),
        edge("recovery_to_hrv", "recovery_readiness", "hrv", Direct, High, Correlative,
            "Higher readiness states generally align with improved HRV patterns."),
        edge("recovery_to_sleep", "recovery_readiness", "sleep", Direct, Moderate, Correlative,
            "Readiness and sleep quality usually improve together when load is well-managed."),
        edge("sleep_quality_to_sleep", "sleep_quality", "sleep", Direct, High, Correlative,
            "Better sleep architecture tends to accompany stable total sleep duration."),
        edge("sleep_quality_to_hrv", "sleep_quality", "hrv", Direct, Moderate, Correlative,
            "High-quality sleep typically yields stronger parasympathetic recovery signatures."),
        edge("stress_to_sleep_quality", "stress", "sleep_quality", Inverse, High, Causal,
            "Higher stress frequently fragments sleep and lowers restorative depth."),
        edge("inflammation_to_hrv", "inflammation", "hrv", Inverse, Moderate, Correlative,
            "Inflammatory load is often associated with suppressed HRV."),
        edge("inflammation_to_sleep_quality", "inflammation", "sleep_quality", Inverse, Moderate, Correlative,
            "Elevated inflammatory burden can impair sleep continuity and quality."),
        edge("glucose_to_bodyfat", "glucose_control", "body_fat", Inverse, Moderate, Correlative,
            "Improved glucose control is generally associated with lower body fat trends."),
        edge("bodyfat_to_glucose", "body_fat", "glucose_control", Inverse, High, Correlative,
            "Higher body fat can worsen insulin sensitivity and glycemic regulation."),
        edge("energy_to_hormonal", "energy_availability", "hormonal_balance", Direct, High, Causal,
            "Sufficient energy availability supports stable endocrine function and adaptation."),
        edge("energy_to_recovery", "energy_availability", "recovery_readiness", Direct, Moderate, Correlative,
            "Fueling adequacy usually improves readiness and tolerance to training demand."),
        edge("hormonal_to_stress", "hormonal_balance", "stress", Inverse, Moderate, Correlative,
            "Balanced endocrine state can reduce stress vulnerability and allostatic load."),
        edge("hormonal_to_mood", "hormonal_balance", "mood", Direct, Moderate, Correlative,
            "Hormonal stability often improves mood regulation and motivation."),
        edge("mood_to_stress", "mood", "stress", Inverse, High, Correlative,
            "Improved mood and resilience usually track with lower perceived stress."),
        edge("sleep_to_mood", "sleep", "mood", Direct, Moderate, Correlative,
            "Consistent sleep tends to improve mood stability and emotional regulation."),
        edge("muscle_to_strength", "muscle_mass", "strength_index", Direct, High, Correlative,
            "Greater lean mass generally supports higher strength expression potential."),
        edge("hormonal_to_muscle", "hormonal_balance", "muscle_mass", Direct, Moderate, Causal,
            "Anabolic-friendly hormonal state supports lean mass maintenance and growth."),
        edge("strength_to_vo2", "strength_index", "vo2_max", Direct, Low, Correlative,
            "Strength improvements can indirectly support aerobic training quality and economy."),
        edge("weight_to_blood_pressure", "weight", "blood_pressure", Direct, Low, Correlative,
            "Higher body mass trends can elevate blood pressure load in susceptible individuals."),
    ]
});

// =============================================================================
// ACCESSORS
// =============================================================================

/// Built-in graph nodes (copied).
#[must_use]
pub fn builtin_nodes() -> Vec<MetricNode> {
    GRAPH_NODES.clone()
}

/// Built-in graph edges (copied).
#[must_use]
pub fn builtin_edges() -> Vec<MetricEdge> {
    GRAPH_EDGES.clone()
}

/// The base (built-in only) graph configuration.
#[must_use]
pub fn base_graph_config() -> GraphConfig {
    GraphConfig {
        nodes: builtin_nodes(),
        edges: builtin_edges(),
    }
}

// =============================================================================
// TESTS
// =============================================================================
