//! # vitalgraph-core
//!
//! The deterministic engine behind the metric graph - THE LOGIC.
//!
//! This crate implements the causal metric graph, the intervention
//! simulation engine, and the serialized state-mutation layer they share:
//! - an immutable seed catalog (nodes, edges, interventions)
//! - pure query/ranking/visibility functions over a merged graph view
//! - a unit-aware effect engine that compounds stacked interventions
//! - administration of user-authored graph data and catalog versions
//! - a state store serializing all mutation of one aggregate document
//!
//! ## Architectural Constraints
//!
//! - Synchronous, no async runtime, no HTTP
//! - Engines are pure functions over in-memory data
//! - All shared mutable state is confined to the `storage` module

// =============================================================================
// MODULES
// =============================================================================

pub mod admin;
pub mod catalog;
pub mod conflicts;
pub mod effects;
pub mod graph;
pub mod interventions;
pub mod query;
pub mod state;
pub mod storage;
pub mod types;
pub mod validate;
pub mod versions;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{
    Confidence, Domain, EdgeDirection, EdgeKind, EdgeStrength, ImprovementDirection, MetricName,
    NodeTier, VitalError, WeightUnit,
};

// =============================================================================
// RE-EXPORTS: Graph Model & Catalog
// =============================================================================

pub use catalog::{
    METRIC_DEFINITIONS, MetricDefinition, base_graph_config, builtin_edges, builtin_nodes,
    default_unit_for, metric_definition, metric_label,
};
pub use graph::{CustomEdge, CustomMetricNode, GraphConfig, MetricEdge, MetricNode};
pub use interventions::{
    Contraindication, Intervention, InterventionEffect, builtin_interventions, intervention_by_id,
};

// =============================================================================
// RE-EXPORTS: Engines
// =============================================================================

pub use conflicts::{ConflictDetector, KeywordConflictDetector};
pub use effects::{
    ChangeDirection, SimulationResult, SimulationRow, apply_effect, convert_weight,
    normalize_effect, simulate_stack,
};
pub use query::{
    DEFAULT_IMPACT_LIMIT, DetailMode, ImpactConnection, TraversalDirection, impact_score,
    reachable, top_impacts, visible_edges, visible_nodes,
};

// =============================================================================
// RE-EXPORTS: Administration & State
// =============================================================================

pub use admin::{
    ImportOutcome, add_custom_edge, add_custom_metric, import_graph, merged_graph,
    remove_custom_edge, remove_custom_metric,
};
pub use state::{AppState, MetricLatest, MetricRecord, UserPreference, now_iso};
pub use storage::{DEFAULT_STATE_PATH, FileStateStore, StateBackend, StateStore};
pub use validate::{EdgeDraft, EdgePayload, ImportDraft, ImportMode, ImportPayload, MetricNodePayload};
pub use versions::{InterventionVersion, StudySource, VersionInput, VersionStatus};

#[cfg(feature = "postgres")]
pub use storage::PgStateStore;
