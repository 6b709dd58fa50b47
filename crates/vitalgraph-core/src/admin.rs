//! # Graph Administration
//!
//! Merge, mutate, and bulk-import operations for user-authored graph data
//! layered on the immutable built-in catalog.
//!
//! Merging never mutates the seed: built-ins are copied, then custom nodes
//! with fresh ids are appended (first writer wins), then custom edges whose
//! endpoints resolve in the completed node set. Adding, by contrast, rejects
//! colliding ids outright.

use crate::catalog::base_graph_config;
use crate::graph::{CustomEdge, CustomMetricNode, GraphConfig, MetricNode};
use crate::state::{AppState, now_iso};
use crate::types::VitalError;
use crate::validate::{EdgeDraft, ImportDraft, ImportMode, at_position};
use std::collections::BTreeSet;
use uuid::Uuid;

// =============================================================================
// MERGE
// =============================================================================

/// The graph a user actually sees: built-ins plus accepted custom data.
///
/// Custom nodes colliding with an existing id are silently skipped, as are
/// custom edges with a duplicate id or a dangling endpoint. Display merge
/// is lenient; `add_*` is where strictness lives.
#[must_use]
pub fn merged_graph(state: &AppState) -> GraphConfig {
    let mut config = base_graph_config();

    let mut node_ids: BTreeSet<String> = config.nodes.iter().map(|n| n.id.clone()).collect();
    for custom in &state.graph_custom_metrics {
        if node_ids.insert(custom.id.clone()) {
            config.nodes.push(custom.to_node());
        }
    }

    let mut edge_ids: BTreeSet<String> = config.edges.iter().map(|e| e.id.clone()).collect();
    for custom in &state.graph_custom_edges {
        if !node_ids.contains(&custom.source) || !node_ids.contains(&custom.target) {
            continue;
        }
        if edge_ids.insert(custom.id.clone()) {
            config.edges.push(custom.to_edge());
        }
    }
    config
}

// =============================================================================
// NODE MUTATIONS
// =============================================================================

/// Append a user-authored node, stamped with author and timestamps.
pub fn add_custom_metric(
    state: &mut AppState,
    node: MetricNode,
    author_id: &str,
) -> Result<CustomMetricNode, VitalError> {
    let merged = merged_graph(state);
    if merged.nodes.iter().any(|n| n.id == node.id) {
        return Err(VitalError::Conflict("Graph metric id already exists".into()));
    }
    let now = now_iso();
    let custom = CustomMetricNode {
        id: node.id,
        label: node.label,
        x: node.x,
        y: node.y,
        tier: node.tier,
        domain: node.domain,
        description: node.description,
        created_by: author_id.to_owned(),
        created_at: now.clone(),
        updated_at: now,
    };
    state.graph_custom_metrics.push(custom.clone());
    Ok(custom)
}

/// Remove a user-authored node, cascading to every custom edge that
/// references it as source or target.
pub fn remove_custom_metric(
    state: &mut AppState,
    metric_id: &str,
) -> Result<CustomMetricNode, VitalError> {
    let index = state
        .graph_custom_metrics
        .iter()
        .position(|m| m.id == metric_id)
        .ok_or_else(|| VitalError::NotFound("Graph metric not found".into()))?;
    let removed = state.graph_custom_metrics.remove(index);
    state
        .graph_custom_edges
        .retain(|e| e.source != metric_id && e.target != metric_id);
    Ok(removed)
}

// =============================================================================
// EDGE MUTATIONS
// =============================================================================

/// Append a user-authored edge. Endpoints must resolve in the merged node
/// set; the id (explicit or generated) must be globally fresh.
pub fn add_custom_edge(
    state: &mut AppState,
    draft: EdgeDraft,
    author_id: &str,
) -> Result<CustomEdge, VitalError> {
    let merged = merged_graph(state);
    let node_ids: BTreeSet<&str> = merged.nodes.iter().map(|n| n.id.as_str()).collect();
    if !node_ids.contains(draft.source.as_str()) || !node_ids.contains(draft.target.as_str()) {
        return Err(VitalError::InvalidEndpoints(
            "source and target must reference existing graph nodes".into(),
        ));
    }
    let edge_id = draft.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    let taken = merged.edges.iter().any(|e| e.id == edge_id)
        || state.graph_custom_edges.iter().any(|e| e.id == edge_id);
    if taken {
        return Err(VitalError::Conflict("Graph edge id already exists".into()));
    }
    let edge = CustomEdge {
        id: edge_id,
        source: draft.source,
        target: draft.target,
        direction: draft.direction,
        effect_strength: draft.effect_strength,
        kind: draft.kind,
        description: draft.description,
        created_by: author_id.to_owned(),
        created_at: now_iso(),
    };
    state.graph_custom_edges.push(edge.clone());
    Ok(edge)
}

/// Remove a user-authored edge by id.
pub fn remove_custom_edge(state: &mut AppState, edge_id: &str) -> Result<CustomEdge, VitalError> {
    let index = state
        .graph_custom_edges
        .iter()
        .position(|e| e.id == edge_id)
        .ok_or_else(|| VitalError::NotFound("Graph edge not found".into()))?;
    Ok(state.graph_custom_edges.remove(index))
}

// =============================================================================
// BULK IMPORT
// =============================================================================

/// Counts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub mode: ImportMode,
    pub created_metrics: usize,
    pub created_edges: usize,
}

/// Apply a validated import in input order.
///
/// `replace_custom` clears existing custom data first. Each item goes
/// through the same add path as single requests, so an edge may reference
/// a metric staged earlier in the same batch. The first failure is
/// returned with its positional index attached; callers run this inside a
/// store mutation so a failure discards all staged items.
pub fn import_graph(
    state: &mut AppState,
    draft: ImportDraft,
    author_id: &str,
) -> Result<ImportOutcome, VitalError> {
    if draft.mode == ImportMode::ReplaceCustom {
        state.graph_custom_metrics.clear();
        state.graph_custom_edges.clear();
    }
    let mut created_metrics = 0;
    for (i, node) in draft.metrics.into_iter().enumerate() {
        add_custom_metric(state, node, author_id).map_err(|e| at_position("metrics", i, &e))?;
        created_metrics += 1;
    }
    let mut created_edges = 0;
    for (j, edge) in draft.edges.into_iter().enumerate() {
        add_custom_edge(state, edge, author_id).map_err(|e| at_position("edges", j, &e))?;
        created_edges += 1;
    }
    Ok(ImportOutcome {
        mode: draft.mode,
        created_metrics,
        created_edges,
    })
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Domain, EdgeDirection, EdgeKind, EdgeStrength, NodeTier};

    fn node(id: &str) -> MetricNode {
        MetricNode {
            id: id.into(),
            label: id.to_uppercase(),
            x: 50.0,
            y: 60.0,
            tier: NodeTier::Supporting,
            domain: Domain::Nervous,
            description: "custom".into(),
        }
    }

    fn draft(id: Option<&str>, source: &str, target: &str) -> EdgeDraft {
        EdgeDraft {
            id: id.map(str::to_owned),
            source: source.into(),
            target: target.into(),
            direction: EdgeDirection::Direct,
            effect_strength: EdgeStrength::Moderate,
            kind: EdgeKind::Correlative,
            description: "custom edge".into(),
        }
    }

    #[test]
    fn add_rejects_builtin_id_collision() {
        let mut state = AppState::default();
        let err = add_custom_metric(&mut state, node("sleep"), "u1").expect_err("collision");
        assert!(matches!(err, VitalError::Conflict(_)));
    }

    #[test]
    fn merge_appends_custom_data_after_builtins() {
        let mut state = AppState::default();
        add_custom_metric(&mut state, node("caffeine"), "u1").expect("added");
        add_custom_edge(&mut state, draft(Some("caffeine_to_sleep"), "caffeine", "sleep"), "u1")
            .expect("added");
        let merged = merged_graph(&state);
        assert_eq!(merged.nodes.len(), 23);
        assert_eq!(merged.edges.len(), 40);
        assert_eq!(merged.nodes.last().map(|n| n.id.as_str()), Some("caffeine"));
    }

    #[test]
    fn merge_drops_dangling_custom_edges_without_error() {
        let state = AppState {
            graph_custom_edges: vec![CustomEdge {
                id: "ghost".into(),
                source: "missing".into(),
                target: "sleep".into(),
                direction: EdgeDirection::Direct,
                effect_strength: EdgeStrength::Low,
                kind: EdgeKind::Correlative,
                description: String::new(),
                created_by: "u1".into(),
                created_at: now_iso(),
            }],
            ..AppState::default()
        };
        assert_eq!(merged_graph(&state).edges.len(), 39);
    }

    #[test]
    fn edge_requires_resolvable_endpoints() {
        let mut state = AppState::default();
        let err = add_custom_edge(&mut state, draft(None, "sleep", "nowhere"), "u1")
            .expect_err("rejected");
        assert!(matches!(err, VitalError::InvalidEndpoints(_)));
    }

    #[test]
    fn edge_without_explicit_id_gets_a_generated_one() {
        let mut state = AppState::default();
        let edge = add_custom_edge(&mut state, draft(None, "sleep", "hrv"), "u1").expect("added");
        assert!(!edge.id.is_empty());
        let err = add_custom_edge(&mut state, draft(Some("sleep_to_hrv"), "sleep", "hrv"), "u1")
            .expect_err("builtin id");
        assert!(matches!(err, VitalError::Conflict(_)));
    }

    #[test]
    fn removing_a_metric_cascades_to_its_edges() {
        let mut state = AppState::default();
        add_custom_metric(&mut state, node("caffeine"), "u1").expect("added");
        add_custom_edge(&mut state, draft(Some("c_to_sleep"), "caffeine", "sleep"), "u1")
            .expect("added");
        add_custom_edge(&mut state, draft(Some("stress_to_c"), "stress", "caffeine"), "u1")
            .expect("added");
        remove_custom_metric(&mut state, "caffeine").expect("removed");
        assert!(state.graph_custom_metrics.is_empty());
        assert!(state.graph_custom_edges.is_empty());
        assert!(matches!(
            remove_custom_metric(&mut state, "caffeine"),
            Err(VitalError::NotFound(_))
        ));
    }

    #[test]
    fn import_edge_may_reference_metric_from_same_batch() {
        let mut state = AppState::default();
        let outcome = import_graph(
            &mut state,
            ImportDraft {
                mode: ImportMode::Append,
                metrics: vec![node("caffeine")],
                edges: vec![draft(Some("c_to_sleep"), "caffeine", "sleep")],
            },
            "u1",
        )
        .expect("imported");
        assert_eq!(outcome.created_metrics, 1);
        assert_eq!(outcome.created_edges, 1);
    }

    #[test]
    fn import_failure_carries_positional_context() {
        let mut state = AppState::default();
        let err = import_graph(
            &mut state,
            ImportDraft {
                mode: ImportMode::Append,
                metrics: vec![node("caffeine"), node("caffeine")],
                edges: vec![],
            },
            "u1",
        )
        .expect_err("duplicate");
        assert!(err.to_string().contains("metrics[1]:"));
    }

    #[test]
    fn replace_custom_clears_existing_data_first() {
        let mut state = AppState::default();
        add_custom_metric(&mut state, node("old_metric"), "u1").expect("added");
        import_graph(
            &mut state,
            ImportDraft {
                mode: ImportMode::ReplaceCustom,
                metrics: vec![node("new_metric")],
                edges: vec![],
            },
            "u1",
        )
        .expect("imported");
        let ids: Vec<&str> = state.graph_custom_metrics.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["new_metric"]);
    }
}
