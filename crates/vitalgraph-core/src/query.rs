//! # Graph Query Engine
//!
//! Pure read-side operations over a graph view:
//! - breadth-first reachability (upstream / downstream)
//! - impact ranking of a node's incident edges
//! - detail-mode visibility filtering
//!
//! All functions take the graph by reference and allocate only their result.

use crate::graph::{MetricEdge, MetricNode};
use crate::types::{EdgeKind, NodeTier};
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Bonus added to an edge's strength weight when the edge claims causation.
const CAUSAL_BONUS: f64 = 0.35;

/// Default number of ranked connections returned per direction.
pub const DEFAULT_IMPACT_LIMIT: usize = 5;

// =============================================================================
// DIRECTION & DETAIL MODE
// =============================================================================

/// Which way to walk the directed graph from a starting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalDirection {
    /// Follow edges against their direction: which nodes feed into this one.
    Upstream,
    /// Follow edges along their direction: which nodes this one influences.
    Downstream,
}

/// How much of the graph a caller wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailMode {
    /// Only core-tier nodes and the edges between them.
    #[default]
    Core,
    /// Everything.
    Full,
}

// =============================================================================
// NODE INDEX
// =============================================================================

/// Id -> node lookup built once per query batch.
#[must_use]
pub fn node_index(nodes: &[MetricNode]) -> BTreeMap<&str, &MetricNode> {
    nodes.iter().map(|n| (n.id.as_str(), n)).collect()
}

// =============================================================================
// REACHABILITY
// =============================================================================

/// Breadth-first reachability from `start`, including `start` itself.
///
/// Only edges whose both endpoints appear in `nodes` participate; every
/// node enters the visited set at most once, so the walk terminates after
/// at most `nodes.len()` expansions.
#[must_use]
pub fn reachable(
    nodes: &[MetricNode],
    edges: &[MetricEdge],
    start: &str,
    direction: TraversalDirection,
) -> BTreeSet<String> {
    let index = node_index(nodes);
    let mut visited: BTreeSet<String> = BTreeSet::new();
    visited.insert(start.to_owned());
    let mut frontier: VecDeque<String> = VecDeque::new();
    frontier.push_back(start.to_owned());

    while let Some(current) = frontier.pop_front() {
        for edge in edges {
            let neighbor = match direction {
                TraversalDirection::Upstream if edge.target == current => edge.source.as_str(),
                TraversalDirection::Downstream if edge.source == current => edge.target.as_str(),
                _ => continue,
            };
            if !index.contains_key(neighbor) || visited.contains(neighbor) {
                continue;
            }
            visited.insert(neighbor.to_owned());
            frontier.push_back(neighbor.to_owned());
        }
    }
    visited
}

// =============================================================================
// IMPACT RANKING
// =============================================================================

/// One ranked connection of a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactConnection<'a> {
    pub edge: &'a MetricEdge,
    pub other_node: &'a MetricNode,
    pub score: f64,
}

/// Combined ranking weight for an edge: strength (1/2/3) plus a causal
/// bonus.
#[must_use]
pub fn impact_score(edge: &MetricEdge) -> f64 {
    let bonus = if edge.kind == EdgeKind::Causal {
        CAUSAL_BONUS
    } else {
        0.0
    };
    edge.effect_strength.score() + bonus
}

/// The strongest connections of `node_id` in the given direction, sorted
/// by descending score. The sort is stable: equal scores keep edge input
/// order. Edges whose other endpoint is not in `nodes` are dropped.
#[must_use]
pub fn top_impacts<'a>(
    node_id: &str,
    direction: TraversalDirection,
    edges: &'a [MetricEdge],
    nodes: &'a [MetricNode],
    limit: usize,
) -> Vec<ImpactConnection<'a>> {
    let index = node_index(nodes);
    let mut connections: Vec<ImpactConnection<'a>> = edges
        .iter()
        .filter_map(|edge| {
            let other_id = match direction {
                TraversalDirection::Upstream if edge.target == node_id => edge.source.as_str(),
                TraversalDirection::Downstream if edge.source == node_id => edge.target.as_str(),
                _ => return None,
            };
            let other_node = index.get(other_id)?;
            Some(ImpactConnection {
                edge,
                other_node,
                score: impact_score(edge),
            })
        })
        .collect();
    connections.sort_by(|a, b| b.score.total_cmp(&a.score));
    connections.truncate(limit);
    connections
}

// =============================================================================
// VISIBILITY
// =============================================================================

/// Nodes visible in a detail mode.
#[must_use]
pub fn visible_nodes(mode: DetailMode, nodes: &[MetricNode]) -> Vec<MetricNode> {
    match mode {
        DetailMode::Full => nodes.to_vec(),
        DetailMode::Core => nodes
            .iter()
            .filter(|n| n.tier == NodeTier::Core)
            .cloned()
            .collect(),
    }
}

/// Edges visible in a detail mode. In core mode only edges whose both
/// endpoints are core-tier survive.
#[must_use]
pub fn visible_edges(mode: DetailMode, edges: &[MetricEdge], nodes: &[MetricNode]) -> Vec<MetricEdge> {
    if mode == DetailMode::Full {
        return edges.to_vec();
    }
    let core: BTreeSet<&str> = nodes
        .iter()
        .filter(|n| n.tier == NodeTier::Core)
        .map(|n| n.id.as_str())
        .collect();
    edges
        .iter()
        .filter(|e| core.contains(e.source.as_str()) && core.contains(e.target.as_str()))
        .cloned()
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{builtin_edges, builtin_nodes};
    use crate::types::{Domain, EdgeDirection, EdgeStrength};

    fn test_node(id: &str, tier: NodeTier) -> MetricNode {
        MetricNode {
            id: id.into(),
            label: id.into(),
            x: 0.0,
            y: 0.0,
            tier,
            domain: Domain::Recovery,
            description: String::new(),
        }
    }

    fn test_edge(id: &str, source: &str, target: &str, strength: EdgeStrength, kind: EdgeKind) -> MetricEdge {
        MetricEdge {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            direction: EdgeDirection::Direct,
            effect_strength: strength,
            kind,
            description: String::new(),
        }
    }

    #[test]
    fn upstream_walk_follows_edges_backwards() {
        let nodes = builtin_nodes();
        let edges = builtin_edges();
        let upstream = reachable(&nodes, &edges, "hrv", TraversalDirection::Upstream);
        assert!(upstream.contains("hrv"));
        assert!(upstream.contains("sleep"));
        assert!(upstream.contains("stress"));
        // transitive: blood_pressure -> rhr -> stress -> hrv
        assert!(upstream.contains("blood_pressure"));

        // weight is fed only by the body-composition loop
        let weight_upstream = reachable(&nodes, &edges, "weight", TraversalDirection::Upstream);
        let expected: BTreeSet<String> = ["weight", "body_fat", "glucose_control"]
            .into_iter()
            .map(str::to_owned)
            .collect();
        assert_eq!(weight_upstream, expected);
    }

    #[test]
    fn downstream_walk_reaches_transitive_targets() {
        let nodes = builtin_nodes();
        let edges = builtin_edges();
        let downstream = reachable(&nodes, &edges, "training_load", TraversalDirection::Downstream);
        assert!(downstream.contains("recovery_readiness"));
        // training_load -> recovery_readiness -> hrv
        assert!(downstream.contains("hrv"));
    }

    #[test]
    fn reachability_is_bounded_by_node_count() {
        let nodes = builtin_nodes();
        let edges = builtin_edges();
        for node in &nodes {
            for direction in [TraversalDirection::Upstream, TraversalDirection::Downstream] {
                let set = reachable(&nodes, &edges, &node.id, direction);
                assert!(set.len() <= nodes.len());
                assert!(set.contains(&node.id));
            }
        }
    }

    #[test]
    fn causal_edges_outrank_correlative_at_equal_strength() {
        let nodes = vec![
            test_node("a", NodeTier::Core),
            test_node("b", NodeTier::Core),
            test_node("c", NodeTier::Core),
        ];
        let edges = vec![
            test_edge("corr", "b", "a", EdgeStrength::High, EdgeKind::Correlative),
            test_edge("caus", "c", "a", EdgeStrength::High, EdgeKind::Causal),
        ];
        let ranked = top_impacts("a", TraversalDirection::Upstream, &edges, &nodes, 5);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].edge.id, "caus");
        assert!((ranked[0].score - 3.35).abs() < 1e-9);
        assert!((ranked[1].score - 3.0).abs() < 1e-9);
    }

    #[test]
    fn equal_scores_preserve_input_order() {
        let nodes = vec![
            test_node("a", NodeTier::Core),
            test_node("b", NodeTier::Core),
            test_node("c", NodeTier::Core),
            test_node("d", NodeTier::Core),
        ];
        let edges = vec![
            test_edge("first", "b", "a", EdgeStrength::Moderate, EdgeKind::Correlative),
            test_edge("second", "c", "a", EdgeStrength::Moderate, EdgeKind::Correlative),
            test_edge("third", "d", "a", EdgeStrength::Moderate, EdgeKind::Correlative),
        ];
        let ranked = top_impacts("a", TraversalDirection::Upstream, &edges, &nodes, 5);
        let ids: Vec<&str> = ranked.iter().map(|c| c.edge.id.as_str()).collect();
        assert_eq!(ids, ["first", "second", "third"]);
    }

    #[test]
    fn dangling_endpoints_are_dropped_before_ranking() {
        let nodes = vec![test_node("a", NodeTier::Core)];
        let edges = vec![test_edge("ghost", "missing", "a", EdgeStrength::High, EdgeKind::Causal)];
        let ranked = top_impacts("a", TraversalDirection::Upstream, &edges, &nodes, 5);
        assert!(ranked.is_empty());
    }

    #[test]
    fn limit_truncates_after_sorting() {
        let nodes = builtin_nodes();
        let edges = builtin_edges();
        let ranked = top_impacts("hrv", TraversalDirection::Upstream, &edges, &nodes, 2);
        assert_eq!(ranked.len(), 2);
        assert!(ranked[0].score >= ranked[1].score);
    }

    #[test]
    fn core_mode_hides_supporting_edges() {
        let nodes = builtin_nodes();
        let edges = builtin_edges();
        let visible = visible_edges(DetailMode::Core, &edges, &nodes);
        assert!(!visible.is_empty());
        assert!(visible.len() < edges.len());
        let core_nodes = visible_nodes(DetailMode::Core, &nodes);
        assert_eq!(core_nodes.len(), 7);
        for edge in &visible {
            assert!(core_nodes.iter().any(|n| n.id == edge.source));
            assert!(core_nodes.iter().any(|n| n.id == edge.target));
        }
        assert_eq!(visible_edges(DetailMode::Full, &edges, &nodes).len(), edges.len());
    }
}
