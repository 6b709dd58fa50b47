//! # Graph Model
//!
//! Nodes and edges of the causal metric graph, plus the user-authored
//! (custom) variants that carry audit stamps.
//!
//! Edges are directed; a relationship is expressed as exactly one edge and
//! no implicit reverse edge exists. Field names serialize in camelCase to
//! match the stored document and the API wire shape.

use crate::types::{Domain, EdgeDirection, EdgeKind, EdgeStrength, NodeTier};
use serde::{Deserialize, Serialize};

// =============================================================================
// NODES
// =============================================================================

/// A node in the metric graph.
///
/// Core-tier nodes correspond 1:1 to the seven tracked metrics; supporting
/// nodes provide causal context and never receive a logged value. `x`/`y`
/// are layout hints only and carry no semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub tier: NodeTier,
    pub domain: Domain,
    pub description: String,
}

/// A user-authored graph node with audit stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMetricNode {
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub tier: NodeTier,
    pub domain: Domain,
    pub description: String,
    pub created_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl CustomMetricNode {
    /// Strip audit stamps down to the plain graph node.
    #[must_use]
    pub fn to_node(&self) -> MetricNode {
        MetricNode {
            id: self.id.clone(),
            label: self.label.clone(),
            x: self.x,
            y: self.y,
            tier: self.tier,
            domain: self.domain,
            description: self.description.clone(),
        }
    }
}

// =============================================================================
// EDGES
// =============================================================================

/// A directed edge of the metric graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub direction: EdgeDirection,
    pub effect_strength: EdgeStrength,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub description: String,
}

/// A user-authored edge with audit stamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub direction: EdgeDirection,
    pub effect_strength: EdgeStrength,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    pub description: String,
    pub created_by: String,
    pub created_at: String,
}

impl CustomEdge {
    /// Strip audit stamps down to the plain graph edge.
    #[must_use]
    pub fn to_edge(&self) -> MetricEdge {
        MetricEdge {
            id: self.id.clone(),
            source: self.source.clone(),
            target: self.target.clone(),
            direction: self.direction,
            effect_strength: self.effect_strength,
            kind: self.kind,
            description: self.description.clone(),
        }
    }
}

// =============================================================================
// GRAPH CONFIG
// =============================================================================

/// A complete graph view: built-in catalog plus (optionally) a user's
/// accepted custom additions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GraphConfig {
    pub nodes: Vec<MetricNode>,
    pub edges: Vec<MetricEdge>,
}

// =============================================================================
// TESTS
// =============================================================================
