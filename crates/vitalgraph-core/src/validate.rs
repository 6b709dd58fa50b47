//! # Payload Validation
//!
//! Untrusted create/import payloads and their conversion into typed graph
//! drafts. Fields accept both camelCase and snake_case spellings; every
//! failure is a `VitalError::Validation` with a caller-facing message.

use crate::graph::MetricNode;
use crate::types::{Domain, EdgeDirection, EdgeKind, EdgeStrength, NodeTier, VitalError};
use serde::Deserialize;

// =============================================================================
// NODE PAYLOAD
// =============================================================================

/// Raw body of a "create graph metric" request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricNodePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
}

fn valid_node_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

impl MetricNodePayload {
    /// Validate into a plain graph node (stamps are added on insert).
    ///
    /// Ids are lowercased and restricted to `[a-z0-9_]+`; any tier other
    /// than `core` falls back to supporting.
    pub fn validate(&self) -> Result<MetricNode, VitalError> {
        let id = trimmed(&self.id).to_lowercase();
        if !valid_node_id(&id) {
            return Err(VitalError::Validation(
                "id must be lowercase alphanumeric plus underscores".into(),
            ));
        }
        let label = trimmed(&self.label);
        if label.is_empty() {
            return Err(VitalError::Validation("label is required".into()));
        }
        let description = trimmed(&self.description);
        if description.is_empty() {
            return Err(VitalError::Validation("description is required".into()));
        }
        let domain = Domain::parse(&trimmed(&self.domain))
            .ok_or_else(|| VitalError::Validation("domain is invalid".into()))?;
        let (Some(x), Some(y)) = (self.x, self.y) else {
            return Err(VitalError::Validation("x and y must be numeric".into()));
        };
        let tier = if trimmed(&self.tier) == "core" {
            NodeTier::Core
        } else {
            NodeTier::Supporting
        };
        Ok(MetricNode {
            id,
            label,
            x,
            y,
            tier,
            domain,
            description,
        })
    }
}

// =============================================================================
// EDGE PAYLOAD
// =============================================================================

/// Raw body of a "create graph edge" request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgePayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default, alias = "effect_strength")]
    pub effect_strength: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// A validated edge awaiting id generation and endpoint checks.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeDraft {
    /// Explicit id if the caller supplied one; generated on insert
    /// otherwise.
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    pub direction: EdgeDirection,
    pub effect_strength: EdgeStrength,
    pub kind: EdgeKind,
    pub description: String,
}

impl EdgePayload {
    pub fn validate(&self) -> Result<EdgeDraft, VitalError> {
        let source = trimmed(&self.source);
        let target = trimmed(&self.target);
        if source.is_empty() || target.is_empty() {
            return Err(VitalError::Validation("source and target are required".into()));
        }
        let direction = match trimmed(&self.direction).as_str() {
            "direct" => EdgeDirection::Direct,
            "inverse" => EdgeDirection::Inverse,
            _ => {
                return Err(VitalError::Validation(
                    "direction must be direct or inverse".into(),
                ));
            }
        };
        let effect_strength = match trimmed(&self.effect_strength).as_str() {
            "low" => EdgeStrength::Low,
            "moderate" => EdgeStrength::Moderate,
            "high" => EdgeStrength::High,
            _ => {
                return Err(VitalError::Validation(
                    "effectStrength must be low, moderate, or high".into(),
                ));
            }
        };
        let kind = match trimmed(&self.kind).as_str() {
            "causal" => EdgeKind::Causal,
            "correlative" => EdgeKind::Correlative,
            _ => {
                return Err(VitalError::Validation(
                    "type must be causal or correlative".into(),
                ));
            }
        };
        let description = trimmed(&self.description);
        if description.is_empty() {
            return Err(VitalError::Validation("description is required".into()));
        }
        let id = trimmed(&self.id);
        Ok(EdgeDraft {
            id: if id.is_empty() { None } else { Some(id) },
            source,
            target,
            direction,
            effect_strength,
            kind,
            description,
        })
    }
}

// =============================================================================
// IMPORT PAYLOAD
// =============================================================================

/// Bulk import mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    #[default]
    Append,
    ReplaceCustom,
}

/// Raw body of a graph import request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    pub mode: Option<ImportMode>,
    #[serde(default)]
    pub metrics: Vec<MetricNodePayload>,
    #[serde(default)]
    pub edges: Vec<EdgePayload>,
}

/// A fully validated import, positions intact.
#[derive(Debug, Clone)]
pub struct ImportDraft {
    pub mode: ImportMode,
    pub metrics: Vec<MetricNode>,
    pub edges: Vec<EdgeDraft>,
}

impl ImportPayload {
    /// Validate every item, attaching its positional index to the first
    /// failure so the whole batch can be rejected with context.
    pub fn validate(&self) -> Result<ImportDraft, VitalError> {
        if self.metrics.is_empty() && self.edges.is_empty() {
            return Err(VitalError::Validation(
                "Provide at least one metric or edge for import".into(),
            ));
        }
        let metrics = self
            .metrics
            .iter()
            .enumerate()
            .map(|(i, payload)| payload.validate().map_err(|e| at_position("metrics", i, &e)))
            .collect::<Result<Vec<_>, _>>()?;
        let edges = self
            .edges
            .iter()
            .enumerate()
            .map(|(j, payload)| payload.validate().map_err(|e| at_position("edges", j, &e)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ImportDraft {
            mode: self.mode.unwrap_or_default(),
            metrics,
            edges,
        })
    }
}

/// Wrap an item-level error with its batch position.
pub(crate) fn at_position(field: &str, index: usize, error: &VitalError) -> VitalError {
    let message = format!("{field}[{index}]: {error}");
    match error {
        VitalError::Conflict(_) => VitalError::Conflict(message),
        VitalError::InvalidEndpoints(_) => VitalError::InvalidEndpoints(message),
        VitalError::NotFound(_) => VitalError::NotFound(message),
        _ => VitalError::Validation(message),
    }
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or_default().trim().to_owned()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn node_payload(id: &str) -> MetricNodePayload {
        MetricNodePayload {
            id: Some(id.into()),
            label: Some("Caffeine".into()),
            description: Some("Stimulant intake".into()),
            domain: Some("nervous".into()),
            tier: Some("supporting".into()),
            x: Some(100.0),
            y: Some(200.0),
        }
    }

    #[test]
    fn node_ids_are_lowercased_and_restricted() {
        let node = node_payload("Caffeine_1").validate().expect("valid");
        assert_eq!(node.id, "caffeine_1");
        let err = node_payload("bad id!").validate().expect_err("rejected");
        assert!(matches!(err, VitalError::Validation(_)));
    }

    #[test]
    fn unknown_tier_falls_back_to_supporting() {
        let mut payload = node_payload("caffeine");
        payload.tier = Some("primary".into());
        assert_eq!(payload.validate().expect("valid").tier, NodeTier::Supporting);
        payload.tier = Some("core".into());
        assert_eq!(payload.validate().expect("valid").tier, NodeTier::Core);
    }

    #[test]
    fn edge_payload_accepts_both_spellings() {
        let json = r#"{"source":"sleep","target":"hrv","direction":"direct",
            "effect_strength":"high","type":"causal","description":"d"}"#;
        let payload: EdgePayload = serde_json::from_str(json).expect("deserialize");
        let draft = payload.validate().expect("valid");
        assert_eq!(draft.effect_strength, EdgeStrength::High);
        assert!(draft.id.is_none());
    }

    #[test]
    fn import_rejects_empty_batches() {
        let err = ImportPayload::default().validate().expect_err("rejected");
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn import_errors_carry_positional_context() {
        let payload = ImportPayload {
            mode: None,
            metrics: vec![node_payload("ok"), MetricNodePayload::default()],
            edges: vec![],
        };
        let err = payload.validate().expect_err("rejected");
        assert!(err.to_string().contains("metrics[1]:"));
    }
}
