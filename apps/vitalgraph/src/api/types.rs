//! # API Request/Response Types
//!
//! Wire shapes for the HTTP endpoints plus the error envelope that maps
//! core errors onto status codes.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use vitalgraph_core::VitalError;

// =============================================================================
// HEALTH
// =============================================================================

/// Response for `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok",
            service: "vitalgraph",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Body of `POST /api/interventions/simulate`.
///
/// Accepts the historical spellings of the selection field; anything else
/// simulates an empty stack.
#[derive(Debug, Default, Deserialize)]
pub struct SimulateRequest {
    #[serde(
        default,
        alias = "selectedInterventions",
        alias = "selectedInterventionIds"
    )]
    pub selected_interventions: Vec<String>,
}

// =============================================================================
// GRAPH ADMINISTRATION
// =============================================================================

/// Response for a successful bulk import.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub mode: &'static str,
    pub created_metrics: usize,
    pub created_edges: usize,
}

// =============================================================================
// ERROR ENVELOPE
// =============================================================================

/// JSON error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

/// A core error carried to the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub VitalError);

impl From<VitalError> for ApiError {
    fn from(error: VitalError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, retryable) = match &self.0 {
            VitalError::NotFound(_) => (StatusCode::NOT_FOUND, false),
            VitalError::Conflict(_) => (StatusCode::CONFLICT, false),
            VitalError::InvalidEndpoints(_) | VitalError::Validation(_) => {
                (StatusCode::BAD_REQUEST, false)
            }
            VitalError::Concurrency(_) => (StatusCode::CONFLICT, true),
            VitalError::Io(_) | VitalError::Serialization(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, false)
            }
        };
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        let body = ErrorResponse {
            error: self.0.to_string(),
            retryable,
        };
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulate_request_accepts_all_spellings() {
        for body in [
            r#"{"selectedInterventions":["a"]}"#,
            r#"{"selected_interventions":["a"]}"#,
            r#"{"selectedInterventionIds":["a"]}"#,
        ] {
            let parsed: SimulateRequest = serde_json::from_str(body).expect("deserialize");
            assert_eq!(parsed.selected_interventions, ["a"]);
        }
        let empty: SimulateRequest = serde_json::from_str("{}").expect("deserialize");
        assert!(empty.selected_interventions.is_empty());
    }

    #[test]
    fn error_statuses_follow_the_taxonomy() {
        let cases = [
            (VitalError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (VitalError::Conflict("x".into()), StatusCode::CONFLICT),
            (VitalError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (VitalError::InvalidEndpoints("x".into()), StatusCode::BAD_REQUEST),
            (VitalError::Concurrency("x".into()), StatusCode::CONFLICT),
            (VitalError::Io("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            assert_eq!(ApiError(error).into_response().status(), status);
        }
    }
}
