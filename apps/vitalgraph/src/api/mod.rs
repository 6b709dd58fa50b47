//! # VitalGraph HTTP API Module
//!
//! This module implements the HTTP REST API server using axum.
//!
//! ## Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/graph/config` - Merged graph (built-ins + custom data)
//! - `GET /api/interventions` - Built-in intervention catalog
//! - `GET /api/interventions/{id}` - One intervention
//! - `POST /api/interventions/simulate` - Simulate a selected stack
//! - `POST /api/interventions/{id}/simulate` - Simulate with a base intervention
//! - `POST /api/developer/graph/metrics` / `DELETE .../metrics/{id}`
//! - `POST /api/developer/graph/edges` / `DELETE .../edges/{id}`
//! - `POST /api/developer/graph/import` - Bulk import custom graph data
//! - `GET/POST/PUT/DELETE /api/developer/interventions/...` - Version history
//!
//! ## Security Configuration (Environment Variables)
//!
//! - `VITALGRAPH_CORS_ORIGINS`: Comma-separated allowed origins, or "*"
//!   (default: localhost only)
//! - `VITALGRAPH_ADMIN_KEY`: If set, developer routes require it as a
//!   bearer token
//!
//! Caller identity arrives as an `X-User-Id` header installed by the
//! fronting auth layer.

mod auth;
mod handlers;
mod types;

// Re-exports for external use
pub use auth::get_admin_key_from_env;
// Re-export handlers and types for integration tests (via `vitalgraph::api::*`)
#[allow(unused_imports)]
pub use handlers::{
    create_graph_edge_handler, create_graph_metric_handler, create_version_handler,
    delete_graph_edge_handler, delete_graph_metric_handler, delete_version_handler,
    get_intervention_handler, graph_config_handler, health_handler, import_graph_handler,
    list_interventions_handler, list_versions_handler, publish_version_handler, simulate_handler,
    simulate_intervention_handler, update_version_handler,
};
#[allow(unused_imports)]
pub use types::{ApiError, ErrorResponse, HealthResponse, ImportResponse, SimulateRequest};

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use vitalgraph_core::{StateStore, VitalError};

// =============================================================================
// SERVER STATE
// =============================================================================

/// Shared server state containing the state store.
#[derive(Clone)]
pub struct AppState {
    /// The serialized-mutation store over the aggregate document.
    pub store: Arc<StateStore>,
}

impl AppState {
    /// Create new app state around a store.
    #[must_use]
    pub fn new(store: StateStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// =============================================================================
// CORS CONFIGURATION
// =============================================================================

fn allowed_headers() -> [HeaderName; 3] {
    [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        HeaderName::from_static(auth::USER_ID_HEADER),
    ]
}

/// Build CORS layer from environment configuration.
///
/// Reads `VITALGRAPH_CORS_ORIGINS`:
/// - `*`: allows all origins (development only)
/// - unset: localhost only (restrictive default)
/// - otherwise: comma-separated list of allowed origins
fn build_cors_layer() -> CorsLayer {
    let origins_env = std::env::var("VITALGRAPH_CORS_ORIGINS").ok();

    match origins_env.as_deref() {
        Some("*") => {
            tracing::warn!(
                "CORS: Allowing ALL origins (VITALGRAPH_CORS_ORIGINS=*). This is insecure for production!"
            );
            CorsLayer::permissive()
        }
        Some(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|s| {
                    let trimmed = s.trim();
                    match trimmed.parse::<HeaderValue>() {
                        Ok(hv) => {
                            tracing::info!("CORS: Allowing origin: {}", trimmed);
                            Some(hv)
                        }
                        Err(e) => {
                            tracing::warn!("CORS: Invalid origin '{}': {}", trimmed, e);
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS: No valid origins in VITALGRAPH_CORS_ORIGINS, defaulting to localhost only"
                );
                build_localhost_cors()
            } else {
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
                    .allow_headers(allowed_headers())
            }
        }
        None => {
            tracing::info!("CORS: No VITALGRAPH_CORS_ORIGINS set, defaulting to localhost only");
            build_localhost_cors()
        }
    }
}

/// Build a restrictive CORS layer that only allows localhost origins.
fn build_localhost_cors() -> CorsLayer {
    let localhost_origins = vec![
        "http://localhost:3000".parse::<HeaderValue>().ok(),
        "http://localhost:8080".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:3000".parse::<HeaderValue>().ok(),
        "http://127.0.0.1:8080".parse::<HeaderValue>().ok(),
    ];
    let origins: Vec<HeaderValue> = localhost_origins.into_iter().flatten().collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(allowed_headers())
}

// =============================================================================
// ROUTER CREATION
// =============================================================================

/// Create the axum router with all endpoints and middleware.
///
/// Middleware stack (outer to inner):
/// 1. CORS - handles preflight requests
/// 2. Tracing - logs all requests
/// 3. Admin key - guards the developer routes (if configured)
pub fn create_router(state: AppState) -> Router {
    let cors = build_cors_layer();

    let has_admin_key = get_admin_key_from_env().is_some();
    if has_admin_key {
        tracing::info!("Admin key required for developer routes");
    } else {
        tracing::warn!(
            "Developer routes are UNPROTECTED - set VITALGRAPH_ADMIN_KEY to require a bearer token."
        );
    }

    let mut developer = Router::new()
        .route("/graph/metrics", post(handlers::create_graph_metric_handler))
        .route(
            "/graph/metrics/{id}",
            delete(handlers::delete_graph_metric_handler),
        )
        .route("/graph/edges", post(handlers::create_graph_edge_handler))
        .route(
            "/graph/edges/{id}",
            delete(handlers::delete_graph_edge_handler),
        )
        .route("/graph/import", post(handlers::import_graph_handler))
        .route(
            "/interventions/versions",
            post(handlers::create_version_handler),
        )
        .route(
            "/interventions/{id}/versions",
            get(handlers::list_versions_handler),
        )
        .route(
            "/interventions/{id}/versions/{version}",
            put(handlers::update_version_handler).delete(handlers::delete_version_handler),
        )
        .route(
            "/interventions/{id}/publish",
            post(handlers::publish_version_handler),
        );

    if has_admin_key {
        developer = developer.layer(axum_middleware::from_fn(auth::admin_auth_middleware));
    }

    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/api/graph/config", get(handlers::graph_config_handler))
        .route("/api/interventions", get(handlers::list_interventions_handler))
        .route(
            "/api/interventions/simulate",
            post(handlers::simulate_handler),
        )
        .route(
            "/api/interventions/{id}",
            get(handlers::get_intervention_handler),
        )
        .route(
            "/api/interventions/{id}/simulate",
            post(handlers::simulate_intervention_handler),
        )
        .nest("/api/developer", developer)
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// SERVER STARTUP
// =============================================================================

/// Start the HTTP server.
pub async fn run_server(addr: &str, store: StateStore) -> Result<(), VitalError> {
    let state = AppState::new(store);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| VitalError::Io(format!("Bind failed: {}", e)))?;

    tracing::info!("VitalGraph HTTP server listening on {}", addr);

    axum::serve(listener, router)
        .await
        .map_err(|e| VitalError::Io(format!("Server error: {}", e)))
}
