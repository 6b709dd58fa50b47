//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers. Each one is a
//! thin translation layer: extract, call the core, map the result.

use super::{
    AppState, auth,
    types::{ApiError, ErrorResponse, HealthResponse, ImportResponse, SimulateRequest},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use vitalgraph_core::{
    GraphConfig, ImportMode, ImportPayload, Intervention, InterventionVersion,
    KeywordConflictDetector, MetricNodePayload, SimulationResult, builtin_interventions,
    intervention_by_id, simulate_stack,
    admin::{
        add_custom_edge, add_custom_metric, import_graph, merged_graph, remove_custom_edge,
        remove_custom_metric,
    },
    validate::EdgePayload,
    versions::{
        VersionInput, create_draft, delete_draft, ensure_seed, list_by_intervention,
        publish_latest_draft, update_draft,
    },
};

/// Resolve the caller or reject with 401.
fn require_user(headers: &HeaderMap) -> Result<String, Response> {
    auth::caller_id(headers).ok_or_else(|| {
        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: "Missing X-User-Id header".into(),
                retryable: false,
            }),
        )
            .into_response()
    })
}

/// Author stamp for developer mutations.
fn author(headers: &HeaderMap) -> String {
    auth::caller_id(headers).unwrap_or_else(|| "developer".to_owned())
}

// =============================================================================
// HEALTH
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// GRAPH & CATALOG READS
// =============================================================================

/// Merged graph view (built-ins plus accepted custom data).
pub async fn graph_config_handler(
    State(state): State<AppState>,
) -> Result<Json<GraphConfig>, ApiError> {
    let document = state.store.read()?;
    Ok(Json(merged_graph(&document)))
}

/// The full built-in intervention catalog.
pub async fn list_interventions_handler() -> Json<&'static [Intervention]> {
    Json(builtin_interventions())
}

/// One intervention by id.
pub async fn get_intervention_handler(
    Path(id): Path<String>,
) -> Result<Json<&'static Intervention>, ApiError> {
    intervention_by_id(&id)
        .map(Json)
        .ok_or_else(|| vitalgraph_core::VitalError::NotFound("Intervention not found".into()).into())
}

// =============================================================================
// SIMULATION
// =============================================================================

/// First-occurrence dedupe of the selected ids: the wire layer always
/// simulates a set, so a repeated id never compounds twice.
fn dedupe_selection(ids: Vec<String>) -> Vec<String> {
    let mut selection: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !selection.contains(&id) {
            selection.push(id);
        }
    }
    selection
}

fn run_simulation(
    state: &AppState,
    user: &str,
    selection: &[String],
) -> Result<SimulationResult, vitalgraph_core::VitalError> {
    let document = state.store.read()?;
    let latest = document.latest_metrics(user);
    let weight_unit = document.weight_unit_for(user);
    Ok(simulate_stack(
        &latest,
        selection,
        weight_unit,
        &KeywordConflictDetector,
    ))
}

/// Simulate a stack of interventions against the caller's latest metrics.
pub async fn simulate_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Option<Json<SimulateRequest>>,
) -> Result<Json<SimulationResult>, Response> {
    let user = require_user(&headers)?;
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let selection = dedupe_selection(request.selected_interventions);
    let result =
        run_simulation(&state, &user, &selection).map_err(|e| ApiError(e).into_response())?;
    Ok(Json(result))
}

/// Simulate with a base intervention: the path id is always part of the
/// stack, the body carries any additional ids. Unknown base ids are a 404,
/// unlike the lenient drop inside the engine.
pub async fn simulate_intervention_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Option<Json<SimulateRequest>>,
) -> Result<Json<SimulationResult>, Response> {
    let user = require_user(&headers)?;
    if intervention_by_id(&id).is_none() {
        return Err(
            ApiError(vitalgraph_core::VitalError::NotFound("Intervention not found".into()))
                .into_response(),
        );
    }
    let request = body.map(|Json(b)| b).unwrap_or_default();
    let mut ids = vec![id];
    ids.extend(request.selected_interventions);
    let selection = dedupe_selection(ids);
    let result =
        run_simulation(&state, &user, &selection).map_err(|e| ApiError(e).into_response())?;
    Ok(Json(result))
}

// =============================================================================
// DEVELOPER: GRAPH ADMINISTRATION
// =============================================================================

/// Create a custom graph metric.
pub async fn create_graph_metric_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<MetricNodePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let node = payload.validate()?;
    let author = author(&headers);
    let created = state
        .store
        .mutate(|document| add_custom_metric(document, node, &author))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a custom graph metric (cascades to its custom edges).
pub async fn delete_graph_metric_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .store
        .mutate(|document| remove_custom_metric(document, &id))?;
    Ok(Json(removed))
}

/// Create a custom graph edge.
pub async fn create_graph_edge_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EdgePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate()?;
    let author = author(&headers);
    let created = state
        .store
        .mutate(|document| add_custom_edge(document, draft, &author))?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Delete a custom graph edge.
pub async fn delete_graph_edge_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let removed = state
        .store
        .mutate(|document| remove_custom_edge(document, &id))?;
    Ok(Json(removed))
}

/// Bulk import of custom graph data. Validation failures reject the whole
/// batch before anything persists.
pub async fn import_graph_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ImportPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let draft = payload.validate()?;
    let author = author(&headers);
    let outcome = state
        .store
        .mutate(|document| import_graph(document, draft, &author))?;
    Ok(Json(ImportResponse {
        mode: match outcome.mode {
            ImportMode::Append => "append",
            ImportMode::ReplaceCustom => "replace_custom",
        },
        created_metrics: outcome.created_metrics,
        created_edges: outcome.created_edges,
    }))
}

// =============================================================================
// DEVELOPER: INTERVENTION VERSIONS
// =============================================================================

/// All versions of an intervention, newest first. Seeds version 1 of every
/// built-in on first touch.
pub async fn list_versions_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<InterventionVersion>>, ApiError> {
    let versions = state.store.mutate(|document| {
        ensure_seed(&mut document.intervention_versions);
        Ok(list_by_intervention(&document.intervention_versions, &id))
    })?;
    Ok(Json(versions))
}

/// Create a new draft version.
pub async fn create_version_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<VersionInput>,
) -> Result<impl IntoResponse, ApiError> {
    let author = author(&headers);
    let draft = state.store.mutate(|document| {
        ensure_seed(&mut document.intervention_versions);
        create_draft(&mut document.intervention_versions, input, &author)
    })?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// Update a draft version in place.
pub async fn update_version_handler(
    State(state): State<AppState>,
    Path((id, version)): Path<(String, u32)>,
    Json(input): Json<VersionInput>,
) -> Result<Json<InterventionVersion>, ApiError> {
    let updated = state.store.mutate(|document| {
        ensure_seed(&mut document.intervention_versions);
        update_draft(&mut document.intervention_versions, &id, version, input)
    })?;
    Ok(Json(updated))
}

/// Publish the newest draft of an intervention.
pub async fn publish_version_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<InterventionVersion>, ApiError> {
    let author = author(&headers);
    let published = state.store.mutate(|document| {
        ensure_seed(&mut document.intervention_versions);
        publish_latest_draft(&mut document.intervention_versions, &id, &author)
    })?;
    Ok(Json(published))
}

/// Delete a draft version.
pub async fn delete_version_handler(
    State(state): State<AppState>,
    Path((id, version)): Path<(String, u32)>,
) -> Result<Json<InterventionVersion>, ApiError> {
    let removed = state.store.mutate(|document| {
        ensure_seed(&mut document.intervention_versions);
        delete_draft(&mut document.intervention_versions, &id, version)
    })?;
    Ok(Json(removed))
}
