//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api;
use std::path::Path;
use vitalgraph_core::{
    KeywordConflictDetector, StateStore, VitalError, merged_graph, simulate_stack,
};

// =============================================================================
// BACKEND SELECTION
// =============================================================================

/// Open the state store, preferring Postgres when `DATABASE_URL` points at
/// one and the binary was built with the `postgres` feature.
pub fn open_store(db_path: &Path) -> Result<StateStore, VitalError> {
    let database_url = std::env::var("DATABASE_URL").unwrap_or_default();
    let wants_postgres = {
        let normalized = database_url.trim().to_lowercase();
        normalized.starts_with("postgres://") || normalized.starts_with("postgresql://")
    };

    #[cfg(feature = "postgres")]
    if wants_postgres {
        tracing::info!("State backend: postgres");
        return StateStore::open_postgres(database_url.trim());
    }

    #[cfg(not(feature = "postgres"))]
    if wants_postgres {
        tracing::warn!(
            "DATABASE_URL points at Postgres but this build lacks the postgres feature; using the file backend"
        );
    }

    tracing::info!(path = %db_path.display(), "State backend: file");
    StateStore::open_file(db_path)
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(db_path: &Path, host: &str, port: u16) -> Result<(), VitalError> {
    let store = open_store(db_path)?;

    println!("VitalGraph Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:  {}", host);
    println!("  Port:  {}", port);
    println!("  State: {}", store.location());
    println!();
    println!("Endpoints:");
    println!("  GET  /health                      - Health check");
    println!("  GET  /api/graph/config            - Merged graph");
    println!("  GET  /api/interventions           - Intervention catalog");
    println!("  POST /api/interventions/simulate  - Simulate a stack");
    println!("  *    /api/developer/...           - Graph & version admin");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, store).await
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show store location and document counts.
pub fn cmd_status(db_path: &Path) -> Result<(), VitalError> {
    let store = open_store(db_path)?;
    let document = store.read()?;

    println!("VitalGraph Status");
    println!("  State:            {}", store.location());
    println!("  Metric records:   {}", document.metrics.len());
    println!("  Custom metrics:   {}", document.graph_custom_metrics.len());
    println!("  Custom edges:     {}", document.graph_custom_edges.len());
    println!(
        "  Catalog versions: {}",
        document.intervention_versions.len()
    );
    Ok(())
}

// =============================================================================
// GRAPH COMMAND
// =============================================================================

/// Export the merged graph as JSON to stdout or a file.
pub fn cmd_graph(db_path: &Path, output: Option<&Path>) -> Result<(), VitalError> {
    let store = open_store(db_path)?;
    let document = store.read()?;
    let graph = merged_graph(&document);
    let json = serde_json::to_string_pretty(&graph)
        .map_err(|e| VitalError::Serialization(e.to_string()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &json).map_err(|e| VitalError::Io(e.to_string()))?;
            println!(
                "Exported {} nodes / {} edges to {}",
                graph.nodes.len(),
                graph.edges.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

// =============================================================================
// SIMULATE COMMAND
// =============================================================================

/// Simulate an intervention stack against a user's latest metrics.
pub fn cmd_simulate(db_path: &Path, user: &str, interventions: &[String]) -> Result<(), VitalError> {
    let store = open_store(db_path)?;
    let document = store.read()?;
    let latest = document.latest_metrics(user);
    let weight_unit = document.weight_unit_for(user);

    let result = simulate_stack(&latest, interventions, weight_unit, &KeywordConflictDetector);

    println!("Simulation for {user} ({} selected)", result.interventions.len());
    println!();
    println!(
        "  {:<22} {:>10} {:>10} {:>8}  {:<9} {}",
        "Metric", "Current", "Predicted", "Delta", "Direction", "Confidence"
    );
    for row in &result.table {
        println!(
            "  {:<22} {:>10.2} {:>10.2} {:>8.2}  {:<9} {:?}",
            row.metric_label,
            row.current,
            row.predicted,
            row.delta,
            format!("{:?}", row.direction).to_lowercase(),
            row.confidence
        );
    }
    if !result.warnings.is_empty() {
        println!();
        println!("Warnings:");
        for warning in &result.warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}
