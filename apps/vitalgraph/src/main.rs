//! # VitalGraph - Health Metric Graph Server
//!
//! The main binary for the VitalGraph causal metric engine.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for graph export, status, and simulation
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │               apps/vitalgraph (THE BINARY)            │
//! │                                                       │
//! │     ┌─────────────┐          ┌─────────────┐          │
//! │     │   CLI       │          │   HTTP API  │          │
//! │     │  (clap)     │          │   (axum)    │          │
//! │     └──────┬──────┘          └──────┬──────┘          │
//! │            │                        │                 │
//! │            └────────────┬───────────┘                 │
//! │                         ▼                             │
//! │               ┌──────────────────┐                    │
//! │               │ vitalgraph-core  │                    │
//! │               │   (THE LOGIC)    │                    │
//! │               └──────────────────┘                    │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! vitalgraph server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! vitalgraph status
//! vitalgraph graph --output graph.json
//! vitalgraph simulate --user u1 --interventions cardio_moderate_3x,diet_500_deficit
//! ```

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitalgraph::cli;

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — VITALGRAPH_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("VITALGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitalgraph=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the VitalGraph startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗   ██╗██╗████████╗ █████╗ ██╗
  ██║   ██║██║╚══██╔══╝██╔══██╗██║
  ██║   ██║██║   ██║   ███████║██║
  ╚██╗ ██╔╝██║   ██║   ██╔══██║██║
   ╚████╔╝ ██║   ██║   ██║  ██║███████╗
    ╚═══╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚══════╝

  VitalGraph v{}

  Causal • Unit-aware • Serialized
"#,
        env!("CARGO_PKG_VERSION")
    );
}
