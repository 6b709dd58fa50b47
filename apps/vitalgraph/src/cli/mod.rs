//! # VitalGraph CLI Module
//!
//! This module implements the CLI interface for VitalGraph.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `status` - Show store location and document counts
//! - `graph` - Export the merged graph as JSON
//! - `simulate` - Simulate an intervention stack for a user

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vitalgraph_core::{DEFAULT_STATE_PATH, VitalError};

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// VitalGraph - causal health metric graph server
///
/// Serves a causal graph over seven tracked health metrics and simulates
/// what a stack of interventions would do to a user's numbers.
#[derive(Parser, Debug)]
#[command(name = "vitalgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the state document (file backend)
    #[arg(short = 'D', long, global = true, default_value = DEFAULT_STATE_PATH)]
    pub database: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },

    /// Show store location and document counts
    Status,

    /// Export the merged graph (built-ins + custom data) as JSON
    Graph {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Simulate an intervention stack for a user
    Simulate {
        /// User whose latest metrics form the baseline
        #[arg(short, long)]
        user: String,

        /// Intervention ids, in compounding order
        #[arg(short, long, value_delimiter = ',')]
        interventions: Vec<String>,
    },
}

// =============================================================================
// COMMAND DISPATCH
// =============================================================================

/// Execute the parsed CLI command.
pub async fn execute(cli: Cli) -> Result<(), VitalError> {
    match cli.command {
        Some(Commands::Server { host, port }) => cmd_server(&cli.database, &host, port).await,
        Some(Commands::Status) | None => cmd_status(&cli.database),
        Some(Commands::Graph { output }) => cmd_graph(&cli.database, output.as_deref()),
        Some(Commands::Simulate {
            user,
            interventions,
        }) => cmd_simulate(&cli.database, &user, &interventions),
    }
}
