//! # tier CLI
//!
//! Command-line interface for inspecting runtime instruction-set dispatch.
//! Reports what the detector sees, runs a dispatched kernel and prints the
//! vector type table.

mod commands;
mod kernels;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// CLI tool for runtime instruction-set dispatch
#[derive(Parser)]
#[command(name = "tier")]
#[command(about = "Inspect instruction-set detection and run dispatched kernels")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the detected instruction set and CPU features
    Detect,

    /// Sum sixteen floats with the dispatched kernel
    Sum {
        /// Comma-separated values (exactly 16; defaults to 1 through 16)
        #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true)]
        values: Option<Vec<f32>>,
    },

    /// Print the lane-count and element-type to vector type table
    Table {
        /// Only show rows for this register width (128, 256 or 512)
        #[arg(short, long)]
        bits: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Detect => commands::detect::execute(),
        Commands::Sum { values } => commands::sum::execute(values),
        Commands::Table { bits } => commands::table::execute(bits),
    }
}
