//! Canid CLI - run and inspect wolf domestication simulations.

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "canid")]
#[command(author, version, about = "Canid - evolve wolves until one is tame", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default canid.toml
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Run the simulation until a wolf is domesticated
    Run {
        /// Seed the random source for a reproducible run
        #[arg(short, long)]
        seed: Option<u64>,

        /// Stop after this many generations (0 = no cap)
        #[arg(short, long, conflicts_with = "uncapped")]
        cap: Option<u64>,

        /// Run until domestication, however long it takes
        #[arg(long)]
        uncapped: bool,

        /// Snapshot directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip per-generation JSON snapshots
        #[arg(long)]
        no_snapshots: bool,
    },

    /// Show the wolves of a saved generation
    Inspect {
        /// Generation to load (default: latest)
        generation: Option<u64>,

        /// Snapshot directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Run {
            seed,
            cap,
            uncapped,
            output,
            no_snapshots,
        } => commands::run::run(commands::run::RunOptions {
            seed,
            cap,
            uncapped,
            output,
            no_snapshots,
        }),
        Commands::Inspect { generation, output } => commands::inspect::run(generation, output),
    }
}
