//! Run the domestication simulation.

use anyhow::{Context, Result};
use canid::prelude::*;
use canid::rand::rngs::StdRng;
use canid::rand::SeedableRng;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;

pub const SUMMARY_FILE: &str = "summary.csv";

/// Command-line overrides layered on top of canid.toml.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub seed: Option<u64>,
    pub cap: Option<u64>,
    pub uncapped: bool,
    pub output: Option<PathBuf>,
    pub no_snapshots: bool,
}

impl RunOptions {
    pub fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.run.seed = Some(seed);
        }
        if let Some(cap) = self.cap {
            config.simulation.run.generation_cap = (cap > 0).then_some(cap);
        }
        if self.uncapped {
            config.simulation.run.generation_cap = None;
        }
        if let Some(output) = &self.output {
            config.output.dir = output.clone();
        }
    }
}

pub fn run(options: RunOptions) -> Result<()> {
    let mut config = Config::load()?;
    options.apply(&mut config);
    config
        .simulation
        .validate()
        .context("Invalid simulation configuration")?;
    debug!(
        output = %config.output.dir.display(),
        seed = ?config.simulation.run.seed,
        strategy = ?config.simulation.selection.strategy,
        "configuration loaded"
    );

    let rng = match config.simulation.run.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let population = &config.simulation.population;
    println!("{} Breeding wolves...", "→".blue());
    println!(
        "  Population: {}, elites: {}, cap: {}",
        population.size.to_string().cyan(),
        population.elite_count().to_string().cyan(),
        match config.simulation.run.generation_cap {
            Some(cap) => cap.to_string().cyan(),
            None => "none".cyan(),
        }
    );
    if let Some(seed) = config.simulation.run.seed {
        println!("  Seed: {}", seed.to_string().cyan());
    }

    let dir = config.output.dir.clone();
    if options.no_snapshots {
        if config.output.summary_csv {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    } else {
        let removed = prepare_snapshot_dir(&dir)
            .with_context(|| format!("Failed to prepare {}", dir.display()))?;
        if removed > 0 {
            println!(
                "  {} Cleared {} old snapshots from {}",
                "•".yellow(),
                removed,
                dir.display()
            );
        }
    }

    let mut csv = if config.output.summary_csv {
        Some(SummaryCsv::create(&dir.join(SUMMARY_FILE))?)
    } else {
        None
    };

    let report = if options.no_snapshots {
        execute(config.simulation.clone(), rng, NullSnapshots, csv.as_mut())?
    } else {
        let sink = BackgroundSnapshots::spawn(SnapshotStore::new(&dir));
        execute(config.simulation.clone(), rng, sink, csv.as_mut())?
    };

    if let Some(csv) = csv {
        let path = csv.path().to_path_buf();
        let rows = csv.finish()?;
        println!("  {} Wrote {} rows to {}", "✓".green(), rows, path.display());
    }

    println!();
    print_outcome(&report.outcome)?;
    if !options.no_snapshots {
        print_snapshots(&report.snapshots, &dir);
    }

    Ok(())
}

fn execute<S: SnapshotSink>(
    simulation: SimulationConfig,
    rng: StdRng,
    sink: S,
    mut csv: Option<&mut SummaryCsv>,
) -> Result<RunReport> {
    let sim = SimulationLoop::new(simulation, rng, sink).context("Failed to start simulation")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    let report = sim.run_with(|summary| {
        pb.set_message(format!(
            "generation {}  mean fear {:.3}  mean aggression {:.3}  pack {}",
            summary.generation, summary.mean_fear, summary.mean_aggression, summary.pack_size
        ));
        if let Some(csv) = csv.as_mut() {
            csv.record(summary);
        }
    });
    pb.finish_and_clear();

    Ok(report)
}

/// `summary.csv`, written one row per generation as the run goes.
pub struct SummaryCsv {
    path: PathBuf,
    out: BufWriter<File>,
    rows: u64,
    error: Option<io::Error>,
}

impl SummaryCsv {
    /// Create the file and write the header.
    pub fn create(path: &Path) -> Result<Self> {
        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", GenerationSummary::CSV_HEADER)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            out,
            rows: 0,
            error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row. After the first failure further rows are dropped.
    pub fn record(&mut self, summary: &GenerationSummary) {
        if self.error.is_some() {
            return;
        }
        match writeln!(self.out, "{}", summary.csv_row()) {
            Ok(()) => self.rows += 1,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to write summary row");
                self.error = Some(e);
            }
        }
    }

    /// Flush and return the number of rows written.
    pub fn finish(mut self) -> Result<u64> {
        if let Some(e) = self.error.take() {
            return Err(e).with_context(|| format!("Failed to write {}", self.path.display()));
        }
        self.out
            .flush()
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(self.rows)
    }
}

fn print_outcome(outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Domesticated {
            generation,
            index,
            wolf,
            food,
        } => {
            println!(
                "{} Domesticated dog found in generation {}",
                "✓".green().bold(),
                generation.to_string().green().bold()
            );
            println!("  Wolf #{} gathers {:.4} food", index, food);
            println!("{}", serde_json::to_string_pretty(&wolf.unscored())?);
        }
        Outcome::Exhausted {
            generation,
            population,
        } => {
            println!(
                "{} No domesticated wolf after {} generations",
                "•".yellow().bold(),
                generation.to_string().yellow()
            );
            if !population.is_empty() {
                println!(
                    "  Mean fear {:.3}, mean aggression {:.3}",
                    population.mean_by(|w| w.fear),
                    population.mean_by(|w| w.aggression)
                );
                println!("{}", serde_json::to_string_pretty(population)?);
            }
        }
    }
    Ok(())
}

fn print_snapshots(snapshots: &SnapshotReport, dir: &Path) {
    if snapshots.failed == 0 {
        println!(
            "  {} snapshots written to {}",
            snapshots.written.to_string().cyan(),
            dir.display()
        );
    } else {
        println!(
            "  {} snapshots written to {}, {} failed",
            snapshots.written.to_string().cyan(),
            dir.display(),
            snapshots.failed.to_string().red()
        );
    }
}
