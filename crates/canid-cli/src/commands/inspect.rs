//! Show the wolves of a saved generation.

use anyhow::{bail, Context, Result};
use canid::prelude::*;
use colored::Colorize;
use std::path::PathBuf;

use crate::config::Config;

pub fn run(generation: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let config = Config::load()?;
    inspect(&config, generation, output)
}

/// Print one generation from the snapshot directory named by `config` or `output`.
pub fn inspect(config: &Config, generation: Option<u64>, output: Option<PathBuf>) -> Result<()> {
    let dir = output.unwrap_or_else(|| config.output.dir.clone());
    let store = SnapshotStore::new(&dir);

    let generation = match generation {
        Some(g) => g,
        None => match store
            .latest_generation()
            .with_context(|| format!("Failed to list {}", dir.display()))?
        {
            Some(g) => g,
            None => bail!(
                "No snapshots in {}. Run {} first.",
                dir.display(),
                "canid run".cyan()
            ),
        },
    };

    let mut population = store
        .load_generation(generation)
        .with_context(|| format!("Failed to load generation {}", generation))?;
    let model = FitnessModel::new(config.simulation.food.clone());
    model.score(&mut population);
    let summary = summarize(generation, &population, &model);

    println!(
        "{}",
        format!("Generation {}", generation).white().bold()
    );
    println!("{}", "═".repeat(72).dimmed());
    println!(
        "  {:>4}  {:>6}  {:>6}  {:>6}  {:>6}  {:>6}  {:>8}",
        "#", "pack", "aggr", "fear", "plast", "play", "food"
    );
    for (index, wolf) in population.iter().enumerate() {
        let row = format!(
            "  {:>4}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>6.3}  {:>8.4}",
            index,
            wolf.pack_affinity,
            wolf.aggression,
            wolf.fear,
            wolf.plasticity,
            wolf.playfulness,
            wolf.fitness()
        );
        if wolf.is_domesticated() {
            println!("{} {}", row.green(), "domesticated".green().bold());
        } else {
            println!("{}", row);
        }
    }

    println!();
    println!("{}", "Means".blue().bold());
    println!("  Pack affinity: {:.3}", summary.mean_pack_affinity);
    println!("  Aggression:    {:.3}", summary.mean_aggression);
    println!("  Fear:          {:.3}", summary.mean_fear);
    println!("  Plasticity:    {:.3}", summary.mean_plasticity);
    println!("  Playfulness:   {:.3}", summary.mean_playfulness);
    println!(
        "  Food:          {:.4} (max {:.4})",
        summary.mean_food, summary.max_food
    );
    println!(
        "  Pack size:     {}",
        summary.pack_size.to_string().cyan()
    );

    let tame = population.iter().filter(|w| w.is_domesticated()).count();
    if tame > 0 {
        println!();
        println!(
            "{} {} domesticated wolves in this generation",
            "✓".green().bold(),
            tame
        );
    }

    Ok(())
}
