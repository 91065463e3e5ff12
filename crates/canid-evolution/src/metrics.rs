//! Per-generation summary statistics.
//!
//! Tracks how the population's temperament moves toward domestication:
//! mean traits, pack size and the food distribution.

use crate::fitness::FitnessModel;
use canid_core::population::Population;
use serde::Serialize;

/// Metrics for one scored generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationSummary {
    pub generation: u64,
    pub population: usize,
    pub pack_size: usize,
    pub mean_food: f64,
    pub max_food: f64,
    pub mean_pack_affinity: f64,
    pub mean_aggression: f64,
    pub mean_fear: f64,
    pub mean_plasticity: f64,
    pub mean_playfulness: f64,
}

impl GenerationSummary {
    /// CSV header matching [`GenerationSummary::csv_row`].
    pub const CSV_HEADER: &'static str = "generation,population,pack_size,mean_food,max_food,\
mean_pack_affinity,mean_aggression,mean_fear,mean_plasticity,mean_playfulness";

    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4},{:.4}",
            self.generation,
            self.population,
            self.pack_size,
            self.mean_food,
            self.max_food,
            self.mean_pack_affinity,
            self.mean_aggression,
            self.mean_fear,
            self.mean_plasticity,
            self.mean_playfulness,
        )
    }
}

/// Build a summary from a population. Unscored wolves count as zero food.
pub fn summarize(generation: u64, population: &Population, model: &FitnessModel) -> GenerationSummary {
    let food = |w: &canid_core::types::Wolf| w.food.unwrap_or(0.0);
    let max_food = population
        .iter()
        .map(food)
        .fold(None, |max: Option<f64>, f| Some(max.map_or(f, |m| m.max(f))))
        .unwrap_or(0.0);

    GenerationSummary {
        generation,
        population: population.len(),
        pack_size: model.pack_size(population.wolves()),
        mean_food: population.mean_by(food),
        max_food,
        mean_pack_affinity: population.mean_by(|w| w.pack_affinity),
        mean_aggression: population.mean_by(|w| w.aggression),
        mean_fear: population.mean_by(|w| w.fear),
        mean_plasticity: population.mean_by(|w| w.plasticity),
        mean_playfulness: population.mean_by(|w| w.playfulness),
    }
}
