//! Food model: how much a wolf eats in one generation.
//!
//! Food comes from three sources that add up:
//! - the pack's hunt, shared with diminishing returns and cut when the
//!   forest is overcrowded,
//! - solo hunting, driven by aggression and hampered by fear of humans,
//! - human provisioning, open only to wolves calm enough to approach.
//!
//! The total is the wolf's fitness for selection.

use canid_core::config::{FoodConfig, PackCensus};
use canid_core::population::Population;
use canid_core::types::Wolf;

/// Pack affinity at which a wolf joins the pack.
pub const PACK_AFFINITY_THRESHOLD: f64 = 0.7;
/// Pack share of the population above which the pack starves.
pub const OVERCROWDING_RATIO: f64 = 0.6;
/// Reference share the overcrowding penalty is taken from.
const OVERCROWDING_REFERENCE: f64 = 2.0;
/// Pack size offset in the diminishing-returns curve.
const PACK_OFFSET: f64 = 0.6;

/// Fear above which solo hunters lose time evading humans.
pub const SOLO_FEAR_THRESHOLD: f64 = 0.4;
/// Fear at or below which a wolf approaches humans.
pub const APPROACH_FEAR: f64 = 0.3;
/// Plasticity at which a wolf hunts alongside humans.
pub const CO_HUNT_PLASTICITY: f64 = 0.7;
/// Fear at or below which a wolf eats human grain.
pub const GRAIN_FEAR: f64 = 0.15;

pub fn is_in_pack(wolf: &Wolf) -> bool {
    wolf.pack_affinity >= PACK_AFFINITY_THRESHOLD
}

/// Solo-hunting food.
pub fn individual_food(wolf: &Wolf) -> f64 {
    let mut food = wolf.aggression * 1.3;
    if wolf.fear > SOLO_FEAR_THRESHOLD {
        food -= 0.5 * wolf.fear;
    }
    food
}

/// Food obtained from humans. Exactly zero for wolves too wary to approach.
pub fn human_food(wolf: &Wolf) -> f64 {
    if wolf.fear > APPROACH_FEAR {
        return 0.0;
    }

    let mut food = wolf.playfulness - 0.4 * wolf.aggression;

    // Co-hunting with humans.
    if wolf.plasticity >= CO_HUNT_PLASTICITY {
        food += 1.5 * wolf.plasticity + 0.5 * wolf.aggression;
    }

    // Grain eating.
    if wolf.fear <= GRAIN_FEAR {
        food += 3.0 * wolf.playfulness - 0.85 * wolf.aggression + 1.0;
    }

    food
}

/// Parameterized food model. Both observed constant sets are plain configs.
#[derive(Debug, Clone)]
pub struct FitnessModel {
    config: FoodConfig,
}

impl FitnessModel {
    pub fn new(config: FoodConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FoodConfig {
        &self.config
    }

    /// Pack members across the whole population.
    pub fn pack_size(&self, population: &[Wolf]) -> usize {
        match self.config.pack_census {
            PackCensus::Population => population.iter().filter(|w| is_in_pack(w)).count(),
            PackCensus::Disabled => 0,
        }
    }

    /// Per-member share of the pack's hunt for a pack of `pack_size`
    /// in a population of `population_size`.
    pub fn pack_share(&self, pack_size: usize, population_size: usize) -> f64 {
        let curve = -1.0 / (pack_size as f64 + PACK_OFFSET);
        let mut food = curve + self.config.pack_ceiling;

        if population_size > 0 && pack_size as f64 / population_size as f64 > OVERCROWDING_RATIO {
            food -= (curve + OVERCROWDING_REFERENCE) / self.config.overcrowding_divisor;
        }

        food
    }

    pub fn pack_food(&self, population: &[Wolf], population_size: usize) -> f64 {
        self.pack_share(self.pack_size(population), population_size)
    }

    pub fn total_food(&self, wolf: &Wolf, population: &[Wolf], population_size: usize) -> f64 {
        let mut food = 0.0;
        if is_in_pack(wolf) {
            food += self.pack_food(population, population_size);
        }
        food + individual_food(wolf) + human_food(wolf)
    }

    /// Store every wolf's food for this generation.
    pub fn score(&self, population: &mut Population) {
        let population_size = population.len();
        let pack_food = self.pack_food(population.wolves(), population_size);

        for wolf in population.wolves_mut() {
            let mut food = individual_food(wolf) + human_food(wolf);
            if is_in_pack(wolf) {
                food += pack_food;
            }
            wolf.food = Some(food);
        }
    }
}

impl Default for FitnessModel {
    fn default() -> Self {
        Self::new(FoodConfig::default())
    }
}
