//! Simulation configuration.
//!
//! Every field has a serde default, so a partial TOML file (or none at all)
//! yields a runnable configuration. Call [`SimulationConfig::validate`] before
//! starting a run.

use crate::error::{CanidError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub food: FoodConfig,
    #[serde(default)]
    pub selection: SelectionConfig,
    #[serde(default)]
    pub mutation: MutationConfig,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Wolves in generation 0 (N).
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Elite count is `size / elite_divisor + 1`.
    #[serde(default = "default_elite_divisor")]
    pub elite_divisor: usize,
}

/// How the pack is counted when computing pack food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackCensus {
    /// Count pack members over the whole current population.
    Population,
    /// Always report an empty pack, matching runs where the census saw no wolves.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodConfig {
    /// Asymptotic per-wolf pack share (C1).
    #[serde(default = "default_pack_ceiling")]
    pub pack_ceiling: f64,
    /// Overcrowding penalty divisor (C2).
    #[serde(default = "default_overcrowding_divisor")]
    pub overcrowding_divisor: f64,
    #[serde(default = "default_pack_census")]
    pub pack_census: PackCensus,
}

/// Elite selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Seed with the first E wolves, then let every later wolf evict the weakest elite.
    TournamentBackfill,
    /// Keep the first E wolves; later wolves never evict anyone.
    FirstCome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    #[serde(default = "default_selection_strategy")]
    pub strategy: SelectionStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationConfig {
    /// Plasticity gain for wolves with fear <= 0.3.
    #[serde(default = "default_plasticity_drift")]
    pub plasticity_drift: f64,
    /// Playfulness gain for wolves with plasticity >= 0.35.
    #[serde(default = "default_playfulness_drift")]
    pub playfulness_drift: f64,
    /// Aggression loss for wolves with plasticity >= 0.35.
    #[serde(default = "default_aggression_drift")]
    pub aggression_drift: f64,
    /// Width of the point-mutation draw: `span * U - offset`.
    #[serde(default = "default_point_span")]
    pub point_span: f64,
    #[serde(default = "default_point_offset")]
    pub point_offset: f64,
    /// Slots the point mutation draws from. Slots past the fifth all hit fear.
    #[serde(default = "default_point_slots")]
    pub point_slots: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Stop with `Exhausted` once the generation index exceeds this. `None` = no cap.
    /// In TOML, `0` means no cap; omitting the key keeps the default.
    #[serde(default = "default_generation_cap", with = "generation_cap")]
    pub generation_cap: Option<u64>,
    /// Seed for the random source. `None` = seeded from entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Log a progress summary every this many generations.
    #[serde(default = "default_summary_every")]
    pub summary_every: u64,
}

/// `0` on disk stands for an uncapped run.
mod generation_cap {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cap: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(cap.unwrap_or(0))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        let cap = u64::deserialize(deserializer)?;
        Ok((cap > 0).then_some(cap))
    }
}

fn default_population_size() -> usize { 20 }
fn default_elite_divisor() -> usize { 4 }
fn default_pack_ceiling() -> f64 { 2.0 }
fn default_overcrowding_divisor() -> f64 { 3.0 }
fn default_pack_census() -> PackCensus { PackCensus::Population }
fn default_selection_strategy() -> SelectionStrategy { SelectionStrategy::TournamentBackfill }
fn default_plasticity_drift() -> f64 { 0.02 }
fn default_playfulness_drift() -> f64 { 0.02 }
fn default_aggression_drift() -> f64 { 0.01 }
fn default_point_span() -> f64 { 0.15 }
fn default_point_offset() -> f64 { 0.1 }
fn default_point_slots() -> usize { 5 }
fn default_generation_cap() -> Option<u64> { Some(5000) }
fn default_summary_every() -> u64 { 100 }

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            elite_divisor: default_elite_divisor(),
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            pack_ceiling: default_pack_ceiling(),
            overcrowding_divisor: default_overcrowding_divisor(),
            pack_census: default_pack_census(),
        }
    }
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            strategy: default_selection_strategy(),
        }
    }
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            plasticity_drift: default_plasticity_drift(),
            playfulness_drift: default_playfulness_drift(),
            aggression_drift: default_aggression_drift(),
            point_span: default_point_span(),
            point_offset: default_point_offset(),
            point_slots: default_point_slots(),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            generation_cap: default_generation_cap(),
            seed: None,
            summary_every: default_summary_every(),
        }
    }
}

impl FoodConfig {
    /// The lighter model variant: C1 = 1.5, C2 = 2.5.
    pub fn lean() -> Self {
        Self {
            pack_ceiling: 1.5,
            overcrowding_divisor: 2.5,
            pack_census: PackCensus::Population,
        }
    }
}

impl PopulationConfig {
    /// Elite count E.
    pub fn elite_count(&self) -> usize {
        self.size / self.elite_divisor.max(1) + 1
    }

    /// Size of every bred generation: four offspring per non-top elite.
    pub fn offspring_count(&self) -> usize {
        4 * self.elite_count().saturating_sub(1)
    }
}

impl SimulationConfig {
    /// Check the invariants a run depends on.
    pub fn validate(&self) -> Result<()> {
        let pop = &self.population;
        if pop.size == 0 {
            return Err(CanidError::invalid_config("population.size", "must be > 0"));
        }
        if pop.elite_divisor == 0 {
            return Err(CanidError::invalid_config(
                "population.elite_divisor",
                "must be > 0",
            ));
        }
        let elites = pop.elite_count();
        if elites > pop.size {
            return Err(CanidError::invalid_config(
                "population.size",
                format!("elite count {} exceeds population size {}", elites, pop.size),
            ));
        }
        if elites < 2 {
            return Err(CanidError::invalid_config(
                "population.elite_divisor",
                format!("elite count {} leaves nobody to breed with", elites),
            ));
        }

        let food = &self.food;
        if !food.pack_ceiling.is_finite() {
            return Err(CanidError::invalid_config("food.pack_ceiling", "must be finite"));
        }
        if !food.overcrowding_divisor.is_finite() || food.overcrowding_divisor == 0.0 {
            return Err(CanidError::invalid_config(
                "food.overcrowding_divisor",
                "must be finite and non-zero",
            ));
        }

        let m = &self.mutation;
        for (field, value) in [
            ("mutation.plasticity_drift", m.plasticity_drift),
            ("mutation.playfulness_drift", m.playfulness_drift),
            ("mutation.aggression_drift", m.aggression_drift),
            ("mutation.point_span", m.point_span),
            ("mutation.point_offset", m.point_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CanidError::invalid_config(
                    field,
                    format!("{} is not a finite non-negative magnitude", value),
                ));
            }
        }
        if m.point_slots < 5 {
            return Err(CanidError::invalid_config(
                "mutation.point_slots",
                "must cover all five traits",
            ));
        }

        if self.run.summary_every == 0 {
            return Err(CanidError::invalid_config("run.summary_every", "must be > 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population.elite_count(), 6);
        assert_eq!(config.population.offspring_count(), 20);
    }

    #[test]
    fn empty_population_rejected() {
        let mut config = SimulationConfig::default();
        config.population.size = 0;
        assert!(matches!(
            config.validate(),
            Err(CanidError::InvalidConfig { ref field, .. }) if field == "population.size"
        ));
    }

    #[test]
    fn elites_larger_than_population_rejected() {
        let mut config = SimulationConfig::default();
        config.population.size = 1;
        config.population.elite_divisor = 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn single_elite_rejected() {
        let mut config = SimulationConfig::default();
        config.population.size = 3;
        assert_eq!(config.population.elite_count(), 1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_overcrowding_divisor_rejected() {
        let mut config = SimulationConfig::default();
        config.food.overcrowding_divisor = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_drift_rejected() {
        let mut config = SimulationConfig::default();
        config.mutation.aggression_drift = -0.01;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
            [food]
            pack_ceiling = 1.5
            pack_census = "disabled"

            [selection]
            strategy = "first_come"
            "#,
        )
        .unwrap();

        assert_eq!(config.food.pack_ceiling, 1.5);
        assert_eq!(config.food.overcrowding_divisor, 3.0);
        assert_eq!(config.food.pack_census, PackCensus::Disabled);
        assert_eq!(config.selection.strategy, SelectionStrategy::FirstCome);
        assert_eq!(config.population.size, 20);
        assert_eq!(config.run.generation_cap, Some(5000));
    }

    #[test]
    fn zero_cap_means_uncapped() {
        let config: SimulationConfig = toml::from_str("[run]\ngeneration_cap = 0\n").unwrap();
        assert_eq!(config.run.generation_cap, None);
    }

    #[test]
    fn uncapped_config_survives_a_save() {
        let mut config = SimulationConfig::default();
        config.run.generation_cap = None;
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("generation_cap = 0"));

        let back: SimulationConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn lean_variant_is_valid() {
        let config = SimulationConfig {
            food: FoodConfig::lean(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
