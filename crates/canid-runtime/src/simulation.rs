//! The generation loop.
//!
//! Each step first checks whether the current population already holds a
//! domesticated wolf, then whether the generation cap has been passed, and
//! only then scores, selects, breeds and mutates to produce the next
//! generation. The loop owns the only live population and replaces it
//! wholesale every generation.

use crate::snapshot::{SnapshotReport, SnapshotSink};
use canid_core::config::SimulationConfig;
use canid_core::error::Result;
use canid_core::population::Population;
use canid_core::types::Wolf;
use canid_evolution::fitness::FitnessModel;
use canid_evolution::metrics::{summarize, GenerationSummary};
use canid_evolution::mutation::MutationEngine;
use canid_evolution::selection::{selector_for, EliteSelector};
use canid_evolution::breeding::breed;
use rand::Rng;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    Running,
    Domesticated,
    Exhausted,
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A domesticated wolf turned up in `generation`.
    Domesticated {
        generation: u64,
        /// Index of the wolf within its generation.
        index: usize,
        wolf: Wolf,
        /// Food the wolf gathers against the population it was found in.
        food: f64,
    },
    /// The generation cap was passed, or the population died out.
    Exhausted {
        generation: u64,
        population: Population,
    },
}

impl Outcome {
    pub fn generation(&self) -> u64 {
        match self {
            Outcome::Domesticated { generation, .. } | Outcome::Exhausted { generation, .. } => {
                *generation
            }
        }
    }

    pub fn status(&self) -> LoopStatus {
        match self {
            Outcome::Domesticated { .. } => LoopStatus::Domesticated,
            Outcome::Exhausted { .. } => LoopStatus::Exhausted,
        }
    }
}

/// Result of one call to [`SimulationLoop::step`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// A new generation was bred; carries the summary of the scored parent generation.
    Advanced(GenerationSummary),
    Halted(Outcome),
}

/// Everything that carries over from one generation to the next.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub population: Population,
    pub generation: u64,
}

impl SimulationState {
    pub fn new(population: Population, generation: u64) -> Self {
        Self {
            population,
            generation,
        }
    }
}

/// Result of a whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub outcome: Outcome,
    pub snapshots: SnapshotReport,
}

pub struct SimulationLoop<R, S> {
    config: SimulationConfig,
    model: FitnessModel,
    selector: Box<dyn EliteSelector>,
    mutation: MutationEngine,
    rng: R,
    sink: S,
    state: SimulationState,
    outcome: Option<Outcome>,
}

impl<R: Rng, S: SnapshotSink> SimulationLoop<R, S> {
    /// Validate `config`, seed generation 0 and snapshot it.
    pub fn new(config: SimulationConfig, mut rng: R, sink: S) -> Result<Self> {
        config.validate()?;
        let population = Population::seed(config.population.size, &mut rng);
        let mut sim = Self::build(config, SimulationState::new(population, 0), rng, sink);
        sim.sink.write_generation(&sim.state.population, 0);
        Ok(sim)
    }

    /// Continue from an existing state. Nothing is snapshotted until the next generation.
    pub fn resume(config: SimulationConfig, state: SimulationState, rng: R, sink: S) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, state, rng, sink))
    }

    fn build(config: SimulationConfig, state: SimulationState, rng: R, sink: S) -> Self {
        Self {
            model: FitnessModel::new(config.food.clone()),
            selector: selector_for(config.selection.strategy),
            mutation: MutationEngine::new(config.mutation.clone()),
            config,
            rng,
            sink,
            state,
            outcome: None,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn status(&self) -> LoopStatus {
        self.outcome
            .as_ref()
            .map(Outcome::status)
            .unwrap_or(LoopStatus::Running)
    }

    /// Advance by one generation, or report why the run is over.
    pub fn step(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Halted(outcome.clone());
        }

        if let Some(outcome) = self.check_termination() {
            info!(
                generation = outcome.generation(),
                status = ?outcome.status(),
                "simulation halted"
            );
            self.outcome = Some(outcome.clone());
            return Step::Halted(outcome);
        }

        let generation = self.state.generation;
        let population = &mut self.state.population;
        self.model.score(population);
        let summary = summarize(generation, population, &self.model);

        let Some(selection) = self
            .selector
            .select(population, self.config.population.elite_count())
        else {
            let outcome = Outcome::Exhausted {
                generation,
                population: population.clone(),
            };
            info!(generation, "population died out");
            self.outcome = Some(outcome.clone());
            return Step::Halted(outcome);
        };

        let mut pups = breed(population, &selection);
        self.mutation.mutate_population(&mut pups, &mut self.rng);

        debug!(
            generation,
            top = selection.top,
            top_food = population.wolves()[selection.top].fitness(),
            mean_food = summary.mean_food,
            pups = pups.len(),
            "generation bred"
        );
        if generation % self.config.run.summary_every == 0 {
            info!(
                generation,
                pack_size = summary.pack_size,
                mean_food = summary.mean_food,
                mean_fear = summary.mean_fear,
                mean_aggression = summary.mean_aggression,
                "progress"
            );
        }

        self.state = SimulationState::new(pups, generation + 1);
        self.sink
            .write_generation(&self.state.population, self.state.generation);

        Step::Advanced(summary)
    }

    fn check_termination(&self) -> Option<Outcome> {
        let population = &self.state.population;
        let generation = self.state.generation;

        if let Some((index, wolf)) = population.first_domesticated() {
            let food = self.model.total_food(wolf, population.wolves(), population.len());
            return Some(Outcome::Domesticated {
                generation,
                index,
                wolf: wolf.clone(),
                food,
            });
        }

        match self.config.run.generation_cap {
            Some(cap) if generation > cap => Some(Outcome::Exhausted {
                generation,
                population: population.clone(),
            }),
            _ => None,
        }
    }

    /// Step until the run halts, handing each generation's summary to `observer`.
    pub fn drive(&mut self, mut observer: impl FnMut(&GenerationSummary)) -> Outcome {
        loop {
            match self.step() {
                Step::Advanced(summary) => observer(&summary),
                Step::Halted(outcome) => return outcome,
            }
        }
    }

    pub fn run_with(mut self, observer: impl FnMut(&GenerationSummary)) -> RunReport {
        info!(
            population = self.config.population.size,
            elites = self.config.population.elite_count(),
            cap = ?self.config.run.generation_cap,
            "simulation started"
        );
        let outcome = self.drive(observer);
        let snapshots = self.sink.finish();
        info!(
            written = snapshots.written,
            failed = snapshots.failed,
            "snapshots flushed"
        );
        RunReport { outcome, snapshots }
    }

    pub fn run(self) -> RunReport {
        self.run_with(|_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{MemorySnapshots, NullSnapshots};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn wild(n: usize) -> Population {
        (0..n).map(|_| Wolf::new(0.5, 0.65, 0.85, 0.1, 0.1)).collect()
    }

    #[test]
    fn new_snapshots_generation_zero() {
        let sim = SimulationLoop::new(
            SimulationConfig::default(),
            StdRng::seed_from_u64(1),
            MemorySnapshots::new(),
        )
        .unwrap();
        assert_eq!(sim.sink().generations().len(), 1);
        assert_eq!(sim.sink().generations()[0].0, 0);
        assert_eq!(sim.state().population.len(), 20);
        assert_eq!(sim.status(), LoopStatus::Running);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let mut config = SimulationConfig::default();
        config.population.size = 0;
        assert!(SimulationLoop::new(config, StdRng::seed_from_u64(1), NullSnapshots).is_err());
    }

    #[test]
    fn step_advances_generation_and_snapshots() {
        let mut sim = SimulationLoop::resume(
            SimulationConfig::default(),
            SimulationState::new(wild(20), 0),
            StdRng::seed_from_u64(2),
            MemorySnapshots::new(),
        )
        .unwrap();

        let Step::Advanced(summary) = sim.step() else {
            panic!("wild population should not halt");
        };
        assert_eq!(summary.generation, 0);
        assert_eq!(sim.state().generation, 1);
        assert_eq!(sim.state().population.len(), 20);
        assert_eq!(sim.sink().generations()[0].0, 1);
    }

    #[test]
    fn cap_exhausts_after_passing_limit() {
        let mut config = SimulationConfig::default();
        config.run.generation_cap = Some(3);
        let mut sim = SimulationLoop::resume(
            config,
            SimulationState::new(wild(20), 3),
            StdRng::seed_from_u64(3),
            NullSnapshots,
        )
        .unwrap();

        assert!(matches!(sim.step(), Step::Advanced(_)));
        match sim.step() {
            Step::Halted(Outcome::Exhausted { generation, population }) => {
                assert_eq!(generation, 4);
                assert_eq!(population.len(), 20);
            }
            other => panic!("expected exhaustion, got {:?}", other),
        }
        assert_eq!(sim.status(), LoopStatus::Exhausted);
    }

    #[test]
    fn halted_loop_stays_halted() {
        let mut pop = wild(20);
        pop.wolves_mut()[0] = Wolf::new(0.5, 0.1, 0.01, 0.9, 0.9);
        let mut sim = SimulationLoop::resume(
            SimulationConfig::default(),
            SimulationState::new(pop, 0),
            StdRng::seed_from_u64(4),
            NullSnapshots,
        )
        .unwrap();

        let first = sim.step();
        assert_eq!(sim.step(), first);
        assert_eq!(sim.state().generation, 0);
    }
}
