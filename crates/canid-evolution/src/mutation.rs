//! Heritable drift applied to every pup after breeding.
//!
//! Per pup, in order:
//! 1. Calm pups (fear <= 0.3) gain plasticity, the mark of humans
//!    selecting for tractable animals.
//! 2. Plastic pups (plasticity >= 0.35, after step 1) gain playfulness and
//!    lose aggression.
//! 3. One trait picked at random takes a point mutation of
//!    `span * U - offset`, U uniform in [0, 1).
//!
//! Every perturbation is clamped to [0, 1] after it is applied.

use canid_core::config::MutationConfig;
use canid_core::population::Population;
use canid_core::types::{TraitKind, Wolf};
use rand::Rng;

/// Fear at or below which plasticity drifts upward.
pub const DRIFT_FEAR: f64 = 0.3;
/// Plasticity at which temperament shifts toward play.
pub const SHIFT_PLASTICITY: f64 = 0.35;

/// A point mutation that was applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMutation {
    pub kind: TraitKind,
    /// Requested change, before clamping.
    pub delta: f64,
}

/// Trait hit by point-mutation slot `slot`. Slots past the fifth land on fear.
pub fn trait_for_slot(slot: usize) -> TraitKind {
    TraitKind::ALL.get(slot).copied().unwrap_or(TraitKind::Fear)
}

#[derive(Debug, Clone)]
pub struct MutationEngine {
    config: MutationConfig,
}

impl MutationEngine {
    pub fn new(config: MutationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Steps 1 and 2: the deterministic drift.
    pub fn drift(&self, wolf: &mut Wolf) {
        if wolf.fear <= DRIFT_FEAR {
            wolf.nudge(TraitKind::Plasticity, self.config.plasticity_drift);
        }
        if wolf.plasticity >= SHIFT_PLASTICITY {
            wolf.nudge(TraitKind::Playfulness, self.config.playfulness_drift);
            wolf.nudge(TraitKind::Aggression, -self.config.aggression_drift);
        }
    }

    /// Step 3: one random point mutation.
    pub fn point_mutate<R: Rng + ?Sized>(&self, wolf: &mut Wolf, rng: &mut R) -> PointMutation {
        let slot = rng.gen_range(0..self.config.point_slots.max(1));
        let kind = trait_for_slot(slot);
        let delta = self.config.point_span * rng.gen::<f64>() - self.config.point_offset;
        wolf.nudge(kind, delta);
        PointMutation { kind, delta }
    }

    pub fn mutate<R: Rng + ?Sized>(&self, wolf: &mut Wolf, rng: &mut R) -> PointMutation {
        self.drift(wolf);
        self.point_mutate(wolf, rng)
    }

    /// Mutate every wolf in place.
    pub fn mutate_population<R: Rng + ?Sized>(&self, population: &mut Population, rng: &mut R) {
        for wolf in population.wolves_mut() {
            self.mutate(wolf, rng);
        }
    }
}

impl Default for MutationEngine {
    fn default() -> Self {
        Self::new(MutationConfig::default())
    }
}
