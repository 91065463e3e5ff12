//! Shared types used across the canid crates.

use serde::{Deserialize, Serialize};

/// Fear below which a wolf counts as domesticated.
pub const DOMESTICATED_FEAR: f64 = 0.03;
/// Aggression below which a wolf counts as domesticated.
pub const DOMESTICATED_AGGRESSION: f64 = 0.35;

/// Bound a trait value to the unit interval.
pub fn clamp_unit(value: f64) -> f64 {
    value.max(0.0).min(1.0)
}

/// The five heritable traits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraitKind {
    PackAffinity,
    Aggression,
    Fear,
    Plasticity,
    Playfulness,
}

impl TraitKind {
    /// All traits, in point-mutation slot order.
    pub const ALL: [TraitKind; 5] = [
        TraitKind::PackAffinity,
        TraitKind::Aggression,
        TraitKind::Fear,
        TraitKind::Plasticity,
        TraitKind::Playfulness,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TraitKind::PackAffinity => "pack_affinity",
            TraitKind::Aggression => "aggression",
            TraitKind::Fear => "fear",
            TraitKind::Plasticity => "plasticity",
            TraitKind::Playfulness => "playfulness",
        }
    }
}

impl std::fmt::Display for TraitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A single wolf: five heritable traits plus the food it gathered this generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wolf {
    /// Tendency to join a pack.
    pub pack_affinity: f64,
    /// Hunting drive.
    pub aggression: f64,
    /// Wariness of humans.
    pub fear: f64,
    /// Behavioural adaptability.
    pub plasticity: f64,
    /// Sociability toward humans.
    pub playfulness: f64,
    /// Food gathered in the current generation. `None` until scored.
    /// Not clamped; may be negative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<f64>,
}

impl Wolf {
    pub fn new(
        pack_affinity: f64,
        aggression: f64,
        fear: f64,
        plasticity: f64,
        playfulness: f64,
    ) -> Self {
        Self {
            pack_affinity,
            aggression,
            fear,
            plasticity,
            playfulness,
            food: None,
        }
    }

    pub fn get(&self, kind: TraitKind) -> f64 {
        match kind {
            TraitKind::PackAffinity => self.pack_affinity,
            TraitKind::Aggression => self.aggression,
            TraitKind::Fear => self.fear,
            TraitKind::Plasticity => self.plasticity,
            TraitKind::Playfulness => self.playfulness,
        }
    }

    pub fn get_mut(&mut self, kind: TraitKind) -> &mut f64 {
        match kind {
            TraitKind::PackAffinity => &mut self.pack_affinity,
            TraitKind::Aggression => &mut self.aggression,
            TraitKind::Fear => &mut self.fear,
            TraitKind::Plasticity => &mut self.plasticity,
            TraitKind::Playfulness => &mut self.playfulness,
        }
    }

    /// Add `delta` to a trait, clamping the result to [0, 1].
    pub fn nudge(&mut self, kind: TraitKind, delta: f64) {
        let value = self.get_mut(kind);
        *value = clamp_unit(*value + delta);
    }

    /// Fitness used for selection. Unscored wolves rank below every scored one.
    pub fn fitness(&self) -> f64 {
        self.food.unwrap_or(f64::NEG_INFINITY)
    }

    /// Whether every heritable trait lies in [0, 1].
    pub fn traits_in_bounds(&self) -> bool {
        TraitKind::ALL
            .iter()
            .all(|&kind| (0.0..=1.0).contains(&self.get(kind)))
    }

    /// A wolf is domesticated once it has almost no fear and little aggression.
    pub fn is_domesticated(&self) -> bool {
        self.fear < DOMESTICATED_FEAR && self.aggression < DOMESTICATED_AGGRESSION
    }

    /// Copy of the traits with the food score cleared.
    pub fn unscored(&self) -> Self {
        Self {
            food: None,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_bounds_both_ends() {
        assert_eq!(clamp_unit(-0.2), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
    }

    #[test]
    fn nudge_clamps_after_perturbation() {
        let mut w = Wolf::new(0.99, 0.005, 0.5, 0.5, 0.5);
        w.nudge(TraitKind::PackAffinity, 0.05);
        w.nudge(TraitKind::Aggression, -0.01);
        assert_eq!(w.pack_affinity, 1.0);
        assert_eq!(w.aggression, 0.0);
    }

    #[test]
    fn domestication_thresholds_are_strict() {
        assert!(Wolf::new(0.5, 0.30, 0.02, 0.5, 0.5).is_domesticated());
        assert!(!Wolf::new(0.5, 0.35, 0.02, 0.5, 0.5).is_domesticated());
        assert!(!Wolf::new(0.5, 0.30, 0.03, 0.5, 0.5).is_domesticated());
    }

    #[test]
    fn unscored_wolf_ranks_lowest() {
        let mut scored = Wolf::new(0.5, 0.5, 0.5, 0.5, 0.5);
        scored.food = Some(-12.0);
        let unscored = scored.unscored();
        assert!(unscored.fitness() < scored.fitness());
    }

    #[test]
    fn food_is_omitted_from_json_until_scored() {
        let mut w = Wolf::new(0.5, 0.6, 0.8, 0.1, 0.1);
        let json = serde_json::to_string(&w).unwrap();
        assert!(!json.contains("food"));

        w.food = Some(0.78);
        let json = serde_json::to_string(&w).unwrap();
        assert!(json.contains("\"food\":0.78"));
    }
}
