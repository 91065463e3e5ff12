//! # Canid
//!
//! Artificial selection of wolves toward dogs, simulated with a hand-rolled
//! genetic algorithm.
//!
//! Each wolf carries five heritable traits. Every generation the food model
//! scores the pack, elites are selected, the top performer is crossed with
//! the other elites, and the pups drift and mutate. The run ends when a
//! wolf loses nearly all its fear and most of its aggression, or when the
//! generation cap is passed.
//!
//! ## Quick Start
//!
//! ```rust
//! use canid::prelude::*;
//! use canid::rand::SeedableRng;
//!
//! let mut config = SimulationConfig::default();
//! config.run.generation_cap = Some(100);
//!
//! let rng = canid::rand::rngs::StdRng::seed_from_u64(7);
//! let report = SimulationLoop::new(config, rng, NullSnapshots)?.run();
//!
//! match report.outcome {
//!     Outcome::Domesticated { generation, wolf, .. } => {
//!         println!("dog in generation {}: fear {:.3}", generation, wolf.fear);
//!     }
//!     Outcome::Exhausted { generation, .. } => {
//!         println!("still wild after {} generations", generation);
//!     }
//! }
//! # Ok::<(), CanidError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`canid_core`] - Wolves, populations, configuration, errors
//! - [`canid_evolution`] - Food model, selection, breeding, mutation, metrics
//! - [`canid_runtime`] - Generation loop, snapshots, directory setup
//!
//! ## The Food Model
//!
//! | Source | Who eats | Grows with |
//! |--------|----------|------------|
//! | Pack | pack affinity >= 0.7 | pack size, with diminishing returns |
//! | Solo hunt | everyone | aggression; fear > 0.4 costs food |
//! | Humans | fear <= 0.3 | playfulness, plasticity; fear <= 0.15 unlocks grain |

pub use canid_core;
pub use canid_evolution;
pub use canid_runtime;
pub use rand;

/// Everything needed to configure and run a simulation.
///
/// ```rust
/// use canid::prelude::*;
/// ```
pub mod prelude {
    // Wolves, populations, configuration, errors
    pub use canid_core::prelude::*;

    // Generation loop, snapshots, and the evolution engines
    pub use canid_runtime::prelude::*;
}
