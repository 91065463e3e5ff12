//! # Canid Evolution
//!
//! The genetic-algorithm engine of the domestication simulation.
//!
//! One generation runs through four stages:
//!
//! 1. [`fitness::FitnessModel`] scores every wolf by the food it gathers
//!    from its pack, from solo hunting and from humans.
//! 2. An [`selection::EliteSelector`] keeps E elites and picks the top performer.
//! 3. [`breeding::breed`] crosses the top performer with each remaining elite.
//! 4. [`mutation::MutationEngine`] drifts and point-mutates every pup.
//!
//! ```rust
//! use canid_core::prelude::*;
//! use canid_evolution::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(1);
//! let mut population = Population::seed(20, &mut rng);
//!
//! FitnessModel::default().score(&mut population);
//! let selection = TournamentBackfill.select(&population, 6).unwrap();
//! let mut pups = breed(&population, &selection);
//! MutationEngine::default().mutate_population(&mut pups, &mut rng);
//!
//! assert_eq!(pups.len(), 20);
//! ```

pub mod fitness;
pub mod selection;
pub mod breeding;
pub mod mutation;
pub mod metrics;
pub mod prelude;
