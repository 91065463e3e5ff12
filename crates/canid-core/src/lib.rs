//! # Canid Core
//!
//! Core types for the canid domestication simulation.
//!
//! A [`types::Wolf`] carries five heritable traits: pack affinity,
//! aggression, fear, plasticity and playfulness, each in [0, 1]. A
//! [`population::Population`] is one generation of wolves. The
//! [`config::SimulationConfig`] holds every tunable constant of the model.
//!
//! ## Quick Start
//!
//! ```rust
//! use canid_core::prelude::*;
//!
//! let wolf = Wolf::new(0.7, 0.3, 0.02, 0.8, 0.9);
//! assert!(wolf.is_domesticated());
//!
//! let config = SimulationConfig::default();
//! assert_eq!(config.population.elite_count(), 6);
//! ```

pub mod types;
pub mod population;
pub mod config;
pub mod error;
pub mod prelude;
