//! Canid Core Prelude - convenient imports for common usage.
//!
//! ```rust
//! use canid_core::prelude::*;
//! ```

pub use crate::types::{
    Wolf, TraitKind,
    clamp_unit,
    DOMESTICATED_FEAR, DOMESTICATED_AGGRESSION,
};

pub use crate::population::Population;

pub use crate::config::{
    SimulationConfig, PopulationConfig, FoodConfig, SelectionConfig,
    MutationConfig, RunConfig, PackCensus, SelectionStrategy,
};

pub use crate::error::{CanidError, Result};
