//! Canid Evolution Prelude - convenient imports for common usage.
//!
//! ```rust
//! use canid_evolution::prelude::*;
//! ```

pub use crate::fitness::{FitnessModel, is_in_pack, individual_food, human_food};
pub use crate::selection::{EliteSelector, Selection, TournamentBackfill, FirstCome, selector_for};
pub use crate::breeding::{breed, cross};
pub use crate::mutation::{MutationEngine, PointMutation};
pub use crate::metrics::{GenerationSummary, summarize};
