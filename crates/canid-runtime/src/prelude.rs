//! Canid Runtime Prelude - convenient imports for common usage.
//!
//! ```rust
//! use canid_runtime::prelude::*;
//! ```

pub use crate::simulation::{
    SimulationLoop, SimulationState, Outcome, Step, LoopStatus, RunReport,
};

pub use crate::snapshot::{
    SnapshotSink, SnapshotStore, SnapshotReport,
    BackgroundSnapshots, NullSnapshots, MemorySnapshots,
    snapshot_file_name, SNAPSHOT_QUEUE_DEPTH,
};

pub use crate::setup::prepare_snapshot_dir;

pub use canid_evolution::prelude::*;
