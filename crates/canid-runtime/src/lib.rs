//! # Canid Runtime
//!
//! Drives the domestication simulation forward.
//!
//! The [`simulation::SimulationLoop`] owns the current population and steps
//! it generation by generation until a domesticated wolf appears or the
//! generation cap is passed. Every new generation is handed to a
//! [`snapshot::SnapshotSink`]; the default sink writes JSON files on a
//! background thread.

pub mod simulation;
pub mod snapshot;
pub mod setup;
pub mod prelude;
