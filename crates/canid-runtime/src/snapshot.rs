//! Generation snapshots.
//!
//! Each generation is written to `generation_<g>.json` as a pretty-printed
//! JSON object mapping wolf index to its trait record. A failed write is
//! logged and counted; it never stops the simulation.
//!
//! [`BackgroundSnapshots`] moves the file I/O onto a dedicated writer
//! thread. Its queue is bounded, so a slow disk throttles the loop instead
//! of piling populations up in memory.

use canid_core::error::{CanidError, Result};
use canid_core::population::Population;
use canid_core::types::Wolf;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread::JoinHandle;
use tracing::{debug, warn};

pub const SNAPSHOT_PREFIX: &str = "generation_";
pub const SNAPSHOT_EXTENSION: &str = "json";

pub fn snapshot_file_name(generation: u64) -> String {
    format!("{}{}.{}", SNAPSHOT_PREFIX, generation, SNAPSHOT_EXTENSION)
}

/// Generation index encoded in a snapshot file name, if it is one.
pub fn parse_snapshot_file_name(name: &str) -> Option<u64> {
    name.strip_prefix(SNAPSHOT_PREFIX)?
        .strip_suffix(SNAPSHOT_EXTENSION)?
        .strip_suffix('.')?
        .parse()
        .ok()
}

/// Outcome counts for a sink's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotReport {
    pub written: u64,
    pub failed: u64,
}

/// Durable record of each generation.
pub trait SnapshotSink {
    /// Record `population` as generation `generation`. Failures are logged, not returned.
    fn write_generation(&mut self, population: &Population, generation: u64);

    /// Flush outstanding work and report totals.
    fn finish(self) -> SnapshotReport
    where
        Self: Sized;
}

/// Snapshot files in one directory, written synchronously.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    dir: PathBuf,
    report: SnapshotReport,
}

impl SnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            report: SnapshotReport::default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, generation: u64) -> PathBuf {
        self.dir.join(snapshot_file_name(generation))
    }

    /// Write one generation, returning the file path.
    pub fn write(&self, population: &Population, generation: u64) -> Result<PathBuf> {
        let records: BTreeMap<usize, &Wolf> = population.iter().enumerate().collect();
        let json = serde_json::to_string_pretty(&records)?;
        let path = self.path_for(generation);
        std::fs::write(&path, json)?;
        Ok(path)
    }

    /// Read one generation back, in index order.
    pub fn load_generation(&self, generation: u64) -> Result<Population> {
        let path = self.path_for(generation);
        if !path.exists() {
            return Err(CanidError::SnapshotNotFound(path));
        }
        let json = std::fs::read_to_string(&path)?;
        let records: BTreeMap<usize, Wolf> = serde_json::from_str(&json)?;
        Ok(records.into_values().collect())
    }

    /// Generation indices present on disk, ascending.
    pub fn generations(&self) -> Result<Vec<u64>> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            if let Some(generation) = entry.file_name().to_str().and_then(parse_snapshot_file_name) {
                found.push(generation);
            }
        }
        found.sort_unstable();
        Ok(found)
    }

    pub fn latest_generation(&self) -> Result<Option<u64>> {
        Ok(self.generations()?.last().copied())
    }
}

impl SnapshotSink for SnapshotStore {
    fn write_generation(&mut self, population: &Population, generation: u64) {
        match self.write(population, generation) {
            Ok(path) => {
                self.report.written += 1;
                debug!(generation, path = %path.display(), "snapshot written");
            }
            Err(e) => {
                self.report.failed += 1;
                warn!(generation, error = %e, "failed to write snapshot");
            }
        }
    }

    fn finish(self) -> SnapshotReport {
        self.report
    }
}

/// Generations that may wait for the writer before the loop blocks.
pub const SNAPSHOT_QUEUE_DEPTH: usize = 64;

/// Snapshots on a writer thread behind a bounded queue.
///
/// The loop hands a population off and moves on until the queue is full,
/// then waits for the writer to catch up.
pub struct BackgroundSnapshots {
    tx: Option<mpsc::SyncSender<(Population, u64)>>,
    worker: Option<JoinHandle<SnapshotReport>>,
    undelivered: u64,
}

impl BackgroundSnapshots {
    /// Spawn a writer thread that owns `store`.
    pub fn spawn(store: SnapshotStore) -> Self {
        Self::with_queue_depth(store, SNAPSHOT_QUEUE_DEPTH)
    }

    /// Spawn a writer thread with room for `depth` pending generations.
    pub fn with_queue_depth(store: SnapshotStore, depth: usize) -> Self {
        let (tx, rx) = mpsc::sync_channel::<(Population, u64)>(depth.max(1));

        let worker = std::thread::spawn(move || {
            let mut store = store;
            while let Ok((population, generation)) = rx.recv() {
                store.write_generation(&population, generation);
            }
            store.finish()
        });

        Self {
            tx: Some(tx),
            worker: Some(worker),
            undelivered: 0,
        }
    }
}

impl SnapshotSink for BackgroundSnapshots {
    fn write_generation(&mut self, population: &Population, generation: u64) {
        let delivered = self
            .tx
            .as_ref()
            .map(|tx| tx.send((population.clone(), generation)).is_ok())
            .unwrap_or(false);
        if !delivered {
            self.undelivered += 1;
            warn!(generation, "snapshot writer has shut down; snapshot dropped");
        }
    }

    fn finish(mut self) -> SnapshotReport {
        // Closing the channel lets the writer drain and exit.
        drop(self.tx.take());
        let mut report = match self.worker.take().map(JoinHandle::join) {
            Some(Ok(report)) => report,
            Some(Err(_)) => {
                warn!("snapshot writer thread panicked");
                SnapshotReport::default()
            }
            None => SnapshotReport::default(),
        };
        report.failed += self.undelivered;
        report
    }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSnapshots;

impl SnapshotSink for NullSnapshots {
    fn write_generation(&mut self, _population: &Population, _generation: u64) {}

    fn finish(self) -> SnapshotReport {
        SnapshotReport::default()
    }
}

/// Keeps every snapshot in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshots {
    generations: Vec<(u64, Population)>,
}

impl MemorySnapshots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generations(&self) -> &[(u64, Population)] {
        &self.generations
    }
}

impl SnapshotSink for MemorySnapshots {
    fn write_generation(&mut self, population: &Population, generation: u64) {
        self.generations.push((generation, population.clone()));
    }

    fn finish(self) -> SnapshotReport {
        SnapshotReport {
            written: self.generations.len() as u64,
            failed: 0,
        }
    }
}
