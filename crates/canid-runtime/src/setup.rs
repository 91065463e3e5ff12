//! Snapshot directory setup, run once before generation 0.

use crate::snapshot::parse_snapshot_file_name;
use canid_core::error::Result;
use std::path::Path;
use tracing::info;

/// Make sure `dir` exists and holds no snapshots from an earlier run.
///
/// Only `generation_<g>.json` files are removed; anything else in the
/// directory is left alone. Returns how many files were removed.
pub fn prepare_snapshot_dir(dir: &Path) -> Result<usize> {
    std::fs::create_dir_all(dir)?;

    let mut removed = 0;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let is_snapshot = entry
            .file_name()
            .to_str()
            .and_then(parse_snapshot_file_name)
            .is_some();
        if is_snapshot && entry.file_type()?.is_file() {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    info!(dir = %dir.display(), removed, "snapshot directory ready");
    Ok(removed)
}
