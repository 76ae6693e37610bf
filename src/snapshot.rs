//! Loading scan-result snapshots produced by the evaluation engine.

use crate::types::ScanSnapshot;
use log::debug;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

/// Errors raised while reading a snapshot
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse scan results: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Load a snapshot from a JSON file
pub fn load_snapshot(path: &Path) -> Result<ScanSnapshot, SnapshotError> {
    debug!("Loading scan results from {:?}", path);
    let file = File::open(path).map_err(|source| SnapshotError::Io { path: path.to_path_buf(), source })?;
    let snapshot = read_snapshot(BufReader::new(file))?;
    debug!("Loaded {} controls and {} resources", snapshot.controls.len(), snapshot.resources.len());
    Ok(snapshot)
}

/// Parse a snapshot from any reader (stdin, in-memory buffers)
pub fn read_snapshot<R: Read>(reader: R) -> Result<ScanSnapshot, SnapshotError> {
    Ok(serde_json::from_reader(reader)?)
}
