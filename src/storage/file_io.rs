//! On-disk layout of the persisted collections
//!
//! Each collection is one pretty-printed JSON array. Writes land in a
//! sibling `.json.tmp` file first and are renamed over the target, so a
//! reader sees either the old array or the new one.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::error::SpendError;

fn storage_error(action: &str, path: &Path, err: impl std::fmt::Display) -> SpendError {
    SpendError::Storage(format!("Failed to {} {}: {}", action, path.display(), err))
}

/// Load a collection, treating a missing file as an empty one
pub fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, SpendError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted state, starting empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(storage_error("read", path, e)),
    };

    serde_json::from_slice(&bytes).map_err(|e| storage_error("parse", path, e))
}

/// Replace the collection stored at `path`
pub fn store_collection<T: Serialize>(path: &Path, items: &[T]) -> Result<(), SpendError> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("create directory", dir, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let written = File::create(&staging)
        .map_err(|e| storage_error("create", &staging, e))
        .and_then(|file| {
            let mut out = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut out, items)
                .map_err(|e| storage_error("serialize", path, e))?;
            out.flush().map_err(|e| storage_error("flush", &staging, e))?;
            out.get_ref()
                .sync_all()
                .map_err(|e| storage_error("sync", &staging, e))
        })
        .and_then(|()| fs::rename(&staging, path).map_err(|e| storage_error("replace", path, e)));

    if written.is_err() {
        let _ = fs::remove_file(&staging);
    }
    written?;

    debug!(path = %path.display(), count = items.len(), "wrote collection");
    Ok(())
}
