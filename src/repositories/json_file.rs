use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{path} is not a JSON array: {source}")]
    Format { path: PathBuf, source: serde_json::Error },
}

/// Reads a JSON array, skipping elements that do not match `T`.
pub(crate) fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| StoreError::Read { path: path.to_path_buf(), source })?;
    let items: Vec<Value> = serde_json::from_str(&raw)
        .map_err(|source| StoreError::Format { path: path.to_path_buf(), source })?;

    let total = items.len();
    let mut records = Vec::with_capacity(total);
    for (position, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item) {
            Ok(record) => records.push(record),
            Err(err) => {
                tracing::warn!(path = %path.display(), position, error = %err, "Skipping malformed record");
            }
        }
    }

    if records.len() < total {
        tracing::warn!(
            path = %path.display(),
            kept = records.len(),
            skipped = total - records.len(),
            "Some records were skipped"
        );
    }

    Ok(records)
}
