use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Serializes the whole document before touching the filesystem, so a failed
/// run never leaves a half-written output file behind.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize JSON: {}", e)))?;

    let output_err = |source| Error::Output { path: path.to_path_buf(), source };

    let mut file = File::create(path).map_err(output_err)?;
    file.write_all(json_str.as_bytes()).map_err(output_err)?;

    log::debug!("Wrote {} bytes to {}", json_str.len(), path.display());
    Ok(())
}
