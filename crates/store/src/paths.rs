//! Data directory resolution and JSON file helpers.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

const APP_DIR: &str = "tui-snake";

pub const SETTINGS_FILE: &str = "settings.json";
pub const SCORES_FILE: &str = "scores.json";
pub const ACHIEVEMENTS_FILE: &str = "achievements.json";

/// Where the records live: `explicit` if given, else the platform data
/// directory (`~/.local/share/tui-snake` on Linux), else the working directory.
pub fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| dirs::data_dir().map(|d| d.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read and parse `path`. `Ok(None)` when the file does not exist.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to read {}", path.display()));
        }
    };
    let value = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(value))
}

/// Pretty-print `value` to `path` via a temp file in the same directory and an
/// atomic rename, so readers never see a partial file.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;

    let json = serde_json::to_vec_pretty(value).context("Failed to serialize record")?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(&json)
        .and_then(|_| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;
    Ok(())
}

/// Load `path`, falling back to `T::default()`.
///
/// A missing file is created with the defaults. A broken file is logged and left
/// alone until the next save overwrites it.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Serialize + Default,
{
    match read_json(path) {
        Ok(Some(value)) => value,
        Ok(None) => {
            let value = T::default();
            if let Err(err) = write_json_atomic(path, &value) {
                tracing::warn!(
                    path = %path.display(),
                    error = %format!("{err:#}"),
                    "could not write defaults"
                );
            }
            value
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %format!("{err:#}"), "using defaults");
            T::default()
        }
    }
}
