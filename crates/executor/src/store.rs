//! Step persistence: the store trait, an in-memory store and a JSON file store.
//!
//! Archives are a versioned JSON envelope:
//!
//! ```json
//! { "version": 1, "steps": [ { "type": "compare", "indices": [0, 1], ... } ] }
//! ```

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sk_common::{SortError, Step};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Current archive format version.
pub const STEP_ARCHIVE_VERSION: u32 = 1;

/// Errors raised by a step store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported step archive version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for SortError {
    fn from(err: StoreError) -> Self {
        SortError::Persistence {
            reason: err.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ArchiveRef<'a> {
    version: u32,
    steps: &'a [Step],
}

#[derive(Deserialize)]
struct Archive {
    version: u32,
    steps: Vec<Step>,
}

/// Serialize steps to a pretty-printed archive.
pub fn to_json_string(steps: &[Step]) -> StoreResult<String> {
    let json = serde_json::to_string_pretty(&ArchiveRef {
        version: STEP_ARCHIVE_VERSION,
        steps,
    })?;
    debug!(steps = steps.len(), json_len = json.len(), "Serialized steps");
    Ok(json)
}

/// Parse an archive, rejecting versions other than [`STEP_ARCHIVE_VERSION`].
pub fn from_json_string(json: &str) -> StoreResult<Vec<Step>> {
    let archive: Archive = serde_json::from_str(json)?;
    if archive.version != STEP_ARCHIVE_VERSION {
        return Err(StoreError::UnsupportedVersion {
            version: archive.version,
        });
    }
    Ok(archive.steps)
}

/// Where a finished run's steps are kept.
///
/// `load` on a store that was never saved to (or was cleared) returns an
/// empty sequence, not an error.
pub trait StepStore: Send + Sync {
    fn save(&self, steps: &[Step]) -> StoreResult<()>;
    fn load(&self) -> StoreResult<Vec<Step>>;
    fn clear(&self) -> StoreResult<()>;
}

/// Keeps the last saved run in memory.
#[derive(Debug, Default)]
pub struct MemoryStepStore {
    steps: RwLock<Vec<Step>>,
}

impl MemoryStepStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepStore for MemoryStepStore {
    fn save(&self, steps: &[Step]) -> StoreResult<()> {
        *self.steps.write() = steps.to_vec();
        debug!(steps = steps.len(), "Steps saved to memory");
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Step>> {
        Ok(self.steps.read().clone())
    }

    fn clear(&self) -> StoreResult<()> {
        self.steps.write().clear();
        Ok(())
    }
}

/// Keeps the last saved run in a JSON file.
///
/// Writes go to a sibling temp file that is then renamed over the target.
#[derive(Debug, Clone)]
pub struct JsonFileStepStore {
    path: PathBuf,
}

impl JsonFileStepStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a save is staged in before it replaces the archive.
    pub fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

impl StepStore for JsonFileStepStore {
    fn save(&self, steps: &[Step]) -> StoreResult<()> {
        let json = to_json_string(steps)?;
        let staging = self.staging_path();

        if let Err(e) = write_synced(&staging, json.as_bytes())
            .and_then(|()| std::fs::rename(&staging, &self.path))
        {
            // The previous archive, if any, is still intact at `self.path`.
            let _ = std::fs::remove_file(&staging);
            warn!(path = %self.path.display(), error = %e, "Step archive not replaced");
            return Err(StoreError::Io(e));
        }

        info!(path = %self.path.display(), steps = steps.len(), "Steps saved");
        Ok(())
    }

    fn load(&self) -> StoreResult<Vec<Step>> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No saved steps");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        let steps = from_json_string(&json)?;
        info!(path = %self.path.display(), steps = steps.len(), "Steps loaded");
        Ok(steps)
    }

    fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}
