use anyhow::{anyhow, Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::{debug, error, info};

use shared::{
    domain::Step,
    error::EditorError,
    protocol::{default_seed, StepRecord, StepSequenceDocument},
};

pub const DEFAULT_FILE_NAME: &str = "StepSequence.json";

/// Whole-blob byte storage the gateway persists into.
pub trait ByteStore {
    /// `Ok(None)` when nothing has been persisted yet.
    fn read(&self) -> Result<Option<Vec<u8>>>;
    /// Replaces the stored content.
    fn write(&self, bytes: &[u8]) -> Result<()>;
    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct FileByteStore {
    path: PathBuf,
}

impl FileByteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ByteStore for FileByteStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => {
                Err(err).with_context(|| format!("failed to read '{}'", self.path.display()))
            }
        }
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        ensure_parent_dir_exists(&self.path)?;

        let temp_path = self.temp_path();
        fs::write(&temp_path, bytes)
            .with_context(|| format!("failed to write '{}'", temp_path.display()))?;
        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "failed to move '{}' over '{}'",
                temp_path.display(),
                self.path.display()
            )
        })?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn ensure_parent_dir_exists(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for '{}'",
            parent.display(),
            path.display()
        )
    })?;

    Ok(())
}

#[derive(Debug, Default)]
struct MemoryState {
    bytes: Option<Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

/// In-memory store. Clones share the same content.
#[derive(Debug, Clone, Default)]
pub struct MemoryByteStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryByteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        if let Ok(mut state) = store.state.lock() {
            state.bytes = Some(bytes.into());
        }
        store
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.state.lock().ok().and_then(|state| state.bytes.clone())
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.state.lock().map(|state| state.writes).unwrap_or(0)
    }

    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut state) = self.state.lock() {
            state.fail_writes = fail;
        }
    }
}

impl ByteStore for MemoryByteStore {
    fn read(&self) -> Result<Option<Vec<u8>>> {
        let state = self
            .state
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        Ok(state.bytes.clone())
    }

    fn write(&self, bytes: &[u8]) -> Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))?;
        if state.fail_writes {
            return Err(anyhow!("memory store is read-only"));
        }
        state.bytes = Some(bytes.to_vec());
        state.writes += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

/// Where the records returned by [`PersistenceGateway::load`] came from.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadSource {
    Persisted,
    Missing,
    Empty,
    Corrupt(EditorError),
}

impl LoadSource {
    pub fn is_default_seed(&self) -> bool {
        !matches!(self, Self::Persisted)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub records: Vec<StepRecord>,
    pub source: LoadSource,
}

impl LoadOutcome {
    fn seeded(source: LoadSource) -> Self {
        Self {
            records: default_seed(),
            source,
        }
    }
}

pub struct PersistenceGateway<S: ByteStore> {
    store: S,
}

impl<S: ByteStore> PersistenceGateway<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Never fails: anything unusable falls back to the default seed.
    pub fn load(&self) -> LoadOutcome {
        let target = self.store.describe();
        let bytes = match self.store.read() {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                info!(store = %target, "no persisted step sequence; using default seed");
                return LoadOutcome::seeded(LoadSource::Missing);
            }
            Err(err) => {
                let reason = format!("{err:#}");
                error!(store = %target, "error loading step sequence: {reason}. Starting with default data.");
                return LoadOutcome::seeded(LoadSource::Corrupt(EditorError::LoadCorruption {
                    reason,
                }));
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            info!(store = %target, "persisted step sequence is empty; using default seed");
            return LoadOutcome::seeded(LoadSource::Empty);
        }

        match serde_json::from_slice::<StepSequenceDocument>(&bytes) {
            Ok(doc) if !doc.steps.iter().all(|record| record.value.is_finite()) => {
                // Out-of-range numbers narrow to infinity and would be saved back as null.
                let reason = "step value is outside the representable range".to_string();
                error!(store = %target, "error loading step sequence: {reason}. Starting with default data.");
                LoadOutcome::seeded(LoadSource::Corrupt(EditorError::LoadCorruption { reason }))
            }
            Ok(doc) => {
                info!(store = %target, steps = doc.steps.len(), "loaded step sequence");
                LoadOutcome {
                    records: doc.steps,
                    source: LoadSource::Persisted,
                }
            }
            Err(err) => {
                let reason = err.to_string();
                error!(store = %target, "error loading step sequence: {reason}. Starting with default data.");
                LoadOutcome::seeded(LoadSource::Corrupt(EditorError::LoadCorruption { reason }))
            }
        }
    }

    /// Writes the full sequence, replacing whatever was stored before.
    pub fn save(&self, steps: &[Step]) -> Result<(), EditorError> {
        let records = steps.iter().map(Step::to_record).collect();
        self.save_records(records)
    }

    pub fn save_records(&self, records: Vec<StepRecord>) -> Result<(), EditorError> {
        let count = records.len();
        let doc = StepSequenceDocument::new(records);
        let result = serde_json::to_vec_pretty(&doc)
            .context("failed to serialize step sequence")
            .and_then(|bytes| self.store.write(&bytes));

        match result {
            Ok(()) => {
                debug!(store = %self.store.describe(), steps = count, "saved step sequence");
                Ok(())
            }
            Err(err) => {
                let reason = format!("{err:#}");
                error!(store = %self.store.describe(), steps = count, "error saving step sequence: {reason}");
                Err(EditorError::SaveFailure { reason })
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
