//! JSON snapshot persistence for a reconciliation session.
//!
//! A session directory holds two blobs: the full record set and the
//! retained change events. Writes go through a temp file and rename so
//! a crash never leaves a half-written snapshot behind.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, warn};

use recon_model::{ChangeEvent, MappingRecord};

use crate::store::MappingStore;

pub const RECORDS_FILE: &str = "records.json";
pub const CHANGES_FILE: &str = "changes.json";

/// Reads and writes session snapshots under one directory.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    base_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn records_path(&self) -> PathBuf {
        self.base_dir.join(RECORDS_FILE)
    }

    pub fn changes_path(&self) -> PathBuf {
        self.base_dir.join(CHANGES_FILE)
    }

    /// Writes both blobs, creating the session directory if needed.
    pub fn save(&self, records: &[MappingRecord], changes: &[ChangeEvent]) -> anyhow::Result<()> {
        fs::create_dir_all(&self.base_dir).with_context(|| {
            format!("failed to create session directory {}", self.base_dir.display())
        })?;
        write_json(&self.records_path(), records)?;
        write_json(&self.changes_path(), changes)?;
        debug!(
            records = records.len(),
            changes = changes.len(),
            dir = %self.base_dir.display(),
            "snapshot written"
        );
        Ok(())
    }

    /// Loads a snapshot, or `None` when the session has never been saved.
    pub fn load(&self) -> anyhow::Result<Option<(Vec<MappingRecord>, Vec<ChangeEvent>)>> {
        let records_path = self.records_path();
        if !records_path.exists() {
            return Ok(None);
        }
        let records: Vec<MappingRecord> = read_json(&records_path)?;
        let changes_path = self.changes_path();
        let changes: Vec<ChangeEvent> = if changes_path.exists() {
            read_json(&changes_path)?
        } else {
            Vec::new()
        };
        Ok(Some((records, changes)))
    }
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("failed to serialize {}", path.display()))?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("failed to move snapshot into place at {}", path.display()))?;
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let json =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
}

/// Persists the store's state, absorbing failures.
///
/// On success the tracker is cleaned; on failure the store stays dirty
/// and authoritative and the next flush retries. Returns whether the
/// snapshot landed on disk.
pub fn flush(store: &mut MappingStore, snapshot: &SnapshotStore) -> bool {
    store.tracker_mut().start_save();
    let result = snapshot.save(store.records(), &store.changes().to_vec());
    match result {
        Ok(()) => {
            store.tracker_mut().save_complete();
            true
        }
        Err(error) => {
            warn!(error = %format!("{error:#}"), "snapshot write failed, keeping in-memory state");
            store.tracker_mut().save_failed();
            false
        }
    }
}
