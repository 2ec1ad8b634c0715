//! JSON snapshot persistence for the in-memory backends.
//!
//! Snapshots are plain JSON arrays, saved alongside whatever composition
//! root owns the stores. Detection order is the array order, so a reloaded
//! store paginates exactly like the one that was saved.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{DocketError, Result};
use crate::event::QAEvent;
use crate::store::{DecisionArchive, DecisionRecord, EventStore};

use super::memory::{MemoryDecisionArchive, MemoryEventStore};

impl MemoryEventStore {
    /// Save every active event to a JSON snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_snapshot(path.as_ref(), &self.all_events()?)
    }

    /// Load a store from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let events: Vec<QAEvent> = read_snapshot(path.as_ref())?;
        let store = Self::new();
        for event in events {
            store.insert(event)?;
        }
        Ok(store)
    }
}

impl MemoryDecisionArchive {
    /// Save every decision record to a JSON snapshot file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_snapshot(path.as_ref(), &self.all_records()?)
    }

    /// Load an archive from a JSON snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let records: Vec<DecisionRecord> = read_snapshot(path.as_ref())?;
        let archive = Self::new();
        for record in records {
            archive.record(record)?;
        }
        Ok(archive)
    }
}

fn write_snapshot<T: serde::Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                DocketError::Persistence(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(path).map_err(|e| {
        DocketError::Persistence(format!("Failed to create file '{}': {}", path.display(), e))
    })?;

    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, items)
        .map_err(|e| DocketError::Persistence(format!("Failed to serialize snapshot: {}", e)))?;

    Ok(())
}

fn read_snapshot<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| {
        DocketError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        DocketError::Persistence(format!("Failed to parse snapshot '{}': {}", path.display(), e))
    })
}
