//! Command implementations.

pub mod history;
pub mod list;
pub mod patch;
pub mod reject;
pub mod show;

use std::path::Path;

use docket::store::{MemoryDecisionArchive, MemoryEventStore};

/// Load the events snapshot, failing with a hint when it is missing.
pub fn load_store(path: &Path) -> Result<MemoryEventStore, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!(
            "Events snapshot not found: {}\nPoint --events at a snapshot produced by the detection importer.",
            path.display()
        )
        .into());
    }
    Ok(MemoryEventStore::load(path)?)
}

/// Load the decision archive snapshot, starting empty when it does not exist yet.
pub fn load_archive(path: &Path) -> Result<MemoryDecisionArchive, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Ok(MemoryDecisionArchive::new());
    }
    Ok(MemoryDecisionArchive::load(path)?)
}
