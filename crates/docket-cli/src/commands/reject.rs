//! Reject command - archive a decision record and remove the event.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use docket::workflow::CurationWorkflow;

use super::{load_archive, load_store};

pub fn run(
    events_path: &Path,
    archive_path: &Path,
    event_id: &str,
    user: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = Arc::new(load_store(events_path)?);
    let archive = Arc::new(load_archive(archive_path)?);

    let workflow = CurationWorkflow::with_shared(store.clone(), archive.clone());
    let record = workflow.reject(event_id, user)?;

    // Archive first: if the events snapshot fails to write, the archive is
    // still the source of truth and a retry re-removes an absent event.
    archive.save(archive_path)?;
    store.save(events_path)?;

    println!(
        "{} {} rejected by {} at {}",
        "✓".green(),
        event_id.yellow(),
        record.decided_by,
        record.decided_at
    );

    Ok(())
}
