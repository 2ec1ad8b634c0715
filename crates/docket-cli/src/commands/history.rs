//! History command - decision records for an event id.

use std::path::Path;

use colored::Colorize;
use docket::store::DecisionArchive;

use super::load_archive;

pub fn run(archive_path: &Path, event_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let archive = load_archive(archive_path)?;
    let records = archive.records_for(event_id)?;

    if records.is_empty() {
        println!("No decisions recorded for '{}'", event_id);
        return Ok(());
    }

    println!("{} {}", "Decisions for".bold(), event_id.yellow());
    for record in &records {
        println!(
            "  {}  {}  target {}",
            record.decided_at.to_rfc3339().dimmed(),
            record.decided_by,
            record.target
        );
    }

    Ok(())
}
