//! Patch command - apply correction operations to an event's payload.

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use docket::store::MemoryDecisionArchive;
use docket::workflow::{CurationWorkflow, RequestContext};
use docket::PatchOperation;

use super::load_store;

pub fn run(
    events_path: &Path,
    event_id: &str,
    ops_json: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let operations: Vec<PatchOperation> = serde_json::from_str(ops_json)
        .map_err(|e| format!("--ops is not a JSON array of patch operations: {}", e))?;

    let store = Arc::new(load_store(events_path)?);
    let workflow =
        CurationWorkflow::with_shared(store.clone(), Arc::new(MemoryDecisionArchive::new()));

    let mut ctx = RequestContext::new();
    let updated = workflow.correct(&mut ctx, event_id, &operations)?;

    store.save(events_path)?;

    println!(
        "{} {} corrected ({} operation{})",
        "✓".green(),
        event_id.yellow(),
        operations.len(),
        if operations.len() == 1 { "" } else { "s" }
    );
    println!("{}", serde_json::to_string_pretty(&updated.payload)?);

    Ok(())
}
