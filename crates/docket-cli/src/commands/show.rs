//! Show command - one event with its full payload.

use std::path::Path;

use colored::Colorize;
use docket::store::MemoryDecisionArchive;
use docket::workflow::{CurationWorkflow, RequestContext};

use super::load_store;

pub fn run(events_path: &Path, event_id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(events_path)?;
    let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());

    let ctx = RequestContext::new();
    let event = workflow
        .get_event(&ctx, event_id)?
        .ok_or_else(|| format!("No active event with id '{}'", event_id))?;

    println!("{} {}", "Event".bold(), event.event_id.yellow());
    println!("  {:<10} {}", "source:", event.source);
    println!("  {:<10} {}", "topic:", event.topic);
    println!("  {:<10} {}", "target:", event.target);
    if let Some(related) = event.related {
        println!("  {:<10} {}", "related:", related);
    }
    println!("  {:<10} {}", "title:", event.title);
    println!("  {:<10} {}", "trust:", format!("{:.2}", event.trust).green());
    println!("  {:<10} {}", "detected:", event.detected_at);
    println!("{}", "Payload".bold());
    println!("{}", serde_json::to_string_pretty(&event.payload)?);

    Ok(())
}
