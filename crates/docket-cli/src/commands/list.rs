//! List command - one page of a topic's events plus the total count.

use std::path::Path;

use colored::Colorize;
use docket::store::MemoryDecisionArchive;
use docket::workflow::CurationWorkflow;

use super::load_store;

pub fn run(
    events_path: &Path,
    topic: &str,
    offset: usize,
    limit: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(events_path)?;
    let workflow = CurationWorkflow::new(store, MemoryDecisionArchive::new());

    let page = workflow.search_by_topic(topic, offset, limit)?;

    println!(
        "{} {} ({} of {} events)",
        "Topic".bold(),
        topic.cyan(),
        page.events.len(),
        page.total
    );

    if page.events.is_empty() {
        println!("  {}", "no events in this window".dimmed());
        return Ok(());
    }

    for event in &page.events {
        println!(
            "  {}  trust {}  {}",
            event.event_id.yellow(),
            format!("{:.2}", event.trust).green(),
            event.title
        );
    }

    Ok(())
}
