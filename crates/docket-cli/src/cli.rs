//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docket: review machine-detected quality-assurance events
#[derive(Parser)]
#[command(name = "docket")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the active events snapshot
    #[arg(long, global = true, default_value = "events.json")]
    pub events: PathBuf,

    /// Path to the decision archive snapshot
    #[arg(long, global = true, default_value = "decisions.json")]
    pub archive: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of a topic's events with the total count
    List {
        /// Raw topic key (source:topic[:target-uuid], `/` written as `!`)
        #[arg(value_name = "TOPIC_KEY")]
        topic: String,

        /// First event of the window
        #[arg(short, long, default_value = "0")]
        offset: usize,

        /// Window size
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show a single event with its full payload
    Show {
        /// Event id
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
    },

    /// Reject an event, archiving a decision record
    Reject {
        /// Event id
        #[arg(value_name = "EVENT_ID")]
        event_id: String,

        /// Who is deciding (recorded in the archive)
        #[arg(short, long)]
        user: String,
    },

    /// Apply correction operations to an event's payload
    Patch {
        /// Event id
        #[arg(value_name = "EVENT_ID")]
        event_id: String,

        /// Patch operations as a JSON array
        /// (e.g. '[{"op":"replace","path":"/title","value":"New"}]')
        #[arg(long)]
        ops: String,
    },

    /// Show the decision history for an event id
    History {
        /// Event id
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
    },
}
