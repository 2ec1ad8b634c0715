//! Docket CLI - reviewer front end for the QA-event curation workflow.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::List {
            topic,
            offset,
            limit,
        } => commands::list::run(&cli.events, &topic, offset, limit),

        Commands::Show { event_id } => commands::show::run(&cli.events, &event_id),

        Commands::Reject { event_id, user } => {
            commands::reject::run(&cli.events, &cli.archive, &event_id, &user)
        }

        Commands::Patch { event_id, ops } => {
            commands::patch::run(&cli.events, &event_id, &ops)
        }

        Commands::History { event_id } => commands::history::run(&cli.archive, &event_id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
