//! CLI argument parsing for the eld-planner binary.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "eld-planner", about = "HOS-compliant ELD trip schedule simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Simulate a trip and print its ELD schedule as JSON
    Simulate {
        /// Path to a TripInput JSON file, or "-" to read from stdin
        #[arg(long)]
        trip: String,

        /// Calendar date the trip starts on (YYYY-MM-DD); defaults to today
        #[arg(long)]
        base_date: Option<String>,

        /// Override the configured routing service base URL
        #[arg(long)]
        routing_url: Option<String>,
    },
}
