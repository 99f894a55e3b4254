//! CLI argument parsing for goalplanner

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gp")]
#[command(author, version, about = "Break a goal into a dependent task plan", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate and persist a plan for a goal
    Generate {
        /// The goal to break down (1-1000 characters)
        #[arg(required = true)]
        goal: String,

        /// Optional timeframe, e.g. "2 weeks", "3 months", "10 days"
        #[arg(short, long, default_value = "")]
        timeframe: String,
    },

    /// List stored plans, newest first
    List,

    /// Display a stored plan
    Show {
        /// Plan ID to display
        #[arg(required = true)]
        id: String,
    },

    /// Delete a stored plan
    Delete {
        /// Plan ID to delete
        #[arg(required = true)]
        id: String,
    },
}
