//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - generate: run the full brief-to-scored-plan pipeline
//! - check: consistency-check an existing campaign against a brief
//! - score: score the creatives of an existing campaign

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Planr - campaign plan generation and verification agent
#[derive(Parser, Debug)]
#[command(name = "planr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate and verify a campaign plan from a brief
    Generate {
        /// Path to the brief JSON file
        #[arg(short, long)]
        brief: PathBuf,

        /// Knowledge base JSON file (overrides the configured path)
        #[arg(long)]
        kb: Option<PathBuf>,

        /// Use the canned mock generator instead of the live API
        #[arg(long)]
        mock: bool,

        /// Write the report JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Consistency-check an existing campaign against its brief
    Check {
        /// Path to the brief JSON file
        #[arg(long)]
        brief: PathBuf,

        /// Path to the campaign JSON file
        #[arg(long)]
        campaign: PathBuf,
    },

    /// Score the creatives of an existing campaign
    Score {
        /// Path to the campaign JSON file
        #[arg(long)]
        campaign: PathBuf,

        /// Product name to score against
        #[arg(short, long)]
        product: String,

        /// Knowledge base JSON file (overrides the configured path)
        #[arg(long)]
        kb: Option<PathBuf>,
    },
}
