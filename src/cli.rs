//! Command-line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "email-vet", version, about = "Validate email addresses and score their deliverability.")]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "EMAIL_VET_CONFIG")]
    pub config: Option<PathBuf>,

    /// DNS-over-HTTPS JSON endpoint, overriding the configuration.
    #[arg(long, global = true, env = "EMAIL_VET_RESOLVER")]
    pub resolver_url: Option<String>,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fully validate one or more addresses.
    Check {
        #[arg(required = true)]
        emails: Vec<String>,
    },
    /// Validate a list of addresses read from a file, one per line.
    Bulk {
        /// Input file, or `-` for stdin.
        #[arg(short, long)]
        input: PathBuf,
        /// Write the JSON array here instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run only the offline syntax check.
    Syntax {
        #[arg(required = true)]
        emails: Vec<String>,
    },
}

/// Non-empty lines that are not `#` comments.
pub fn parse_email_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
