//! CLI for snapscan.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use snapscan_core::config;
use std::path::PathBuf;

use commands::{run_audit, run_completions, run_known, run_man};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "snapscan")]
#[command(
    about = "Map Firefox snap artifacts on the Taskcluster queue to their archive URLs",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan release files and print `archive-url queue-url` pairs.
    Run {
        /// Directory of archived release JSON files (overrides config).
        #[arg(long, value_name = "DIR")]
        releases_dir: Option<PathBuf>,
        /// Only scan files whose name contains this string (overrides config).
        #[arg(long, value_name = "STR")]
        marker: Option<String>,
    },

    /// Print the known-build table; these builds are always skipped.
    Known,

    /// Generate shell completions on stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff) on stdout.
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These two only describe the CLI itself and need no config.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Run {
                releases_dir,
                marker,
            } => run_audit(&cfg, releases_dir.as_deref(), marker.as_deref())?,
            CliCommand::Known => run_known(&cfg)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
