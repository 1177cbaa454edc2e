use snapscan_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible.
    if let Err(file_err) = logging::init_logging() {
        match logging::init_logging_stderr() {
            Ok(()) => tracing::warn!("log file unavailable, logging to stderr: {file_err:#}"),
            Err(err) => eprintln!("snapscan: logging disabled: {err:#}"),
        }
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("snapscan error: {:#}", err);
        std::process::exit(1);
    }
}
