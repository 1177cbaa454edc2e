//! Tests for the run subcommand.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;

#[test]
fn cli_parse_run_defaults() {
    match parse(&["snapscan", "run"]) {
        CliCommand::Run {
            releases_dir,
            marker,
        } => {
            assert!(releases_dir.is_none());
            assert!(marker.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_overrides() {
    match parse(&[
        "snapscan",
        "run",
        "--releases-dir",
        "/srv/releasewarrior/firefox",
        "--marker",
        "-60",
    ]) {
        CliCommand::Run {
            releases_dir,
            marker,
        } => {
            assert_eq!(
                releases_dir.as_deref(),
                Some(std::path::Path::new("/srv/releasewarrior/firefox"))
            );
            assert_eq!(marker.as_deref(), Some("-60"));
        }
        _ => panic!("expected Run with overrides"),
    }
}

#[test]
fn cli_parse_run_rejects_positional() {
    assert!(Cli::try_parse_from(["snapscan", "run", "extra"]).is_err());
}
