//! CLI parse tests.

use super::{Cli, CliCommand, ScanArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn parse_scan(args: &[&str]) -> ScanArgs {
    match parse(args) {
        CliCommand::Scan(scan) => scan,
        other => panic!("expected Scan, got {:?}", other),
    }
}
