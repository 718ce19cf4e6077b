//! CLI for the headcheck security-header analyzer.

mod commands;

use anyhow::Result;
use clap::{ArgGroup, Args, Parser, Subcommand};
use clap_complete::Shell;
use headcheck_core::config::{ColorMode, HttpMethod};
use std::path::PathBuf;

use commands::{run_completions, run_config_path, run_manpage, run_scan};

/// Top-level CLI for headcheck.
#[derive(Debug, Parser)]
#[command(name = "headcheck", version)]
#[command(about = "headcheck: check HTTP responses for security headers", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Request one or more targets and classify their response headers.
    Scan(ScanArgs),

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print a roff man page to stdout.
    Manpage,

    /// Print the config file path.
    ConfigPath,
}

#[derive(Debug, Clone, Default, Args)]
#[command(group(ArgGroup::new("targets").required(true).args(["url", "file"])))]
pub struct ScanArgs {
    /// Target URL or bare domain (https:// is assumed without a scheme).
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// File with one target per line (# starts a comment).
    #[arg(short = 'f', long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Cookie string sent with every request (e.g. "session=abc").
    #[arg(short = 'C', long)]
    pub cookie: Option<String>,

    /// Also check caching headers.
    #[arg(short = 'c', long)]
    pub cache: bool,

    /// Also check deprecated headers.
    #[arg(short = 'd', long)]
    pub deprecated: bool,

    /// Also check informational headers.
    #[arg(short = 'i', long)]
    pub information: bool,

    /// Use GET instead of the configured method. Same as `-X GET`.
    #[arg(short = 'g', long, conflicts_with = "method")]
    pub get: bool,

    /// Request method: GET, HEAD or OPTIONS.
    #[arg(short = 'X', long)]
    pub method: Option<HttpMethod>,

    /// Print the value of this response header (repeatable).
    #[arg(short = 'r', long = "read", value_name = "NAME")]
    pub read: Vec<String>,

    /// List response headers that are not on any checklist.
    #[arg(short = 'a', long)]
    pub all_headers: bool,

    /// Extra request header "Name: value" (repeatable).
    #[arg(short = 'H', long = "header", value_name = "HEADER", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Proxy URL (e.g. http://10.10.1.10:3128).
    #[arg(long)]
    pub proxy: Option<String>,

    /// Emit one JSON document instead of console lines.
    #[arg(short = 'j', long)]
    pub json: bool,

    /// Maximum concurrent requests when scanning a file of targets.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Total request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Follow redirects and report the final response's headers.
    #[arg(long)]
    pub follow_redirects: bool,

    /// Do not print the banner.
    #[arg(long)]
    pub no_banner: bool,

    /// Console palette: dark, light or none.
    #[arg(long)]
    pub color: Option<ColorMode>,
}

fn parse_header(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("header name is empty in '{s}'"));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Scan(args) => run_scan(&args).await?,
            CliCommand::Completions { shell } => run_completions(shell)?,
            CliCommand::Manpage => run_manpage()?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
