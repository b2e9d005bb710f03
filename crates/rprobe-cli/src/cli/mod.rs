//! CLI for rprobe.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rprobe_core::config;
use rprobe_core::{ProbeError, Prober, RangeSpec};
use std::path::PathBuf;

use commands::{run_capability, run_negotiate, run_probe, run_range, Output};

/// Top-level CLI for rprobe.
#[derive(Debug, Parser)]
#[command(name = "rprobe")]
#[command(about = "Probe HTTP resources for size and byte-range support", long_about = None)]
pub struct Cli {
    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,

    /// Read configuration from this file instead of ~/.config/rprobe/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Total size and advertised range support (HEAD).
    Capability {
        /// HTTP/HTTPS URL.
        url: String,
    },

    /// Exact byte count the server will deliver for a range (HEAD with Range).
    Range {
        /// HTTP/HTTPS URL.
        url: String,
        /// START-END (inclusive) or START- (to the end).
        range: RangeSpec,
    },

    /// Compare advertised range support with what the server actually does.
    Negotiate {
        /// HTTP/HTTPS URL.
        url: String,
    },

    /// Send a single probe and print its classification.
    Probe {
        /// HTTP/HTTPS URL.
        url: String,
        /// HEAD or GET.
        #[arg(long, default_value = "HEAD")]
        method: String,
        /// Optional range: START-END or START-.
        #[arg(long)]
        range: Option<RangeSpec>,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let prober = Prober::from_config(&cfg);
        let out = Output { json: cli.json };

        match cli.command {
            CliCommand::Capability { url } => run_capability(&prober, &url, out)?,
            CliCommand::Range { url, range } => run_range(&prober, &url, range, out)?,
            CliCommand::Negotiate { url } => run_negotiate(&prober, &url, out)?,
            CliCommand::Probe { url, method, range } => {
                run_probe(&prober, &url, &method, range, out)?
            }
        }

        Ok(())
    }
}

/// Process exit status for an error, so scripts can pick a fallback:
/// 3 = server ignores ranges, 4 = range outside the resource,
/// 5 = network failure, 1 = anything else.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<ProbeError>() {
        Some(ProbeError::RangeNotSupported) => 3,
        Some(ProbeError::InvalidRange) => 4,
        Some(ProbeError::Transport(_)) => 5,
        _ => 1,
    }
}

#[cfg(test)]
mod tests;
