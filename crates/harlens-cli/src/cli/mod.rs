//! CLI for harlens.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use harlens_core::config::{self, HarlensConfig};
use harlens_core::{ArchiveParser, FetchOptions};
use std::time::Duration;

use commands::{run_completions, run_ids, run_serve, run_show, run_urls};

/// Top-level CLI for harlens.
#[derive(Debug, Parser)]
#[command(name = "harlens")]
#[command(about = "harlens: inspect HTTP Archive (HAR) captures", long_about = None)]
pub struct Cli {
    /// Overall deadline in seconds for fetching URL sources (overrides config).
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List every URL/method pair with its request IDs.
    Urls {
        /// HAR file path or http(s) URL.
        source: String,
    },

    /// Print the request IDs for one URL and method.
    Ids {
        /// HAR file path or http(s) URL.
        source: String,
        /// Exact request URL.
        url: String,
        /// HTTP method, matched exactly (e.g. GET).
        method: String,
    },

    /// Show one request with sensitive headers redacted.
    Show {
        /// HAR file path or http(s) URL.
        source: String,
        /// Request ID such as request_0.
        request_id: String,
    },

    /// Run the JSON-RPC tool server on stdin/stdout.
    Serve,

    /// Print shell completions to stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Fetch limits from config, with the `--timeout` override applied.
pub fn fetch_options(cfg: &HarlensConfig, timeout: Option<u64>) -> FetchOptions {
    let mut opts = FetchOptions::from(&cfg.fetch);
    if let Some(secs) = timeout {
        opts.timeout = Duration::from_secs(secs);
    }
    opts
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = cli.command {
            return run_completions(shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let parser = ArchiveParser::new(fetch_options(&cfg, cli.timeout));

        match cli.command {
            CliCommand::Urls { source } => run_urls(parser, source).await?,
            CliCommand::Ids {
                source,
                url,
                method,
            } => run_ids(parser, source, url, method).await?,
            CliCommand::Show { source, request_id } => run_show(parser, source, request_id).await?,
            CliCommand::Serve => run_serve(parser).await?,
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
