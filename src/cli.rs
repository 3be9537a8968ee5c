//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Check URLs and download web content.
///
/// Each command issues its own GET request(s) with a per-request timeout.
#[derive(Parser, Debug)]
#[command(name = "webcontent")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Per-request timeout in seconds (1-3600)
    #[arg(short = 't', long, global = true, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub timeout: Option<u64>,

    /// Exit with code 1 when the operation fails
    #[arg(long, global = true)]
    pub fail: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations on a single URL.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print `valid` if the URL answers with a 2xx status, `invalid` otherwise
    Check {
        /// URL to request
        url: String,
    },
    /// Print the status code (400 on any failure)
    Status {
        /// URL to request
        url: String,
    },
    /// Write the response body to stdout or a file
    Fetch {
        /// URL to request
        url: String,

        /// Write the body to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Read the whole body into memory before writing
        #[arg(long)]
        buffered: bool,
    },
}

impl Command {
    /// The URL the command operates on.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Check { url } | Self::Status { url } | Self::Fetch { url, .. } => url,
        }
    }
}
