//! CLI entry point for the webcontent tool.

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::StreamExt;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};
use webcontent_core::{ContentStream, FetchError, WebContent, WebContentSettings};

mod app_config;
mod cli;

use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    let settings = resolve_settings(&args)?;
    let fail_fast = settings.throw_on_fail;
    let content = WebContent::new(settings);

    let succeeded = run_command(&content, &args.command).await?;
    if succeeded || !fail_fast {
        Ok(ExitCode::SUCCESS)
    } else {
        warn!(url = %args.command.url(), "operation failed");
        Ok(ExitCode::FAILURE)
    }
}

/// Builds settings from defaults, the config file, then CLI flags.
fn resolve_settings(args: &Args) -> Result<WebContentSettings> {
    let mut settings = WebContentSettings::default();
    if let Some(file_config) = app_config::load_default_file_config()? {
        debug!(?file_config, "loaded config file");
        file_config.apply_to(&mut settings);
    }
    if let Some(timeout_secs) = args.timeout {
        settings.timeout_secs = timeout_secs;
    }
    if args.fail {
        settings.throw_on_fail = true;
    }
    Ok(settings)
}

/// Runs one command and reports whether the fetcher operation succeeded.
async fn run_command(content: &WebContent, command: &Command) -> Result<bool> {
    match command {
        Command::Check { url } => {
            let valid = content.is_valid_url(url).await;
            println!("{}", if valid { "valid" } else { "invalid" });
            Ok(valid)
        }
        Command::Status { url } => {
            let status = content.get_status_code(url).await;
            println!("{}", status.as_u16());
            Ok(status.is_success())
        }
        Command::Fetch {
            url,
            output,
            buffered,
        } => {
            let written = if *buffered {
                let Some(body) = content.get_content_as_bytes(url).await else {
                    return Ok(false);
                };
                match output {
                    Some(path) => write_bytes_to_file(&body, path).await?,
                    None => write_bytes(&body, tokio::io::stdout(), "stdout").await?,
                }
            } else {
                let Some(stream) = content.get_content_as_stream(url).await else {
                    return Ok(false);
                };
                let streamed = match output {
                    Some(path) => stream_to_file(stream, path).await?,
                    None => stream_to_writer(stream, tokio::io::stdout(), "stdout").await?,
                };
                match streamed {
                    Ok(written) => written,
                    Err(error) => {
                        debug!(error = %error, "response body failed mid-transfer");
                        return Ok(false);
                    }
                }
            };
            info!(url = %url, bytes = written, "content written");
            Ok(true)
        }
    }
}

async fn write_bytes_to_file(body: &[u8], path: &Path) -> Result<u64> {
    let file = File::create(path)
        .await
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    write_bytes(body, file, &path.display().to_string()).await
}

async fn write_bytes<W: AsyncWrite + Unpin>(body: &[u8], writer: W, target: &str) -> Result<u64> {
    let mut writer = BufWriter::new(writer);
    writer
        .write_all(body)
        .await
        .with_context(|| format!("Failed to write to {target}"))?;
    writer
        .flush()
        .await
        .with_context(|| format!("Failed to flush {target}"))?;
    Ok(body.len() as u64)
}

/// Streams the body to a file, removing the partial file if the body or a
/// write fails.
async fn stream_to_file(
    stream: ContentStream,
    path: &Path,
) -> Result<Result<u64, FetchError>> {
    let file = File::create(path)
        .await
        .with_context(|| format!("Failed to create '{}'", path.display()))?;
    let result = stream_to_writer(stream, file, &path.display().to_string()).await;
    if !matches!(result, Ok(Ok(_))) {
        debug!(path = %path.display(), "cleaning up partial file after error");
        let _ = tokio::fs::remove_file(path).await;
    }
    result
}

/// Copies the body into `writer`.
///
/// The outer error is a local write failure; the inner one is the body
/// breaking off, which counts as a failed fetch rather than a tool error.
async fn stream_to_writer<W: AsyncWrite + Unpin>(
    mut stream: ContentStream,
    writer: W,
    target: &str,
) -> Result<Result<u64, FetchError>> {
    let mut writer = BufWriter::new(writer);
    let mut bytes_written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(error) => return Ok(Err(error)),
        };
        writer
            .write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write to {target}"))?;
        bytes_written += chunk.len() as u64;
    }

    writer
        .flush()
        .await
        .with_context(|| format!("Failed to flush {target}"))?;
    Ok(Ok(bytes_written))
}
