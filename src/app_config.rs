//! Application configuration loading for CLI defaults.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use webcontent_core::WebContentSettings;

/// File configuration for fetcher defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    /// Default per-request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// Default for `--fail`.
    pub throw_on_fail: Option<bool>,
}

impl FileConfig {
    /// Validates config values against the ranges the CLI accepts.
    pub fn validate(&self) -> Result<()> {
        if let Some(timeout_secs) = self.timeout_secs {
            WebContentSettings::with_timeout_secs(timeout_secs)
                .validate()
                .context("Invalid config value for `timeout_secs`")?;
        }
        Ok(())
    }

    /// Overwrites the settings fields this file sets.
    pub fn apply_to(&self, settings: &mut WebContentSettings) {
        if let Some(timeout_secs) = self.timeout_secs {
            settings.timeout_secs = timeout_secs;
        }
        if let Some(throw_on_fail) = self.throw_on_fail {
            settings.throw_on_fail = throw_on_fail;
        }
    }
}

/// Resolves the default config path from the process environment.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/webcontent/config.toml`
/// 2. `$HOME/.config/webcontent/config.toml`
#[must_use]
pub fn resolve_default_config_path() -> Option<PathBuf> {
    resolve_config_path(env::var_os("XDG_CONFIG_HOME"), env::var_os("HOME"))
}

fn resolve_config_path(xdg_config_home: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(xdg_config_home) = xdg_config_home.filter(|value| !value.is_empty()) {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("webcontent")
                .join("config.toml"),
        );
    }

    let home = home.filter(|value| !value.is_empty())?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("webcontent")
            .join("config.toml"),
    )
}

/// Loads config from the default path. A missing file yields `None`.
pub fn load_default_file_config() -> Result<Option<FileConfig>> {
    let Some(path) = resolve_default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_file_config(&path).map(Some)
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
    parse_config_str(&raw)
        .with_context(|| format!("Failed to parse config file '{}'", path.display()))
}

fn parse_config_str(raw: &str) -> Result<FileConfig> {
    let mut cfg = FileConfig::default();
    for (line_index, raw_line) in raw.lines().enumerate() {
        let line_number = line_index + 1;
        let line = strip_inline_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some((raw_key, raw_value)) = line.split_once('=') else {
            bail!("Invalid config syntax on line {line_number}: expected key = value");
        };

        match raw_key.trim() {
            "timeout_secs" => {
                let parsed = parse_integer_u64(raw_value).with_context(|| {
                    format!("Invalid `timeout_secs` value on line {line_number}")
                })?;
                cfg.timeout_secs = Some(parsed);
            }
            "throw_on_fail" => {
                let parsed = parse_boolean(raw_value).with_context(|| {
                    format!("Invalid `throw_on_fail` value on line {line_number}")
                })?;
                cfg.throw_on_fail = Some(parsed);
            }
            unknown => {
                bail!("Unknown configuration key: '{unknown}' on line {line_number}");
            }
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

fn strip_inline_comment(line: &str) -> &str {
    line.split_once('#').map_or(line, |(before, _)| before)
}

fn parse_integer_u64(raw_value: &str) -> Result<u64> {
    let token = raw_value.trim();
    if token.is_empty() {
        bail!("Expected integer value");
    }
    if token.starts_with('-') {
        bail!("Expected non-negative integer");
    }
    Ok(token.parse::<u64>()?)
}

fn parse_boolean(raw_value: &str) -> Result<bool> {
    match raw_value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => bail!("Expected 'true' or 'false'"),
    }
}
