//! Settings consumed by [`WebContent`](crate::WebContent).

use std::time::Duration;

use thiserror::Error;

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Largest timeout accepted by [`WebContentSettings::validate`] (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Settings for web content requests.
///
/// Both fields are plain public fields. Nothing is checked on construction;
/// call [`validate`](Self::validate) to reject values the fetcher cannot use
/// sensibly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebContentSettings {
    /// Timeout in seconds applied to each request.
    pub timeout_secs: u64,
    /// Whether an operation should fail loudly instead of returning a
    /// fallback value.
    ///
    /// The fetcher operations do not read this flag; they always collapse
    /// failures into their fallback value. Front ends may honor it.
    pub throw_on_fail: bool,
}

impl Default for WebContentSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            throw_on_fail: false,
        }
    }
}

impl WebContentSettings {
    /// Creates settings with the given timeout and the default fail flag.
    #[must_use]
    pub fn with_timeout_secs(timeout_secs: u64) -> Self {
        Self {
            timeout_secs,
            ..Self::default()
        }
    }

    /// Returns the per-request timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Checks the settings against supported ranges.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::TimeoutOutOfRange`] when `timeout_secs` is
    /// zero or larger than [`MAX_TIMEOUT_SECS`].
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(1..=MAX_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(SettingsError::TimeoutOutOfRange {
                value: self.timeout_secs,
            });
        }
        Ok(())
    }
}

/// Errors reported by [`WebContentSettings::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    /// Timeout is zero or above the supported maximum.
    #[error("timeout_secs {value} is out of range (expected 1..=3600)")]
    TimeoutOutOfRange {
        /// The rejected value.
        value: u64,
    },
}
