//! Web Content Library
//!
//! Checks whether URLs are reachable and downloads their content over HTTP.
//!
//! # Architecture
//!
//! - [`settings`] - Timeout and fail-flag settings
//! - [`content`] - The [`WebContent`] fetcher and its stream and error types

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod content;
pub mod settings;
pub(crate) mod user_agent;

// Re-export commonly used types
pub use content::{ContentStream, FAILURE_STATUS, FetchError, WebContent};
pub use settings::{DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS, SettingsError, WebContentSettings};
