//! Web content checks and downloads.
//!
//! [`WebContent`] answers four questions about a URL, each with its own GET
//! request(s):
//!
//! - is it reachable with a 2xx status ([`WebContent::is_valid_url`])
//! - what status does it return ([`WebContent::get_status_code`])
//! - its body as a lazily-read stream ([`WebContent::get_content_as_stream`])
//! - its body as one buffer ([`WebContent::get_content_as_bytes`])
//!
//! Failures never surface as errors from these operations. Use
//! [`WebContent::probe`] when the cause matters.
//!
//! # Example
//!
//! ```no_run
//! use webcontent_core::{WebContent, WebContentSettings};
//!
//! # async fn example() {
//! let mut content = WebContent::new(WebContentSettings::default());
//! content.settings_mut().timeout_secs = 10;
//! println!("{}", content.get_status_code("https://example.com/").await);
//! # }
//! ```

mod client;
mod error;
mod fetcher;
mod stream;

pub use error::FetchError;
pub use fetcher::{FAILURE_STATUS, WebContent};
pub use stream::ContentStream;
