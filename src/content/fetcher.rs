//! The [`WebContent`] fetcher.

use bytes::Bytes;
use reqwest::{Response, StatusCode};
use tracing::{debug, instrument, trace};
use url::Url;

use super::client::build_client;
use super::error::FetchError;
use super::stream::ContentStream;
use crate::settings::WebContentSettings;

/// Status returned by [`WebContent::get_status_code`] on every failure path.
pub const FAILURE_STATUS: StatusCode = StatusCode::BAD_REQUEST;

/// Checks and downloads web resources with a per-request timeout.
///
/// Each operation issues its own GET request(s) with a freshly built client;
/// nothing is cached between calls. Failures of any kind (empty or malformed
/// URL, DNS, connection, timeout, non-2xx status) collapse into the
/// operation's fallback value.
///
/// [`get_status_code`](Self::get_status_code),
/// [`get_content_as_stream`](Self::get_content_as_stream) and
/// [`get_content_as_bytes`](Self::get_content_as_bytes) first validate the
/// URL with [`is_valid_url`](Self::is_valid_url) and then request it a second
/// time for the payload, so a reachable URL sees two GET requests per call.
///
/// # Example
///
/// ```no_run
/// use webcontent_core::{WebContent, WebContentSettings};
///
/// # async fn example() {
/// let content = WebContent::new(WebContentSettings::default());
/// if let Some(body) = content.get_content_as_bytes("https://example.com/").await {
///     println!("{} bytes", body.len());
/// }
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct WebContent {
    settings: WebContentSettings,
}

impl WebContent {
    /// Creates a fetcher that owns `settings`.
    #[must_use]
    pub fn new(settings: WebContentSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    #[must_use]
    pub fn settings(&self) -> &WebContentSettings {
        &self.settings
    }

    /// Mutable access to the settings. Changes apply to the next call.
    pub fn settings_mut(&mut self) -> &mut WebContentSettings {
        &mut self.settings
    }

    /// Consumes the fetcher and returns its settings.
    #[must_use]
    pub fn into_settings(self) -> WebContentSettings {
        self.settings
    }

    /// Returns true if `url` answers a GET with a 2xx status.
    ///
    /// Empty or whitespace-only input returns false without a request.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn is_valid_url(&self, url: &str) -> bool {
        if url.trim().is_empty() {
            debug!("empty URL, no request made");
            return false;
        }

        match self.send_get(url).await {
            Ok(_) => true,
            Err(error) => {
                debug!(error = %error, "URL is not valid");
                false
            }
        }
    }

    /// Returns the status code of a successful GET, or [`FAILURE_STATUS`].
    ///
    /// A 404 is reported as 400, like every other failure.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_status_code(&self, url: &str) -> StatusCode {
        if !self.is_valid_url(url).await {
            return FAILURE_STATUS;
        }

        match self.send_get(url).await {
            Ok(response) => response.status(),
            Err(error) => {
                debug!(error = %error, "status request failed after validation");
                FAILURE_STATUS
            }
        }
    }

    /// Returns the body of a successful GET as an unread stream.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_content_as_stream(&self, url: &str) -> Option<ContentStream> {
        if !self.is_valid_url(url).await {
            return None;
        }

        match self.send_get(url).await {
            Ok(response) => Some(ContentStream::from_response(url, response)),
            Err(error) => {
                debug!(error = %error, "content request failed after validation");
                None
            }
        }
    }

    /// Returns the full body of a successful GET.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_content_as_bytes(&self, url: &str) -> Option<Bytes> {
        if !self.is_valid_url(url).await {
            return None;
        }

        let response = match self.send_get(url).await {
            Ok(response) => response,
            Err(error) => {
                debug!(error = %error, "content request failed after validation");
                return None;
            }
        };

        match response.bytes().await {
            Ok(body) => {
                debug!(bytes = body.len(), "content downloaded");
                Some(body)
            }
            Err(source) => {
                debug!(error = %FetchError::body(url, source), "content body read failed");
                None
            }
        }
    }

    /// Issues one GET and reports why it failed, if it did.
    ///
    /// Unlike the other operations this makes exactly one request and does
    /// not collapse the failure cause.
    ///
    /// # Errors
    ///
    /// Returns a [`FetchError`] describing the first failure: unusable input,
    /// timeout, transport error, or non-2xx status.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn probe(&self, url: &str) -> Result<StatusCode, FetchError> {
        self.send_get(url).await.map(|response| response.status())
    }

    /// Performs one GET with a client scoped to this call and keeps only 2xx
    /// responses.
    async fn send_get(&self, url: &str) -> Result<Response, FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::EmptyUrl);
        }
        let parsed = Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let client = build_client(self.settings.timeout())?;
        trace!(timeout_secs = self.settings.timeout_secs, "sending GET");
        let response = client
            .get(parsed)
            .send()
            .await
            .map_err(|e| FetchError::from_send(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::http_status(url, status.as_u16()));
        }
        Ok(response)
    }
}
