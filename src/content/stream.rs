//! Lazily-read response body returned by
//! [`WebContent::get_content_as_stream`](super::WebContent::get_content_as_stream).

use std::fmt;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use reqwest::StatusCode;

use super::error::FetchError;

type BoxedChunks = Pin<Box<dyn Stream<Item = Result<Bytes, FetchError>> + Send>>;

/// A response body that has not been read yet.
///
/// Chunks are pulled from the connection as the stream is polled. Dropping
/// the stream releases the connection.
pub struct ContentStream {
    status: StatusCode,
    content_length: Option<u64>,
    chunks: BoxedChunks,
}

impl ContentStream {
    pub(crate) fn from_response(url: &str, response: reqwest::Response) -> Self {
        let status = response.status();
        let content_length = response.content_length();
        let url = url.to_string();
        let chunks = response
            .bytes_stream()
            .map(move |chunk| chunk.map_err(|e| FetchError::body(url.as_str(), e)));
        Self {
            status,
            content_length,
            chunks: Box::pin(chunks),
        }
    }

    /// Status of the response the body belongs to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Body size announced by the server, if any.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }

    /// Reads the remaining body into one buffer.
    ///
    /// # Errors
    ///
    /// Returns the first [`FetchError`] produced while reading.
    pub async fn collect_bytes(mut self) -> Result<Bytes, FetchError> {
        let capacity = self
            .content_length
            .and_then(|len| usize::try_from(len).ok())
            .unwrap_or(0);
        let mut buffer = BytesMut::with_capacity(capacity);
        while let Some(chunk) = self.chunks.next().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer.freeze())
    }
}

impl Stream for ContentStream {
    type Item = Result<Bytes, FetchError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.chunks.as_mut().poll_next(cx)
    }
}

impl fmt::Debug for ContentStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentStream")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}
