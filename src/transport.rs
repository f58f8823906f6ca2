//! Wire transport.
//!
//! One signed request in, one accumulated response out. The trait seam is
//! what tests script against; production traffic goes through
//! [`HttpTransport`].

use crate::error::{EsError, Result};
use crate::request::EsRequest;
use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;

/// A complete response as it came off the wire, body fully accumulated
/// before any decoding is attempted.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Accumulated body bytes.
    pub body: Bytes,
}

/// Sends a signed request and accumulates the response.
///
/// Implementations surface network-level failures as
/// [`EsError::Transport`]; anything with a status line counts as a
/// successful round trip, whatever the status code.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and collect the complete response.
    async fn send(&self, request: &EsRequest) -> Result<RawResponse>;
}

/// HTTPS transport over a shared `reqwest` connection pool.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with default connection settings.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &EsRequest) -> Result<RawResponse> {
        let mut builder = self
            .inner
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| EsError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| EsError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
