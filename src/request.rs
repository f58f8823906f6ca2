//! Request description and builder.
//!
//! A logical operation (path, body, method) is turned into an [`EsRequest`]:
//! the canonical description of one outbound call, ready for signing. The
//! routing fields (`service`, `region`, `host`) are always stamped from the
//! configuration, never from per-call input, so a caller cannot redirect a
//! request to an unintended host or region.

use crate::config::EsConfig;
use crate::error::{EsError, Result};
use http::{HeaderMap, HeaderValue, Method, header};
use serde_json::Value;

/// A request body, shaped for the engine's wire formats.
#[derive(Debug, Clone)]
pub enum RequestBody {
    /// One JSON document.
    Single(Value),
    /// A bulk payload: newline-delimited JSON, one document per line.
    Bulk(Vec<Value>),
}

impl RequestBody {
    /// Serialize to the exact bytes that go on the wire.
    ///
    /// Bulk payloads must serialize as one terminated JSON line per
    /// element, in original order; the engine's bulk endpoint rejects
    /// anything else.
    pub fn serialize(&self) -> Result<String> {
        match self {
            RequestBody::Single(value) => Ok(serde_json::to_string(value)?),
            RequestBody::Bulk(values) => {
                let mut out = String::new();
                for value in values {
                    out.push_str(&serde_json::to_string(value)?);
                    out.push('\n');
                }
                Ok(out)
            }
        }
    }
}

/// Per-call mode options for the low-level request path.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Explicit HTTP method, overriding the body-implied default.
    pub method: Option<Method>,
}

impl RequestOptions {
    /// Options forcing a specific method.
    pub fn method(method: Method) -> Self {
        Self {
            method: Some(method),
        }
    }
}

/// Canonical description of one outbound request.
///
/// Transient: owned by a single in-flight call and discarded once the call
/// completes.
#[derive(Debug, Clone)]
pub struct EsRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL, including any query string.
    pub url: String,
    /// URL path as routed to the engine, including any query string.
    pub path: String,
    /// Header mapping; signing adds the auth headers here.
    pub headers: HeaderMap,
    /// Serialized body, empty when the operation has none.
    pub body: String,
    /// Signing service name, from configuration.
    pub service: String,
    /// Signing region, from configuration.
    pub region: String,
    /// Domain host, from configuration.
    pub host: String,
}

/// Assemble an [`EsRequest`] from configuration and per-call data.
pub(crate) fn build(
    config: &EsConfig,
    path: &str,
    body: Option<&RequestBody>,
    options: &RequestOptions,
) -> Result<EsRequest> {
    if path.is_empty() {
        return Err(EsError::MissingOption("path"));
    }
    if !path.starts_with('/') {
        return Err(EsError::InvalidOption("path"));
    }

    let serialized = match body {
        Some(body) => body.serialize()?,
        None => String::new(),
    };

    let method = match &options.method {
        Some(method) => method.clone(),
        None if body.is_some() => Method::POST,
        None => Method::GET,
    };

    // The wire target defaults to HTTPS against the configured host; an
    // endpoint override swaps scheme and authority but not the signing host.
    let (url, wire_host) = match &config.endpoint {
        Some(endpoint) => {
            let base = endpoint.trim_end_matches('/');
            let parsed = url::Url::parse(base).map_err(|_| EsError::InvalidConfig)?;
            let authority = parsed
                .host_str()
                .map(|h| match parsed.port() {
                    Some(port) => format!("{h}:{port}"),
                    None => h.to_string(),
                })
                .ok_or(EsError::InvalidConfig)?;
            (format!("{base}{path}"), authority)
        }
        None => (format!("https://{}{}", config.host, path), config.host.clone()),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::HOST,
        HeaderValue::from_str(&wire_host).map_err(|_| EsError::InvalidOption("host"))?,
    );

    Ok(EsRequest {
        method,
        url,
        path: path.to_string(),
        headers,
        body: serialized,
        service: config.service.clone(),
        region: config.region.clone(),
        host: config.host.clone(),
    })
}
