//! Signed HTTP client for AWS-hosted Elasticsearch.
//!
//! This crate talks to an Elasticsearch-compatible domain fronted by AWS
//! request signing. It provides:
//! - Document operations: index, get, mget, update, delete, bulk
//! - Search with scrolling and query-string shaping
//! - Index and mapping management, plus an existence probe
//! - SigV4 signing of every request, with routing pinned to the
//!   configured host and region
//!
//! Every operation validates its arguments before any network I/O and
//! reports failures as machine-readable tokens (`not_index`,
//! `invalid_body`, ...).
//!
//! # Example
//!
//! ```rust,no_run
//! use aws_es::{EsClient, EsConfig, SearchOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = EsConfig::new(
//!         "AKIDEXAMPLE",
//!         "wJalrXUtnFEMI...",
//!         "es",
//!         "eu-west-1",
//!         "search-logs.eu-west-1.es.amazonaws.com",
//!     )?;
//!     let client = EsClient::new(config)?;
//!
//!     // Index a document
//!     client
//!         .index(
//!             "articles",
//!             "article",
//!             json!({ "title": "Hello", "tags": ["intro"] }),
//!             Default::default(),
//!         )
//!         .await?;
//!
//!     // Search it back
//!     let hits = client
//!         .search(
//!             "articles",
//!             "article",
//!             json!({ "query": { "query_string": { "query": "hello" } } }),
//!             SearchOptions::default().with_size(10),
//!         )
//!         .await?;
//!
//!     println!("{}", hits["hits"]["total"]);
//!     Ok(())
//! }
//! ```
//!
//! There is no retry, timeout, or cancellation layer: each call issues
//! exactly one outbound request and resolves once, however long the
//! transport takes.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
mod config;
mod error;
mod request;
mod response;
mod sign;
mod transport;
mod validate;

pub use client::{DeleteOptions, EsClient, IndexOptions, MappingOptions, SearchOptions};
pub use config::EsConfig;
pub use error::{EsError, Result};
pub use request::{EsRequest, RequestBody, RequestOptions};
pub use transport::{HttpTransport, RawResponse, Transport};

// Re-export common types
pub use http::{Method, StatusCode};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::{
        DeleteOptions, EsClient, EsConfig, EsError, IndexOptions, MappingOptions, RequestBody,
        RequestOptions, Result, SearchOptions,
    };
}
