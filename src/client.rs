//! Elasticsearch client facade.
//!
//! One method per logical operation. Every method validates its arguments
//! in a fixed order before any I/O, then runs the shared pipeline: build
//! the request description, sign it, send it, decode the response.

use crate::config::EsConfig;
use crate::error::{EsError, Result};
use crate::request::{self, RequestBody, RequestOptions};
use crate::response;
use crate::sign;
use crate::transport::{HttpTransport, RawResponse, Transport};
use crate::validate;
use aws_credential_types::Credentials;
use http::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::{debug, info};

/// Signed Elasticsearch client.
///
/// Cheap to clone; concurrent calls share only the read-only configuration
/// and the transport's connection pool and need no external
/// synchronization.
#[derive(Clone)]
pub struct EsClient {
    config: Arc<EsConfig>,
    credentials: Credentials,
    transport: Arc<dyn Transport>,
}

impl EsClient {
    /// Create a client speaking HTTPS through [`HttpTransport`].
    pub fn new(config: EsConfig) -> Result<Self> {
        Self::with_transport(config, Arc::new(HttpTransport::new()))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: EsConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        info!(host = %config.host, region = %config.region, "initializing elasticsearch client");

        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "aws-es",
        );

        Ok(Self {
            config: Arc::new(config),
            credentials,
            transport,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &EsConfig {
        &self.config
    }

    // =========================================================================
    // Index & mapping operations
    // =========================================================================

    /// Create an index, optionally with settings/mappings. A missing body
    /// is sent as `{}`.
    pub async fn create_index(&self, index: &str, body: Option<Value>) -> Result<Value> {
        validate::required_text("index", index)?;
        let body = body.filter(|b| !b.is_null());
        if let Some(body) = &body {
            validate::structured_body(body)?;
        }

        let path = format!("/{index}");
        let body = body.unwrap_or_else(|| Value::Object(serde_json::Map::new()));
        self.dispatch(
            path,
            Some(RequestBody::Single(body)),
            RequestOptions::method(Method::PUT),
        )
        .await
    }

    /// Delete an index, a type within it, or a single document.
    pub async fn delete(&self, index: &str, options: DeleteOptions) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::optional_text("type", options.doc_type.as_deref())?;
        if options.doc_type.is_some() {
            validate::optional_text("id", options.id.as_deref())?;
        }

        let mut path = format!("/{index}");
        if let Some(doc_type) = &options.doc_type {
            path.push('/');
            path.push_str(doc_type);
        }
        if let Some(id) = &options.id {
            path.push('/');
            path.push_str(id);
        }
        self.dispatch(path, None, RequestOptions::method(Method::DELETE))
            .await
    }

    /// Install a mapping for a type.
    pub async fn put_mapping(
        &self,
        doc_type: &str,
        body: Value,
        options: MappingOptions,
    ) -> Result<Value> {
        validate::required_text("type", doc_type)?;
        validate::structured_body(&body)?;
        validate::optional_text("index", options.index.as_deref())?;

        let path = mapping_path(options.index.as_deref(), doc_type);
        self.dispatch(
            path,
            Some(RequestBody::Single(body)),
            RequestOptions::method(Method::POST),
        )
        .await
    }

    /// Fetch the mapping for a type.
    pub async fn get_mapping(&self, doc_type: &str, options: MappingOptions) -> Result<Value> {
        validate::required_text("type", doc_type)?;
        validate::optional_text("index", options.index.as_deref())?;

        let path = mapping_path(options.index.as_deref(), doc_type);
        self.dispatch(path, None, RequestOptions::method(Method::GET))
            .await
    }

    /// Probe whether an index exists. The HTTP status, not the body,
    /// encodes the answer: 200 means it exists, 404 that it does not, and
    /// any other status is an error.
    pub async fn index_exists(&self, index: &str) -> Result<bool> {
        validate::required_text("index", index)?;

        let path = format!("/{index}");
        let raw = self
            .round_trip(&path, None, &RequestOptions::method(Method::HEAD))
            .await?;
        match raw.status {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            other => Err(EsError::UnexpectedStatus(other.as_u16())),
        }
    }

    // =========================================================================
    // Document operations
    // =========================================================================

    /// Index a document. Without an explicit id the engine assigns one.
    pub async fn index(
        &self,
        index: &str,
        doc_type: &str,
        body: Value,
        options: IndexOptions,
    ) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        validate::structured_body(&body)?;
        validate::optional_text("id", options.id.as_deref())?;

        let mut path = format!("/{index}/{doc_type}");
        if let Some(id) = &options.id {
            path.push('/');
            path.push_str(id);
        }
        self.dispatch(path, Some(RequestBody::Single(body)), RequestOptions::default())
            .await
    }

    /// Update a document in place.
    pub async fn update(
        &self,
        index: &str,
        doc_type: &str,
        id: &str,
        body: Value,
    ) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        validate::structured_body(&body)?;
        validate::required_text("id", id)?;

        let path = format!("/{index}/{doc_type}/{id}/_update");
        self.dispatch(path, Some(RequestBody::Single(body)), RequestOptions::default())
            .await
    }

    /// Fetch a document by id.
    pub async fn get(&self, index: &str, doc_type: &str, id: &str) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        validate::required_text("id", id)?;

        let path = format!("/{index}/{doc_type}/{id}");
        self.dispatch(path, None, RequestOptions::default()).await
    }

    /// Fetch several documents in one call.
    pub async fn mget(&self, index: &str, doc_type: &str, body: Value) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        validate::structured_body(&body)?;

        let path = format!("/{index}/{doc_type}/_mget");
        self.dispatch(path, Some(RequestBody::Single(body)), RequestOptions::default())
            .await
    }

    /// Send a bulk payload: a non-empty sequence of action/document lines,
    /// serialized as newline-delimited JSON.
    pub async fn bulk(&self, index: &str, doc_type: &str, body: Vec<Value>) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        if body.is_empty() {
            return Err(EsError::InvalidOption("body"));
        }

        let path = format!("/{index}/{doc_type}/_bulk");
        self.dispatch(path, Some(RequestBody::Bulk(body)), RequestOptions::default())
            .await
    }

    // =========================================================================
    // Search operations
    // =========================================================================

    /// Count documents matching an optional query body.
    pub async fn count(&self, index: &str, doc_type: &str, body: Option<Value>) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        let body = body.filter(|b| !b.is_null());
        if let Some(body) = &body {
            validate::structured_body(body)?;
        }

        let path = format!("/{index}/{doc_type}/_count");
        self.dispatch(path, body.map(RequestBody::Single), RequestOptions::default())
            .await
    }

    /// Run a search. Query-string parameters are built only from the
    /// options actually set; `default_operator` is injected into the
    /// body's `query.query_string` clause when one is present.
    pub async fn search(
        &self,
        index: &str,
        doc_type: &str,
        mut body: Value,
        options: SearchOptions,
    ) -> Result<Value> {
        validate::required_text("index", index)?;
        validate::required_text("type", doc_type)?;
        validate::structured_body(&body)?;
        validate::optional_text("scroll", options.scroll.as_deref())?;
        validate::optional_text("searchType", options.search_type.as_deref())?;
        validate::optional_text("defaultOperator", options.default_operator.as_deref())?;
        validate::optional_text("sort", options.sort.as_deref())?;

        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(scroll) = &options.scroll {
            params.push(("scroll", scroll.clone()));
        }
        if let Some(search_type) = &options.search_type {
            params.push(("search_type", search_type.clone()));
        }
        if let Some(size) = options.size {
            params.push(("size", size.to_string()));
        }
        if let Some(from) = options.from {
            params.push(("from", from.to_string()));
        }
        if let Some(sort) = &options.sort {
            params.push(("sort", sort.clone()));
        }

        if let Some(operator) = &options.default_operator
            && let Some(Value::Object(clause)) = body.pointer_mut("/query/query_string")
        {
            clause.insert(
                "default_operator".to_string(),
                Value::String(operator.clone()),
            );
        }

        let query = serde_urlencoded::to_string(&params).map_err(|_| EsError::InvalidOptions)?;
        let path = format!("/{index}/{doc_type}/_search/?{query}");
        self.dispatch(path, Some(RequestBody::Single(body)), RequestOptions::default())
            .await
    }

    /// Continue a scrolling search.
    pub async fn scroll(&self, scroll: &str, scroll_id: &str) -> Result<Value> {
        validate::required_text("scroll", scroll)?;
        validate::required_text("scrollId", scroll_id)?;

        let query = serde_urlencoded::to_string([("scroll", scroll), ("scroll_id", scroll_id)])
            .map_err(|_| EsError::InvalidOptions)?;
        let path = format!("/_search/scroll?{query}");
        self.dispatch(path, None, RequestOptions::default()).await
    }

    // =========================================================================
    // Low-level access
    // =========================================================================

    /// Issue a signed request against an arbitrary engine path.
    ///
    /// Escape hatch for endpoints without a dedicated method; the path and
    /// body shape are still validated.
    pub async fn request(
        &self,
        path: &str,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Value> {
        self.dispatch(path.to_string(), body, options).await
    }

    async fn dispatch(
        &self,
        path: String,
        body: Option<RequestBody>,
        options: RequestOptions,
    ) -> Result<Value> {
        let raw = self.round_trip(&path, body.as_ref(), &options).await?;
        response::decode(raw)
    }

    async fn round_trip(
        &self,
        path: &str,
        body: Option<&RequestBody>,
        options: &RequestOptions,
    ) -> Result<RawResponse> {
        let request = request::build(&self.config, path, body, options)?;
        let signed = sign::sign(request, &self.credentials, SystemTime::now())?;
        debug!(method = %signed.method, path = %signed.path, "sending signed request");
        self.transport.send(&signed).await
    }
}

impl std::fmt::Debug for EsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EsClient")
            .field("host", &self.config.host)
            .field("region", &self.config.region)
            .finish()
    }
}

fn mapping_path(index: Option<&str>, doc_type: &str) -> String {
    match index {
        Some(index) => format!("/{index}/_mapping/{doc_type}"),
        None => format!("/_mapping/{doc_type}"),
    }
}

/// Options for [`EsClient::index`].
#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    /// Explicit document id; when absent the engine assigns one.
    pub id: Option<String>,
}

impl IndexOptions {
    /// Options carrying an explicit document id.
    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }
}

/// Options for [`EsClient::search`].
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Keep-alive for a scrolling search (e.g. `1m`).
    pub scroll: Option<String>,
    /// Engine search type.
    pub search_type: Option<String>,
    /// Default operator injected into the body's `query_string` clause.
    pub default_operator: Option<String>,
    /// Result page size.
    pub size: Option<i64>,
    /// Result page offset.
    pub from: Option<i64>,
    /// Sort specification (e.g. `title:asc`).
    pub sort: Option<String>,
}

impl SearchOptions {
    /// Set the scroll keep-alive.
    pub fn with_scroll(mut self, scroll: impl Into<String>) -> Self {
        self.scroll = Some(scroll.into());
        self
    }

    /// Set the search type.
    pub fn with_search_type(mut self, search_type: impl Into<String>) -> Self {
        self.search_type = Some(search_type.into());
        self
    }

    /// Set the default operator.
    pub fn with_default_operator(mut self, operator: impl Into<String>) -> Self {
        self.default_operator = Some(operator.into());
        self
    }

    /// Set the page size.
    pub fn with_size(mut self, size: i64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the page offset.
    pub fn with_from(mut self, from: i64) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the sort specification.
    pub fn with_sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

/// Options for [`EsClient::delete`].
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Narrow the deletion to a type.
    pub doc_type: Option<String>,
    /// Narrow the deletion to a single document.
    pub id: Option<String>,
}

impl DeleteOptions {
    /// Delete a type within the index.
    pub fn doc_type(doc_type: impl Into<String>) -> Self {
        Self {
            doc_type: Some(doc_type.into()),
            id: None,
        }
    }

    /// Delete a single document.
    pub fn document(doc_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            doc_type: Some(doc_type.into()),
            id: Some(id.into()),
        }
    }
}

/// Options for the mapping operations.
#[derive(Debug, Clone, Default)]
pub struct MappingOptions {
    /// Restrict the mapping operation to one index.
    pub index: Option<String>,
}

impl MappingOptions {
    /// Target a specific index.
    pub fn index(index: impl Into<String>) -> Self {
        Self {
            index: Some(index.into()),
        }
    }
}
