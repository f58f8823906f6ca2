//! Client configuration.

use crate::error::{EsError, Result};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config fields required at construction, in validation order.
const REQUIRED_FIELDS: &[&str] = &[
    "accessKeyId",
    "secretAccessKey",
    "service",
    "region",
    "host",
];

/// Immutable client configuration.
///
/// Created once and owned by the client for its whole lifetime. All five
/// credential/routing fields are required; construction fails outright on a
/// missing field rather than deferring the failure to the first request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EsConfig {
    /// AWS access key id.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
    /// Signing service name (normally `es`).
    pub service: String,
    /// AWS region the domain lives in.
    pub region: String,
    /// Domain host name, without a scheme.
    pub host: String,
    /// Custom endpoint URL overriding scheme and authority on the wire
    /// (for LocalStack-style local stacks). Signing still targets `host`.
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl EsConfig {
    /// Create a validated configuration.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        service: impl Into<String>,
        region: impl Into<String>,
        host: impl Into<String>,
    ) -> Result<Self> {
        let config = Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            service: service.into(),
            region: region.into(),
            host: host.into(),
            endpoint: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from a JSON mapping using the wire-level
    /// camelCase field names.
    pub fn from_json(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Err(EsError::MissingConfig);
        }
        if !value.is_object() {
            return Err(EsError::InvalidConfig);
        }
        validate::missing_or_invalid(value, REQUIRED_FIELDS)?;

        let config: Self =
            serde_json::from_value(value.clone()).map_err(|_| EsError::InvalidConfig)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables.
    ///
    /// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`,
    /// `AWS_REGION`/`AWS_DEFAULT_REGION`, `AWS_ES_HOST`, optionally
    /// `AWS_ES_SERVICE` (defaults to `es`) and `AWS_ENDPOINT_URL`.
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).unwrap_or_default();

        let region = std::env::var("AWS_REGION")
            .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
            .unwrap_or_default();
        let service = std::env::var("AWS_ES_SERVICE").unwrap_or_else(|_| "es".to_string());

        let mut config = Self::new(
            var("AWS_ACCESS_KEY_ID"),
            var("AWS_SECRET_ACCESS_KEY"),
            service,
            region,
            var("AWS_ES_HOST"),
        )?;
        if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
            config.endpoint = Some(endpoint);
        }
        Ok(config)
    }

    /// Override the wire endpoint (scheme and authority).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        validate::required_text("accessKeyId", &self.access_key_id)?;
        validate::required_text("secretAccessKey", &self.secret_access_key)?;
        validate::required_text("service", &self.service)?;
        validate::required_text("region", &self.region)?;
        validate::required_text("host", &self.host)?;
        Ok(())
    }
}
