//! SigV4 signing step.
//!
//! The signing algorithm itself is delegated to `aws-sigv4` and trusted.
//! This module only adapts an [`EsRequest`] into that crate's signable form
//! and returns a new request carrying the authentication headers; the
//! builder's output is never mutated in place.

use crate::error::{EsError, Result};
use crate::request::EsRequest;
use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    SignableBody, SignableRequest, SigningSettings, sign as sigv4_sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use std::time::SystemTime;

/// Sign a request, returning a new description with auth headers added.
///
/// Deterministic for a given request, credential pair, and instant.
pub(crate) fn sign(
    request: EsRequest,
    credentials: &Credentials,
    at: SystemTime,
) -> Result<EsRequest> {
    let identity: Identity = credentials.clone().into();

    let params: aws_sigv4::http_request::SigningParams<'_> = v4::SigningParams::builder()
        .identity(&identity)
        .region(&request.region)
        .name(&request.service)
        .time(at)
        .settings(SigningSettings::default())
        .build()
        .map_err(|e| EsError::Signing(e.to_string()))?
        .into();

    let headers = request
        .headers
        .iter()
        .map(|(name, value)| {
            value
                .to_str()
                .map(|value| (name.as_str(), value))
                .map_err(|e| EsError::Signing(e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let signable = SignableRequest::new(
        request.method.as_str(),
        request.url.as_str(),
        headers.into_iter(),
        SignableBody::Bytes(request.body.as_bytes()),
    )
    .map_err(|e| EsError::Signing(e.to_string()))?;

    let (instructions, _signature) = sigv4_sign(signable, &params)
        .map_err(|e| EsError::Signing(e.to_string()))?
        .into_parts();

    let mut carrier = http::Request::builder()
        .method(request.method.clone())
        .uri(&request.url)
        .body(())
        .map_err(|e| EsError::Signing(e.to_string()))?;
    *carrier.headers_mut() = request.headers.clone();
    instructions.apply_to_request_http1x(&mut carrier);

    Ok(EsRequest {
        headers: carrier.headers().clone(),
        ..request
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EsConfig;
    use crate::request::{self, RequestBody, RequestOptions};
    use serde_json::json;
    use std::time::Duration;

    fn credentials() -> Credentials {
        Credentials::new("AKIDEXAMPLE", "secret", None, None, "test")
    }

    fn request() -> EsRequest {
        let config =
            EsConfig::new("AKIDEXAMPLE", "secret", "es", "eu-west-1", "example.com").unwrap();
        let body = RequestBody::Single(json!({ "query": { "match_all": {} } }));
        request::build(&config, "/logs/doc/_search", Some(&body), &RequestOptions::default())
            .unwrap()
    }

    // 2013-05-24T00:00:00Z
    const AT: Duration = Duration::from_secs(1_369_353_600);

    #[test]
    fn signing_adds_auth_headers() {
        let signed = sign(request(), &credentials(), SystemTime::UNIX_EPOCH + AT).unwrap();

        assert_eq!(signed.headers["x-amz-date"], "20130524T000000Z");
        let auth = signed.headers["authorization"].to_str().unwrap();
        assert!(auth.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20130524/eu-west-1/es/aws4_request"));
    }

    #[test]
    fn signing_leaves_the_rest_of_the_request_alone() {
        let original = request();
        let signed = sign(original.clone(), &credentials(), SystemTime::UNIX_EPOCH + AT).unwrap();

        assert_eq!(signed.method, original.method);
        assert_eq!(signed.url, original.url);
        assert_eq!(signed.body, original.body);
        // Pre-existing headers survive signing.
        assert_eq!(signed.headers["content-type"], "application/json");
    }

    #[test]
    fn signing_is_deterministic_at_a_fixed_instant() {
        let at = SystemTime::UNIX_EPOCH + AT;
        let first = sign(request(), &credentials(), at).unwrap();
        let second = sign(request(), &credentials(), at).unwrap();
        assert_eq!(first.headers["authorization"], second.headers["authorization"]);
    }
}
