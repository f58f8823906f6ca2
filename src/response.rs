//! Response decoding.

use crate::error::{EsError, Result};
use crate::transport::RawResponse;
use serde_json::Value;

/// Parse an accumulated response body as JSON.
///
/// The engine reports its own errors as JSON documents, so a non-2xx status
/// with a parseable body decodes like any other payload. A body that is not
/// JSON at all fails with [`EsError::Decode`], which keeps the raw response
/// around for diagnosis.
pub(crate) fn decode(raw: RawResponse) -> Result<Value> {
    match serde_json::from_slice(&raw.body) {
        Ok(payload) => Ok(payload),
        Err(source) => Err(EsError::Decode { raw, source }),
    }
}
