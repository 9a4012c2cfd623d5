//! Response classification.
//!
//! Pure decision logic mapping a raw transport outcome (HTTP status plus body
//! bytes) onto the shared error taxonomy or a success payload. Kept free of
//! any transport type so it can be exercised directly in tests.

use crate::{NetError, Result};
use bytes::Bytes;
use serde_json::Value;

/// Extract the `{"message", "code"?}` shape many endpoints return on non-2xx
/// statuses. A non-string `message` disqualifies the body; a non-numeric
/// `code` is simply dropped.
fn api_error_from_body(body: &[u8]) -> Option<(String, Option<i64>)> {
    let json: Value = serde_json::from_slice(body).ok()?;
    let message = json.get("message")?.as_str()?.to_string();
    let code = json.get("code").and_then(Value::as_i64);
    Some((message, code))
}

/// Classify a raw HTTP outcome into a success payload or a taxonomy error.
///
/// `status` is `None` when no structured HTTP response was obtainable.
/// Decision order:
/// 1. no status → [`NetError::InvalidResponse`]
/// 2. status outside 200..=299 → [`NetError::Api`] if the body parses as a
///    `{"message", "code"?}` object, otherwise [`NetError::Http`]
/// 3. 2xx with absent or empty body → [`NetError::NoData`]
/// 4. 2xx with an unparsable body → [`NetError::Parse`]; a malformed
///    successful-status body is never treated as empty success
/// 5. 2xx with valid JSON → the parsed payload tree
pub fn classify(status: Option<u16>, body: Option<Bytes>) -> Result<Value> {
    let Some(status) = status else {
        return Err(NetError::InvalidResponse);
    };

    if !(200..=299).contains(&status) {
        // Best-effort secondary parse to surface the server's message.
        if let Some(body) = body.as_deref() {
            if let Some((message, code)) = api_error_from_body(body) {
                tracing::warn!(status, %message, "API rejected request");
                return Err(NetError::Api { message, code });
            }
        }
        return Err(NetError::Http(status));
    }

    let body = match body {
        Some(b) if !b.is_empty() => b,
        _ => return Err(NetError::NoData),
    };

    serde_json::from_slice(&body).map_err(NetError::Parse)
}
