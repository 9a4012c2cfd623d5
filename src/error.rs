//! Unified error taxonomy for the dispatch pipeline.
//!
//! Every remote operation shares this closed set of failure kinds; the
//! dispatcher classifies raw transport outcomes into exactly one of them and
//! never retries on its own. Variants are ordered by detection stage, from URL
//! resolution through body decoding.

use thiserror::Error;

/// Closed error taxonomy shared by the dispatcher and its callers.
///
/// All variants are terminal from the dispatcher's perspective: they propagate
/// to the original caller unchanged. Callers distinguish at minimum
/// no-network ([`NetError::Network`] / [`NetError::Timeout`]), API rejection
/// ([`NetError::Api`] / [`NetError::Http`]), malformed server responses
/// ([`NetError::Parse`] / [`NetError::Decoding`]), and missing content
/// ([`NetError::NoData`]), since each needs different user remediation.
#[derive(Debug, Error)]
pub enum NetError {
    /// The descriptor's URL string failed to parse.
    #[error("invalid URL")]
    InvalidUrl,

    /// The descriptor's parameter mapping could not be serialized to JSON.
    #[error("request encoding error: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The transport failed before an HTTP response was obtained.
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    /// No structured HTTP response could be obtained from the transport.
    #[error("invalid response")]
    InvalidResponse,

    /// Non-2xx status without a readable API error body.
    #[error("HTTP error ({0})")]
    Http(u16),

    /// Non-2xx status with a structured error body from the API.
    #[error("API error{}: {message}", .code.map(|c| format!(" ({c})")).unwrap_or_default())]
    Api { message: String, code: Option<i64> },

    /// Successful status but an absent or empty body.
    #[error("no data received")]
    NoData,

    /// The success payload did not match the shape the caller required.
    #[error("response decoding error: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The response body is not valid JSON.
    #[error("response parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// The transport reported a per-request timeout.
    #[error("request timed out")]
    Timeout,
}
