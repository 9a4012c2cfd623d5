//! Request descriptor contract.
//!
//! Each logical API call is described by a small value type implementing
//! [`Endpoint`]. The trait provides defaults for everything except the target
//! URL, so a descriptor overrides only what differs: method, headers, a
//! structured parameter mapping, a pre-serialized body, or the timeout.
//! Descriptors are created per call, handed to the dispatcher once, and
//! discarded; no reuse, no pooling.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::time::Duration;

pub use reqwest::Method;

/// Default per-request timeout applied when a descriptor does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Describes one network operation: method, URL, headers, body or parameters,
/// and timeout.
///
/// A descriptor may supply either a structured parameter mapping or a
/// pre-serialized body. If both are present the body wins silently and the
/// parameters are not sent; several descriptors rely on this (registration
/// sends a body and leaves the parameters empty).
pub trait Endpoint: Send + Sync {
    /// Target URL for this operation.
    fn url(&self) -> String;

    /// HTTP method. Defaults to POST.
    fn method(&self) -> Method {
        Method::POST
    }

    /// Header mapping applied on top of the dispatcher's defaults.
    ///
    /// Keys are case-sensitive as supplied; last write wins. A descriptor may
    /// override the default `Content-Type: application/json`.
    fn headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }

    /// Structured parameter mapping.
    ///
    /// For POST/PUT this serializes to the JSON request body; for GET each
    /// entry becomes a URL query item with a stringified value.
    fn parameters(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Pre-serialized request body, used verbatim when present.
    fn body(&self) -> Option<Vec<u8>> {
        None
    }

    /// Per-request timeout enforced by the transport.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }
}
