//! Central request dispatcher.
//!
//! The dispatcher turns any [`Endpoint`] descriptor into a single transport
//! call and classifies the raw outcome into the shared taxonomy. It is
//! stateless between calls apart from the underlying `reqwest::Client`, which
//! is reused across dispatches for connection pooling, so one instance can be
//! shared freely and concurrent dispatches do not interfere.

use crate::classify::classify;
use crate::endpoint::Endpoint;
use crate::{NetError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::env;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Executes descriptors and classifies their outcomes.
///
/// Construct one at the application's composition root and pass references to
/// every component that dispatches requests.
pub struct Dispatcher {
    client: reqwest::Client,
}

/// Builder for [`Dispatcher`] with a small, predictable surface.
pub struct DispatcherBuilder {
    connect_timeout: Option<Duration>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self {
            connect_timeout: None,
        }
    }

    /// Set a connection-establishment timeout on the shared client.
    ///
    /// Per-request timeouts always come from the descriptor; this only bounds
    /// the TCP/TLS handshake.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<Dispatcher> {
        // Env-overridable handshake bound for deployments that cannot reach
        // the builder.
        let connect_timeout = self.connect_timeout.unwrap_or_else(|| {
            let secs = env::var("EMBER_HTTP_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(30);
            Duration::from_secs(secs)
        });

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(NetError::Network)?;

        Ok(Dispatcher { client })
    }
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Create a dispatcher with default transport settings.
    pub fn new() -> Result<Self> {
        DispatcherBuilder::new().build()
    }

    pub fn builder() -> DispatcherBuilder {
        DispatcherBuilder::new()
    }

    /// Execute one descriptor and classify the outcome.
    ///
    /// Exactly one outcome is produced per call: either the parsed payload
    /// tree or a [`NetError`]. The transport call is made once, with no implicit
    /// retry, and the future resolves only after classification completes.
    pub async fn dispatch(&self, endpoint: &dyn Endpoint) -> Result<Value> {
        let mut url = Url::parse(&endpoint.url()).map_err(|_| NetError::InvalidUrl)?;

        let method = endpoint.method();
        let parameters = endpoint.parameters();
        let body = endpoint.body();

        // GET parameters travel as query items, stringified. Nested values are
        // rendered as compact JSON rather than deep-encoded, a known
        // limitation carried over from the original pipeline.
        if body.is_none() && method == Method::GET && !parameters.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &parameters {
                pairs.append_pair(key, &stringify(value));
            }
            drop(pairs);
        }

        // Descriptor headers overlay the default, last write wins.
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        for (key, value) in endpoint.headers() {
            match (
                HeaderName::from_bytes(key.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warn!(header = %key, "dropping unrepresentable header"),
            }
        }

        let mut request = self
            .client
            .request(method.clone(), url.clone())
            .timeout(endpoint.timeout())
            .headers(headers);

        // A pre-serialized body wins silently over the parameter mapping.
        if let Some(body) = body {
            request = request.body(body);
        } else if (method == Method::POST || method == Method::PUT) && !parameters.is_empty() {
            let encoded =
                serde_json::to_vec(&Value::Object(parameters)).map_err(NetError::Encoding)?;
            request = request.body(encoded);
        }

        debug!(%method, %url, "dispatching request");

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                NetError::Timeout
            } else {
                NetError::Network(e)
            }
        })?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(NetError::Network)?;
        debug!(status, len = bytes.len(), "response received");

        classify(Some(status), Some(bytes))
    }
}

/// Stringify one query value: strings pass through unquoted, everything else
/// renders as compact JSON.
fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
