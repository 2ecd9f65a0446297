// crates/netcourt-client/src/transport.rs
// ============================================================================
// Module: NetCourt Transport
// Description: Blocking HTTP transport used by notary clients.
// Purpose: Post signed JSON bodies and fetch certificates behind a trait seam.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! [`Transport`] is the only place a notary client touches the network.
//! [`HttpTransport`] is the default blocking implementation; tests and
//! embedders may inject their own.
//! Invariants:
//! - Non-2xx replies to `post_json` are returned, never raised.
//! - Header names in [`HttpReply`] are lowercased.
//! - `get` fails on non-2xx so callers never persist error pages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::io::Read;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use serde_json::Value;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default request timeout applied by every backend.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Maximum redirects followed for a single request.
const MAX_REDIRECTS: usize = 5;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Raw reply to a JSON post.
///
/// # Invariants
/// - `headers` keys are lowercase; repeated headers keep the first value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lowercase name.
    pub headers: BTreeMap<String, String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpReply {
    /// Returns the header value for `name`, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Returns true for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("transport build error: {0}")]
    Build(String),
    /// Connection, timeout, or protocol failure.
    #[error("transport request error: {0}")]
    Request(String),
    /// Request body could not be encoded.
    #[error("transport encode error: {0}")]
    Encode(String),
    /// Non-success status on a download.
    #[error("transport status error: {0}")]
    Status(u16),
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Blocking HTTP transport seam.
pub trait Transport: Send + Sync {
    /// Posts `body` as JSON to `url` and returns the reply whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] when no reply was received.
    fn post_json(&self, url: &Url, body: &Value) -> Result<HttpReply, TransportError>;

    /// Opens a streaming GET of `url`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on network failure or a non-2xx status.
    fn get(&self, url: &Url) -> Result<Box<dyn Read + Send>, TransportError>;
}

// ============================================================================
// SECTION: HTTP Transport
// ============================================================================

/// Default transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Underlying HTTP client.
    client: Client,
}

impl HttpTransport {
    /// Builds a transport with the given timeout.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] when the client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(timeout)
            .build()
            .map_err(|err| TransportError::Build(err.to_string()))?;
        Ok(Self {
            client,
        })
    }

    /// Wraps a preconfigured client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self {
            client,
        }
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &Url, body: &Value) -> Result<HttpReply, TransportError> {
        let payload = serde_json::to_vec(body).map_err(|err| TransportError::Encode(err.to_string()))?;
        let mut response = self
            .client
            .post(url.as_str())
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        let status = response.status().as_u16();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(text) = value.to_str() {
                headers.entry(name.as_str().to_ascii_lowercase()).or_insert_with(|| text.to_string());
            }
        }
        let mut bytes = Vec::new();
        response.read_to_end(&mut bytes).map_err(|err| TransportError::Request(err.to_string()))?;
        Ok(HttpReply {
            status,
            headers,
            body: bytes,
        })
    }

    fn get(&self, url: &Url) -> Result<Box<dyn Read + Send>, TransportError> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .map_err(|err| TransportError::Request(err.to_string()))?;
        if !response.status().is_success() {
            return Err(TransportError::Status(response.status().as_u16()));
        }
        Ok(Box::new(response))
    }
}
