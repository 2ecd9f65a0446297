// crates/netcourt-client/src/envelope.rs
// ============================================================================
// Module: NetCourt Response Envelopes
// Description: Normalizers for the three backend response envelopes.
// Purpose: Turn heterogeneous replies into one NotaryResponse shape.
// Dependencies: netcourt-core, serde_json
// ============================================================================

//! ## Overview
//! Each backend wraps its result differently: the crawler platform in the
//! body, judicial variant A in a `Blockchainresponse` header, and judicial
//! variant B in the body plus a `Certurl` header. A [`ResponseEnvelope`]
//! maps one reply to a [`NotaryResponse`]; transport failures map to
//! [`NotaryResponse::network_failure`] regardless of envelope.
//! Invariants:
//! - Normalization never fails; rejection is data, not an error.
//! - `success` follows loose truthiness: `false`, `0`, `""`, `"0"`, `null`,
//!   and empty containers are falsy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcourt_core::NETWORK_ERROR_CODE;
use netcourt_core::NETWORK_ERROR_MESSAGE;
use netcourt_core::NETWORK_FAILURE_STATUS;
use netcourt_core::NotaryError;
use serde_json::Map;
use serde_json::Value;

use crate::transport::HttpReply;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Header carrying the variant A envelope.
pub const BLOCKCHAIN_RESPONSE_HEADER: &str = "blockchainresponse";
/// Header carrying the variant B certificate URL.
pub const CERT_URL_HEADER: &str = "certurl";
/// Crawler platform fallback message.
const REQUEST_FAILED_MESSAGE: &str = "Request Failed";
/// Variant A fallback message for a falsy `success`.
const UNKNOWN_RESPONSE_MESSAGE: &str = "Unknown response";

// ============================================================================
// SECTION: Response
// ============================================================================

/// Normalized backend response.
///
/// # Invariants
/// - `cert_url` is only set when `success` is true.
/// - Network failures carry status 500 and code `NETWORK_ERROR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotaryResponse {
    /// Whether the backend accepted the request.
    pub success: bool,
    /// Opaque `responseData` value.
    pub data: Option<Value>,
    /// Backend code, or the default supplied by the envelope.
    pub code: Option<String>,
    /// Backend message, or the fallback supplied by the envelope.
    pub message: Option<String>,
    /// Certificate download URL.
    pub cert_url: Option<String>,
    /// HTTP status, or 500 for network failures.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl NotaryResponse {
    /// Builds the response used when no usable reply was received.
    #[must_use]
    pub fn network_failure() -> Self {
        Self {
            success: false,
            data: None,
            code: Some(NETWORK_ERROR_CODE.to_string()),
            message: Some(NETWORK_ERROR_MESSAGE.to_string()),
            cert_url: None,
            status: NETWORK_FAILURE_STATUS,
            body: Vec::new(),
        }
    }

    /// Returns true when the backend accepted the request.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the `responseData` value.
    #[must_use]
    pub const fn response_data(&self) -> Option<&Value> {
        self.data.as_ref()
    }

    /// Returns the response code.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Returns the response message.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the certificate download URL.
    #[must_use]
    pub fn cert_url(&self) -> Option<&str> {
        self.cert_url.as_deref()
    }

    /// Returns the HTTP status.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn raw_body(&self) -> &[u8] {
        &self.body
    }

    /// Returns true when this response stands for a network failure.
    #[must_use]
    pub fn is_network_failure(&self) -> bool {
        !self.success
            && self.status == NETWORK_FAILURE_STATUS
            && self.code.as_deref() == Some(NETWORK_ERROR_CODE)
    }

    /// Converts a rejected response into [`NotaryError::BadResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::BadResponse`] when `success` is false.
    pub fn into_result(self) -> Result<Self, NotaryError> {
        if self.success {
            return Ok(self);
        }
        Err(NotaryError::BadResponse {
            message: self.message.unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string()),
            status: self.status,
            code: self.code,
        })
    }
}

// ============================================================================
// SECTION: Envelopes
// ============================================================================

/// Maps a raw reply to a normalized response.
pub trait ResponseEnvelope {
    /// Normalizes a received reply.
    fn normalize(&self, reply: &HttpReply) -> NotaryResponse;

    /// Normalizes a transport outcome, mapping failures to network failures.
    fn settle(&self, outcome: &Result<HttpReply, TransportError>) -> NotaryResponse {
        match outcome {
            Ok(reply) => self.normalize(reply),
            Err(_) => NotaryResponse::network_failure(),
        }
    }
}

/// Crawler platform envelope: everything lives in the JSON body.
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyEnvelope;

impl ResponseEnvelope for BodyEnvelope {
    fn normalize(&self, reply: &HttpReply) -> NotaryResponse {
        let document = parse_object(&reply.body).unwrap_or_default();
        let success = reply.is_success() && document.get("success").is_some_and(is_truthy);
        let message = if success {
            None
        } else {
            Some(
                non_empty_text(&document, "errMessage")
                    .or_else(|| non_empty_text(&document, "message"))
                    .unwrap_or_else(|| REQUEST_FAILED_MESSAGE.to_string()),
            )
        };
        NotaryResponse {
            success,
            data: present(&document, "responseData"),
            code: non_empty_text(&document, "code"),
            message,
            cert_url: None,
            status: reply.status,
            body: reply.body.clone(),
        }
    }
}

/// Judicial variant A envelope: JSON in the `Blockchainresponse` header.
///
/// # Invariants
/// - Falls back to the body only when the header is absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderJsonEnvelope;

impl ResponseEnvelope for HeaderJsonEnvelope {
    fn normalize(&self, reply: &HttpReply) -> NotaryResponse {
        if reply.status != 200 {
            return network_failure_with_body(reply);
        }
        let parsed = match reply.header(BLOCKCHAIN_RESPONSE_HEADER) {
            Some(header) => parse_object(header.as_bytes()),
            None => parse_object(&reply.body),
        };
        let Some(document) = parsed.filter(|document| !document.is_empty()) else {
            return network_failure_with_body(reply);
        };
        let success = document.get("success").is_some_and(is_truthy);
        let message = if success {
            None
        } else {
            Some(
                non_empty_text(&document, "errMessage")
                    .unwrap_or_else(|| UNKNOWN_RESPONSE_MESSAGE.to_string()),
            )
        };
        NotaryResponse {
            success,
            data: present(&document, "responseData"),
            code: non_empty_text(&document, "code"),
            message,
            cert_url: None,
            status: reply.status,
            body: reply.body.clone(),
        }
    }
}

/// Judicial variant B envelope: body JSON plus a `Certurl` header.
///
/// # Invariants
/// - `code` and `message` fall back to the network-failure defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct CertUrlEnvelope;

impl ResponseEnvelope for CertUrlEnvelope {
    fn normalize(&self, reply: &HttpReply) -> NotaryResponse {
        if reply.status != 200 {
            return NotaryResponse {
                status: reply.status,
                body: reply.body.clone(),
                ..NotaryResponse::network_failure()
            };
        }
        let document = parse_object(&reply.body).unwrap_or_default();
        let success = document.get("success").is_some_and(is_truthy);
        let cert_url = if success {
            reply.header(CERT_URL_HEADER).filter(|url| !url.is_empty()).map(str::to_string)
        } else {
            None
        };
        NotaryResponse {
            success,
            data: present(&document, "responseData"),
            code: Some(
                non_empty_text(&document, "code").unwrap_or_else(|| NETWORK_ERROR_CODE.to_string()),
            ),
            message: Some(
                non_empty_text(&document, "errMessage")
                    .unwrap_or_else(|| NETWORK_ERROR_MESSAGE.to_string()),
            ),
            cert_url,
            status: reply.status,
            body: reply.body.clone(),
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loose truthiness used by every backend for the `success` flag.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n.abs() > 0.0),
        Value::String(text) => !(text.is_empty() || text == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// Parses bytes as a JSON object; anything else is `None`.
fn parse_object(bytes: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

/// Returns a non-null field value.
fn present(document: &Map<String, Value>, key: &str) -> Option<Value> {
    document.get(key).filter(|value| !value.is_null()).cloned()
}

/// Returns a field rendered as non-empty text.
fn non_empty_text(document: &Map<String, Value>, key: &str) -> Option<String> {
    let text = match document.get(key)? {
        Value::String(text) => text.clone(),
        Value::Null => return None,
        other => other.to_string(),
    };
    (!text.is_empty()).then_some(text)
}

/// Network failure that keeps the received body for inspection.
fn network_failure_with_body(reply: &HttpReply) -> NotaryResponse {
    NotaryResponse {
        body: reply.body.clone(),
        ..NotaryResponse::network_failure()
    }
}
