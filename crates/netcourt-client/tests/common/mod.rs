// crates/netcourt-client/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared helpers for netcourt-client integration tests.
// Purpose: Provide scripted HTTP backends, keys, and metric recorders.
// Dependencies: netcourt-client, netcourt-core, hex, openssl, serde_json, tiny_http
// ============================================================================

//! ## Overview
//! A scripted `tiny_http` backend answers a fixed sequence of replies and
//! records every request it saw, so flow tests can assert on the exact
//! payloads and signatures the clients produced.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::Duration;

use netcourt_client::NotaryMetricEvent;
use netcourt_client::NotaryMetrics;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::rsa::Rsa;
use openssl::sign::Verifier;
use serde_json::Value;
use tiny_http::Header;
use tiny_http::Response;
use tiny_http::Server;

// ============================================================================
// SECTION: Scripted Backend
// ============================================================================

/// One scripted reply.
#[derive(Debug, Clone)]
pub struct Reply {
    /// HTTP status.
    pub status: u16,
    /// Extra response headers.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Reply {
    /// 200 reply with a JSON body.
    pub fn json(body: &Value) -> Self {
        Self::status_json(200, body)
    }

    /// Reply with the given status and JSON body.
    pub fn status_json(status: u16, body: &Value) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: serde_json::to_vec(body).unwrap(),
        }
    }

    /// Reply with the given status and raw body.
    pub fn raw(status: u16, body: &[u8]) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.to_vec(),
        }
    }

    /// Adds a response header.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// Request observed by the scripted backend.
#[derive(Debug, Clone)]
pub struct Captured {
    /// HTTP method.
    pub method: String,
    /// Request path including query.
    pub path: String,
    /// Content-Type header, if any.
    pub content_type: Option<String>,
    /// Request body parsed as JSON, or `Null`.
    pub body: Value,
}

/// Running scripted backend.
pub struct Backend {
    /// Base URL (`http://127.0.0.1:<port>`).
    pub base: String,
    /// Requests observed so far.
    captured: Arc<Mutex<Vec<Captured>>>,
    /// Server thread.
    handle: JoinHandle<()>,
}

impl Backend {
    /// Starts a backend that answers `replies` in order, then stops.
    pub fn start(replies: Vec<Reply>) -> Self {
        let server = Server::http("127.0.0.1:0").expect("http server");
        let base = format!("http://{}", server.server_addr());
        let captured = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&captured);
        let handle = std::thread::spawn(move || {
            for reply in replies {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut raw = String::new();
                request.as_reader().read_to_string(&mut raw).unwrap();
                let content_type = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Content-Type"))
                    .map(|header| header.value.as_str().to_string());
                sink.lock().unwrap().push(Captured {
                    method: request.method().to_string(),
                    path: request.url().to_string(),
                    content_type,
                    body: serde_json::from_str(&raw).unwrap_or(Value::Null),
                });
                let mut response = Response::from_data(reply.body).with_status_code(reply.status);
                for (name, value) in &reply.headers {
                    response = response
                        .with_header(Header::from_bytes(name.as_bytes(), value.as_bytes()).unwrap());
                }
                request.respond(response).expect("respond");
            }
        });
        Self {
            base,
            captured,
            handle,
        }
    }

    /// Waits for all scripted replies and returns the captured requests.
    pub fn finish(self) -> Vec<Captured> {
        self.handle.join().expect("backend thread");
        let captured = self.captured.lock().unwrap();
        captured.clone()
    }
}

/// Host on which nothing listens.
pub const UNREACHABLE_HOST: &str = "http://127.0.0.1:1";

// ============================================================================
// SECTION: Keys
// ============================================================================

/// Throwaway RSA key pair.
pub struct TestKey {
    /// Private key used for verification.
    pub key: PKey<Private>,
    /// PEM encoding handed to clients.
    pub pem: Vec<u8>,
}

impl TestKey {
    /// Generates a fresh 2048-bit key.
    pub fn generate() -> Self {
        let rsa = Rsa::generate(2048).unwrap();
        let pem = rsa.private_key_to_pem().unwrap();
        Self {
            key: PKey::from_rsa(rsa).unwrap(),
            pem,
        }
    }

    /// Verifies a hex signature over `message`.
    pub fn verifies(&self, message: &str, signature_hex: &str) -> bool {
        let signature = hex::decode(signature_hex).unwrap();
        let mut verifier = Verifier::new(MessageDigest::sha256(), &self.key).unwrap();
        verifier.update(message.as_bytes()).unwrap();
        verifier.verify(&signature).unwrap()
    }
}

// ============================================================================
// SECTION: Metrics
// ============================================================================

/// Metrics sink that keeps every request event.
#[derive(Default)]
pub struct RecordingMetrics {
    /// Recorded request events.
    pub requests: Mutex<Vec<NotaryMetricEvent>>,
    /// Number of latency observations.
    pub latencies: Mutex<usize>,
}

impl NotaryMetrics for RecordingMetrics {
    fn record_request(&self, event: NotaryMetricEvent) {
        self.requests.lock().unwrap().push(event);
    }

    fn record_latency(&self, _event: NotaryMetricEvent, _latency: Duration) {
        *self.latencies.lock().unwrap() += 1;
    }
}

// ============================================================================
// SECTION: Payload Helpers
// ============================================================================

/// Returns the decimal timestamp of a captured payload.
pub fn timestamp_of(body: &Value) -> String {
    body["timestamp"].as_u64().expect("numeric timestamp").to_string()
}

/// Returns the signature of a captured payload.
pub fn signature_of(body: &Value) -> &str {
    body["signedData"].as_str().expect("signedData")
}
