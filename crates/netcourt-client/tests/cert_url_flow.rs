// crates/netcourt-client/tests/cert_url_flow.rs
// ============================================================================
// Module: Certificate-URL Flow Tests
// Description: End-to-end tests for the certificate-URL judicial variant.
// Purpose: Ensure responses carry codes and certificate URLs correctly.
// Dependencies: netcourt-client, netcourt-core, serde_json, tiny_http, url
// ============================================================================

//! ## Overview
//! Drives [`CertUrlClient`] against scripted backends and an injected
//! in-memory transport.

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
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;

use common::Backend;
use common::Reply;
use common::TestKey;
use common::UNREACHABLE_HOST;
use common::signature_of;
use common::timestamp_of;
use netcourt_client::CertUrlClient;
use netcourt_client::HttpReply;
use netcourt_client::NotaryClient;
use netcourt_client::Transport;
use netcourt_client::TransportError;
use netcourt_core::Business;
use netcourt_core::Identity;
use netcourt_core::NETWORK_ERROR_CODE;
use netcourt_core::NETWORK_ERROR_MESSAGE;
use netcourt_core::NotaryError;
use netcourt_core::Person;
use serde_json::Value;
use serde_json::json;
use url::Url;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Builds a client pointed at `host`.
fn client(key: &TestKey, host: &str) -> CertUrlClient {
    let mut client = CertUrlClient::new("acct-url", Some(&key.pem), None).unwrap();
    client.set_host(host);
    client
}

/// In-memory transport that records URLs and answers with a fixed reply.
struct FixedTransport {
    /// Reply returned for every post.
    reply: HttpReply,
    /// URLs posted to.
    urls: Mutex<Vec<String>>,
}

impl Transport for FixedTransport {
    fn post_json(&self, url: &Url, _body: &Value) -> Result<HttpReply, TransportError> {
        self.urls.lock().unwrap().push(url.to_string());
        Ok(self.reply.clone())
    }

    fn get(&self, _url: &Url) -> Result<Box<dyn Read + Send>, TransportError> {
        Err(TransportError::Status(404))
    }
}

// ============================================================================
// SECTION: Certificate
// ============================================================================

#[test]
fn successful_cert_exposes_url_and_default_code() {
    let key = TestKey::generate();
    let backend = Backend::start(vec![
        Reply::json(&json!({"success": true, "responseData": "tx-9"}))
            .with_header("Certurl", "https://cert.example/files/tx-9.pdf"),
    ]);
    let client = client(&key, &backend.base);

    let response = client.create_notary_cert("tok", "final", Some("hash"), None, None).unwrap();
    assert!(response.is_success());
    assert_eq!(response.response_data(), Some(&json!("tx-9")));
    assert_eq!(response.cert_url(), Some("https://cert.example/files/tx-9.pdf"));
    assert_eq!(response.code(), Some(NETWORK_ERROR_CODE));
    assert_eq!(response.status(), 200);

    let captured = backend.finish();
    let body = &captured[0].body;
    assert_eq!(captured[0].path, "/api/blockChain/notaryCertUrl");
    let message = format!("acct-urlfinal{}", timestamp_of(body));
    assert!(key.verifies(&message, signature_of(body)));
}

#[test]
fn rejected_cert_hides_url_and_keeps_backend_code() {
    let key = TestKey::generate();
    let backend = Backend::start(vec![
        Reply::json(&json!({"success": false, "code": "TOKEN_INVALID", "errMessage": "bad token"}))
            .with_header("Certurl", "https://cert.example/files/x.pdf"),
    ]);
    let client = client(&key, &backend.base);

    let response = client.create_notary_cert("tok", "final", None, None, None).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.cert_url(), None);
    assert_eq!(response.code(), Some("TOKEN_INVALID"));
    assert_eq!(response.message(), Some("bad token"));
    backend.finish();
}

#[test]
fn non_200_cert_uses_network_defaults() {
    let key = TestKey::generate();
    let backend = Backend::start(vec![Reply::status_json(
        500,
        &json!({"success": true, "code": "IGNORED"}),
    )]);
    let client = client(&key, &backend.base);
    let response = client.create_notary_cert("tok", "final", None, None, None).unwrap();
    assert!(!response.is_success());
    assert_eq!(response.code(), Some(NETWORK_ERROR_CODE));
    assert_eq!(response.message(), Some(NETWORK_ERROR_MESSAGE));
    assert!(response.is_network_failure());
    backend.finish();
}

#[test]
fn unreachable_host_returns_failed_response() {
    let key = TestKey::generate();
    let client = client(&key, UNREACHABLE_HOST);
    let response = client.create_notary_cert("tok", "final", None, None, None).unwrap();
    assert!(response.is_network_failure());
    assert_eq!(response.status(), 500);
    assert!(response.raw_body().is_empty());
}

// ============================================================================
// SECTION: Token
// ============================================================================

#[test]
fn token_rejection_carries_backend_code() {
    let key = TestKey::generate();
    let backend = Backend::start(vec![
        Reply::json(&json!({"success": true, "responseData": "tok-b"})),
        Reply::json(&json!({"success": false, "code": "ACCOUNT_LOCKED", "errMessage": "locked"})),
    ]);
    let client = client(&key, &backend.base);
    let customer = Identity::from(Person::new("Sun Qi", "110101199301010055"));
    let business = Business::new(1, Some("IMAGE")).unwrap();

    assert_eq!(client.create_notary_token(&customer, &business, None).unwrap(), "tok-b");
    let err = client.create_notary_token(&customer, &business, None).unwrap_err();
    assert_eq!(
        err,
        NotaryError::BadResponse {
            message: "locked".to_string(),
            status: 200,
            code: Some("ACCOUNT_LOCKED".to_string()),
        }
    );
    let captured = backend.finish();
    assert_eq!(captured[0].path, "/api/blockChain/notaryToken");
}

// ============================================================================
// SECTION: Transport Injection
// ============================================================================

#[test]
fn injected_transport_survives_host_change() {
    let key = TestKey::generate();
    let mut headers = BTreeMap::new();
    headers.insert("certurl".to_string(), "https://cert.example/c".to_string());
    let transport = Arc::new(FixedTransport {
        reply: HttpReply {
            status: 200,
            headers,
            body: br#"{"success":"1","responseData":"tx-1"}"#.to_vec(),
        },
        urls: Mutex::new(Vec::new()),
    });
    let mut client = client(&key, "https://first.example").with_transport(transport.clone());

    let first = client.create_notary_cert("tok", "p", None, None, None).unwrap();
    assert!(first.is_success());
    assert_eq!(first.cert_url(), Some("https://cert.example/c"));
    client.set_host("https://second.example/");
    client.create_notary_cert("tok", "p", None, None, None).unwrap();

    let urls = transport.urls.lock().unwrap();
    assert_eq!(
        *urls,
        vec![
            "https://first.example/api/blockChain/notaryCertUrl".to_string(),
            "https://second.example/api/blockChain/notaryCertUrl".to_string(),
        ]
    );
}

#[test]
fn invalid_host_is_invalid_argument() {
    let key = TestKey::generate();
    let client = client(&key, "not a url");
    let err = client.create_notary_cert("tok", "p", None, None, None).unwrap_err();
    assert!(matches!(err, NotaryError::InvalidArgument(_)));
}
