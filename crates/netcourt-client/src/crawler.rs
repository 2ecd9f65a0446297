// crates/netcourt-client/src/crawler.rs
// ============================================================================
// Module: Crawler Notary Flow
// Description: Token, crawl, and query calls on the generic notary platform.
// Purpose: Submit web pages for crawled evidence capture and poll results.
// Dependencies: netcourt-config, netcourt-core, serde_json
// ============================================================================

//! ## Overview
//! The crawler flow is asynchronous on the backend: `token` opens a
//! transaction, `crawl` submits a URL and returns a nonce, and `query` is
//! polled with that nonce until the capture reports `finish`.
//! Invariants:
//! - Timestamps use [`MillisStrategy::Round`] unless overridden.
//! - A capture that is not finished is [`QueryOutcome::Pending`], not an error.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcourt_config::NotaryConfig;
use netcourt_core::Business;
use netcourt_core::Identity;
use netcourt_core::MillisStrategy;
use netcourt_core::NotaryError;
use netcourt_core::RequestSigner;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;

use crate::client::ClientCore;
use crate::client::NotaryClient;
use crate::client::data_as_text;
use crate::envelope::BodyEnvelope;
use crate::envelope::NotaryResponse;
use crate::telemetry::NotaryFlow;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default crawler platform host.
pub const CRAWLER_DEFAULT_HOST: &str = "https://cz.tech.antfin.com";
/// Token endpoint.
pub const API_TOKEN: &str = "/api/notaryToken";
/// Crawl submission endpoint.
pub const API_CRAWL: &str = "/api/crawlerNotary";
/// Crawl result endpoint.
pub const API_QUERY: &str = "/api/crawlerNotaryGet";
/// Phase sent with a crawl unless the caller overrides it.
pub const DEFAULT_CRAWL_PHASE: &str = "step_2_crawl";
/// Status reported by a completed capture.
const FINISHED_STATUS: &str = "finish";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Artifacts of a completed capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlResult {
    /// Location of the screenshot archive.
    pub file_uri: String,
    /// Hash of the screenshot archive.
    pub file_hash: String,
    /// Blockchain transaction hash.
    pub block_hash: String,
}

/// Result of polling a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// Capture still in progress.
    Pending,
    /// Capture completed.
    Finished(CrawlResult),
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Client for the crawler evidence flow.
#[derive(Debug)]
pub struct CrawlerClient {
    /// Shared client state.
    core: ClientCore,
}

impl CrawlerClient {
    /// Builds a client against the default crawler host.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when `private_key` is present
    /// but empty or invalid.
    pub fn new(
        account_id: impl Into<String>,
        private_key: Option<&[u8]>,
        entity: Option<Identity>,
    ) -> Result<Self, NotaryError> {
        let signer = private_key.map(RequestSigner::from_pem).transpose()?;
        Ok(Self {
            core: ClientCore::new(
                NotaryFlow::Crawler,
                CRAWLER_DEFAULT_HOST,
                MillisStrategy::Round,
                account_id,
                signer,
                entity,
            ),
        })
    }

    /// Builds a client from validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the key or entity is invalid.
    pub fn from_config(config: &NotaryConfig) -> Result<Self, NotaryError> {
        Ok(Self {
            core: ClientCore::from_config(
                NotaryFlow::Crawler,
                CRAWLER_DEFAULT_HOST,
                MillisStrategy::Round,
                config,
            )?,
        })
    }

    /// Opens an evidence transaction and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] on invalid identities, signing failures, or a
    /// rejected request.
    pub fn token(
        &self,
        customer: &Identity,
        business: &Business,
        properties: Option<&str>,
    ) -> Result<String, NotaryError> {
        let body = self.core.token_payload(customer, business, properties)?;
        let response = self.send(API_TOKEN, &body)?;
        data_as_text(&response)
    }

    /// Submits `url` for capture and returns the polling nonce.
    ///
    /// Pass `None` for `phase` to use [`DEFAULT_CRAWL_PHASE`].
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] on signing failures, a rejected request, or a
    /// reply without a nonce.
    pub fn crawl(&self, token: &str, url: &str, phase: Option<&str>) -> Result<String, NotaryError> {
        let timestamp = self.core.timestamp();
        let signed = self.core.sign(url, timestamp)?;
        let account_id = self.core.account_id();
        let body = json!({
            "url": url,
            "accountId": account_id,
            "timestamp": timestamp,
            "meta": {
                "token": token,
                "phase": phase.unwrap_or(DEFAULT_CRAWL_PHASE),
                "accountId": account_id,
            },
            "signedData": signed,
        });
        let response = self.send(API_CRAWL, &body)?;
        let data = decode_response_data(&response).unwrap_or_default();
        match data.get("nonce") {
            Some(Value::String(nonce)) if !nonce.is_empty() => Ok(nonce.clone()),
            Some(Value::Number(nonce)) => Ok(nonce.to_string()),
            _ => Err(NotaryError::BadResponse {
                message: "crawl response is missing nonce".to_string(),
                status: response.status,
                code: response.code,
            }),
        }
    }

    /// Polls a capture by nonce.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] on signing failures, a rejected request, or a
    /// finished capture missing any artifact field.
    pub fn query(&self, nonce: &str) -> Result<QueryOutcome, NotaryError> {
        let timestamp = self.core.timestamp();
        let signed = self.core.sign(nonce, timestamp)?;
        let body = json!({
            "accountId": self.core.account_id(),
            "timestamp": timestamp,
            "nonce": nonce,
            "signedData": signed,
        });
        let response = self.send(API_QUERY, &body)?;
        let Some(data) = decode_response_data(&response) else {
            return Ok(QueryOutcome::Pending);
        };
        if data.get("status").and_then(Value::as_str) != Some(FINISHED_STATUS) {
            return Ok(QueryOutcome::Pending);
        }
        let field = |key: &str| -> Result<String, NotaryError> {
            data.get(key).and_then(Value::as_str).map(str::to_string).ok_or_else(|| {
                NotaryError::BadResponse {
                    message: format!("finished capture is missing {key}"),
                    status: response.status,
                    code: response.code.clone(),
                }
            })
        };
        Ok(QueryOutcome::Finished(CrawlResult {
            file_uri: field("screenshotZip")?,
            file_hash: field("zipHash")?,
            block_hash: field("txHash")?,
        }))
    }

    /// Posts through the body envelope and raises rejections.
    fn send(&self, endpoint: &'static str, body: &Value) -> Result<NotaryResponse, NotaryError> {
        self.core.post(endpoint, body, &BodyEnvelope)?.into_result()
    }
}

impl NotaryClient for CrawlerClient {
    fn core(&self) -> &ClientCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ClientCore {
        &mut self.core
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes `responseData`, which the platform sends as a JSON string.
fn decode_response_data(response: &NotaryResponse) -> Option<Map<String, Value>> {
    let decoded = match response.data.as_ref()? {
        Value::String(text) => serde_json::from_str::<Value>(text).ok()?,
        other => other.clone(),
    };
    match decoded {
        Value::Object(map) => Some(map),
        _ => None,
    }
}
