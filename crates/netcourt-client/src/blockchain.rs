// crates/netcourt-client/src/blockchain.rs
// ============================================================================
// Module: Judicial Blockchain Flow
// Description: Token and certificate calls with header-encoded envelopes.
// Purpose: Notarize content on the judicial blockchain platform.
// Dependencies: netcourt-config, netcourt-core, serde_json
// ============================================================================

//! ## Overview
//! This backend answers in a `Blockchainresponse` header. Any reply that is
//! not a 200 with a parseable envelope is reported as a network failure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use netcourt_config::NotaryConfig;
use netcourt_core::Business;
use netcourt_core::Identity;
use netcourt_core::Location;
use netcourt_core::MillisStrategy;
use netcourt_core::NotaryError;
use netcourt_core::RequestSigner;
use serde_json::Value;

use crate::client::ClientCore;
use crate::client::NotaryClient;
use crate::client::data_as_text;
use crate::envelope::HeaderJsonEnvelope;
use crate::envelope::NotaryResponse;
use crate::telemetry::NotaryFlow;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default judicial blockchain host.
pub const JUDICIAL_DEFAULT_HOST: &str = "https://check.netcourt.gov.cn";
/// Token endpoint.
pub const API_NOTARY_TOKEN: &str = "/api/blockChain/notaryToken";
/// Certificate endpoint for header-encoded replies.
pub const API_NOTARY_CERT: &str = "/api/blockChain/notaryCert";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Accepted certificate request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertReceipt {
    /// Decoded `responseData`.
    pub data: Option<Value>,
    /// Raw reply body.
    pub raw_body: Vec<u8>,
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Client for the judicial blockchain platform with header-encoded envelopes.
#[derive(Debug)]
pub struct BlockchainClient {
    /// Shared client state.
    core: ClientCore,
}

impl BlockchainClient {
    /// Builds a client against the default judicial host.
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
                NotaryFlow::Blockchain,
                JUDICIAL_DEFAULT_HOST,
                MillisStrategy::Truncate,
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
                NotaryFlow::Blockchain,
                JUDICIAL_DEFAULT_HOST,
                MillisStrategy::Truncate,
                config,
            )?,
        })
    }

    /// Opens a notarization transaction and returns its token.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] on invalid identities, signing failures, or a
    /// rejected request.
    pub fn create_notary_token(
        &self,
        customer: &Identity,
        business: &Business,
        properties: Option<&str>,
    ) -> Result<String, NotaryError> {
        let body = self.core.token_payload(customer, business, properties)?;
        let response = self.send(API_NOTARY_TOKEN, &body)?;
        data_as_text(&response)
    }

    /// Notarizes one phase of a transaction.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] on invalid identities, signing failures, or a
    /// rejected request.
    pub fn create_notary_cert(
        &self,
        token: &str,
        phase: &str,
        content: Option<&str>,
        location: Option<&Location>,
        properties: Option<&str>,
    ) -> Result<CertReceipt, NotaryError> {
        let body = self.core.cert_payload(token, phase, content, location, properties)?;
        let response = self.send(API_NOTARY_CERT, &body)?;
        Ok(CertReceipt {
            data: response.data,
            raw_body: response.body,
        })
    }

    /// Posts through the header envelope and raises rejections.
    fn send(&self, endpoint: &'static str, body: &Value) -> Result<NotaryResponse, NotaryError> {
        self.core.post(endpoint, body, &HeaderJsonEnvelope)?.into_result()
    }
}

impl NotaryClient for BlockchainClient {
    fn core(&self) -> &ClientCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ClientCore {
        &mut self.core
    }
}
