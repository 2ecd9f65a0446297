// crates/netcourt-client/src/cert_url.rs
// ============================================================================
// Module: Judicial Certificate-URL Flow
// Description: Token and certificate calls returning certificate URLs.
// Purpose: Notarize content and retrieve the issued certificate.
// Dependencies: netcourt-config, netcourt-core, serde_json
// ============================================================================

//! ## Overview
//! This variant of the judicial platform answers in the body and, on
//! success, points at the issued certificate through a `Certurl` header.
//! Certificate calls hand back the full [`NotaryResponse`] so callers can
//! inspect the code and download the certificate.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;

use netcourt_config::NotaryConfig;
use netcourt_core::Business;
use netcourt_core::Identity;
use netcourt_core::Location;
use netcourt_core::MillisStrategy;
use netcourt_core::NotaryError;
use netcourt_core::RequestSigner;

use crate::blockchain::API_NOTARY_TOKEN;
use crate::blockchain::JUDICIAL_DEFAULT_HOST;
use crate::certificate::download_cert_with;
use crate::client::ClientCore;
use crate::client::NotaryClient;
use crate::client::data_as_text;
use crate::envelope::CertUrlEnvelope;
use crate::envelope::NotaryResponse;
use crate::telemetry::NotaryFlow;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Certificate endpoint for certificate-URL replies.
pub const API_NOTARY_CERT_URL: &str = "/api/blockChain/notaryCertUrl";

// ============================================================================
// SECTION: Client
// ============================================================================

/// Client for the judicial blockchain platform with certificate-URL envelopes.
#[derive(Debug)]
pub struct CertUrlClient {
    /// Shared client state.
    core: ClientCore,
}

impl CertUrlClient {
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
                NotaryFlow::CertUrl,
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
                NotaryFlow::CertUrl,
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
    /// rejected request carrying the backend code.
    pub fn create_notary_token(
        &self,
        customer: &Identity,
        business: &Business,
        properties: Option<&str>,
    ) -> Result<String, NotaryError> {
        let body = self.core.token_payload(customer, business, properties)?;
        let response = self.core.post(API_NOTARY_TOKEN, &body, &CertUrlEnvelope)?.into_result()?;
        data_as_text(&response)
    }

    /// Notarizes one phase of a transaction.
    ///
    /// Backend rejections and network failures are returned as an
    /// unsuccessful [`NotaryResponse`].
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] only for invalid identities, signing failures,
    /// or an invalid host.
    pub fn create_notary_cert(
        &self,
        token: &str,
        phase: &str,
        content: Option<&str>,
        location: Option<&Location>,
        properties: Option<&str>,
    ) -> Result<NotaryResponse, NotaryError> {
        let body = self.core.cert_payload(token, phase, content, location, properties)?;
        self.core.post(API_NOTARY_CERT_URL, &body, &CertUrlEnvelope)
    }

    /// Downloads the certificate of `response` through this client's transport.
    ///
    /// Returns `None` when the response was rejected or carries no URL.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] when the name is unusable, the download fails,
    /// or the file cannot be written.
    pub fn download_cert(
        &self,
        response: &NotaryResponse,
        dir: &Path,
        name: Option<&str>,
    ) -> Result<Option<PathBuf>, NotaryError> {
        if !response.success || response.cert_url.is_none() {
            return Ok(None);
        }
        let transport = self.core.transport()?;
        download_cert_with(response, transport.as_ref(), dir, name)
    }
}

impl NotaryClient for CertUrlClient {
    fn core(&self) -> &ClientCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ClientCore {
        &mut self.core
    }
}
