// crates/netcourt-core/src/signing.rs
// ============================================================================
// Module: NetCourt Request Signing
// Description: Canonical signing-string construction and SHA-256 signatures.
// Purpose: Produce the `signedData` field every backend verifies.
// Dependencies: openssl, hex, crate::error
// ============================================================================

//! ## Overview
//! Every request carries `signedData`, the lowercase hex encoding of a
//! SHA-256 private-key signature over `accountId ++ content ++ timestamp`.
//! Invariants:
//! - The canonical string has no separators and no escaping.
//! - Signing is deterministic for deterministic key types (RSA PKCS#1 v1.5).
//! - Key material is never rendered by `Debug`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::fs;
use std::path::Path;

use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::pkey::Private;
use openssl::sign::Signer;

use crate::error::NotaryError;

// ============================================================================
// SECTION: Canonical String
// ============================================================================

/// Builds the canonical string signed for a request.
///
/// # Errors
///
/// Returns [`NotaryError::InvalidArgument`] when the account id and content
/// are empty and the timestamp is zero.
pub fn canonical_string(
    account_id: &str,
    content: &str,
    timestamp: u64,
) -> Result<String, NotaryError> {
    if account_id.is_empty() && content.is_empty() && timestamp == 0 {
        return Err(NotaryError::InvalidArgument("Sign data must be not empty!".to_string()));
    }
    Ok(format!("{account_id}{content}{timestamp}"))
}

// ============================================================================
// SECTION: Signer
// ============================================================================

/// Private-key signer for request envelopes.
#[derive(Clone)]
pub struct RequestSigner {
    /// Parsed private key.
    key: PKey<Private>,
}

impl RequestSigner {
    /// Parses a PEM-encoded private key.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the content is empty or is
    /// not a private key.
    pub fn from_pem(pem: &[u8]) -> Result<Self, NotaryError> {
        if pem.iter().all(u8::is_ascii_whitespace) {
            return Err(NotaryError::InvalidArgument(
                "Set private key failed, content can't be empty!".to_string(),
            ));
        }
        let key = PKey::private_key_from_pem(pem).map_err(|err| {
            NotaryError::InvalidArgument(format!("private key parse failed: {err}"))
        })?;
        Ok(Self {
            key,
        })
    }

    /// Reads and parses a PEM-encoded private key file.
    ///
    /// An unreadable file is reported the same way as empty content.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the file is unreadable,
    /// empty, or not a private key.
    pub fn from_file(path: &Path) -> Result<Self, NotaryError> {
        let pem = fs::read(path).unwrap_or_default();
        Self::from_pem(&pem)
    }

    /// Signs `account_id ++ content ++ timestamp` and returns lowercase hex.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::InvalidArgument`] when the canonical string is
    /// empty or the signature cannot be produced.
    pub fn sign(
        &self,
        account_id: &str,
        content: &str,
        timestamp: u64,
    ) -> Result<String, NotaryError> {
        let message = canonical_string(account_id, content, timestamp)?;
        let signature = self.sign_bytes(message.as_bytes())?;
        Ok(hex::encode(signature))
    }

    /// Produces a raw SHA-256 signature over `data`.
    fn sign_bytes(&self, data: &[u8]) -> Result<Vec<u8>, NotaryError> {
        let mut signer = Signer::new(MessageDigest::sha256(), &self.key)
            .map_err(|err| NotaryError::InvalidArgument(format!("signer init failed: {err}")))?;
        signer
            .update(data)
            .map_err(|err| NotaryError::InvalidArgument(format!("signing failed: {err}")))?;
        signer
            .sign_to_vec()
            .map_err(|err| NotaryError::InvalidArgument(format!("signing failed: {err}")))
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").field("key", &"<redacted>").finish()
    }
}
