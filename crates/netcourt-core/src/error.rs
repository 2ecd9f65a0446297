// crates/netcourt-core/src/error.rs
// ============================================================================
// Module: NetCourt Errors
// Description: Error taxonomy shared by value objects, signing, and clients.
// Purpose: Give callers one failure surface per notary operation.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`NotaryError`] covers validation failures raised at the point of misuse,
//! identity serialization failures, and normalized backend failures.
//! Invariants:
//! - Validation errors are raised synchronously and never coerced.
//! - Transport failures are reported as [`NotaryError::BadResponse`] with
//!   [`NETWORK_FAILURE_STATUS`] and [`NETWORK_ERROR_CODE`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Code reported when the backend supplied none or the network failed.
pub const NETWORK_ERROR_CODE: &str = "NETWORK_ERROR";

/// Message reported when the backend supplied none or the network failed.
pub const NETWORK_ERROR_MESSAGE: &str = "http post failed, please check your host or network";

/// HTTP-equivalent status used to tag network failures.
pub const NETWORK_FAILURE_STATUS: u16 = 500;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors emitted by NetCourt notary operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotaryError {
    /// Malformed or missing argument, or invalid client configuration.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Identity serialized with a missing backend-required field.
    #[error("invalid identity property: {0}")]
    InvalidIdentityProperty(String),
    /// Backend rejected the request or could not be reached.
    #[error("bad response ({status}): {message}")]
    BadResponse {
        /// Backend message or the fixed fallback message.
        message: String,
        /// HTTP status, or [`NETWORK_FAILURE_STATUS`] for network failures.
        status: u16,
        /// Backend code when one was supplied.
        code: Option<String>,
    },
    /// Local file persistence failed.
    #[error("io error: {0}")]
    Io(String),
}

impl NotaryError {
    /// Builds the failure used for transport and unparseable-envelope errors.
    #[must_use]
    pub fn network_failure() -> Self {
        Self::BadResponse {
            message: NETWORK_ERROR_MESSAGE.to_string(),
            status: NETWORK_FAILURE_STATUS,
            code: Some(NETWORK_ERROR_CODE.to_string()),
        }
    }

    /// Returns true when the error is a network-tagged bad response.
    #[must_use]
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            Self::BadResponse { status, code: Some(code), .. }
                if *status == NETWORK_FAILURE_STATUS && code == NETWORK_ERROR_CODE
        )
    }
}
