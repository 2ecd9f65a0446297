// crates/netcourt-core/src/lib.rs
// ============================================================================
// Module: NetCourt Core Library
// Description: Value objects, signing, and errors for NetCourt notary clients.
// Purpose: Provide backend-independent building blocks for signed requests.
// Dependencies: openssl, hex, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! `netcourt-core` holds everything a notary request is made of before it
//! touches the network: identities, business and location descriptors, the
//! canonical signing primitive, and the per-backend millisecond clocks.
//! Invariants:
//! - Value objects validate at set-time or at serialization, never silently.
//! - Signatures cover `accountId ++ content ++ timestamp` with SHA-256.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod business;
pub mod error;
pub mod identity;
pub mod location;
pub mod signing;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use business::BizKind;
pub use business::Business;
pub use business::SubBiz;
pub use error::NETWORK_ERROR_CODE;
pub use error::NETWORK_ERROR_MESSAGE;
pub use error::NETWORK_FAILURE_STATUS;
pub use error::NotaryError;
pub use identity::Enterprise;
pub use identity::EnterpriseCertType;
pub use identity::Identity;
pub use identity::Person;
pub use location::Location;
pub use location::LocationInfo;
pub use signing::RequestSigner;
pub use signing::canonical_string;
pub use time::MillisStrategy;

#[cfg(test)]
mod tests;
