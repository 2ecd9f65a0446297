// crates/netcourt-config/src/lib.rs
// ============================================================================
// Module: NetCourt Config Library
// Description: Canonical config model and validation for notary clients.
// Purpose: Single source of truth for netcourt.toml semantics.
// Dependencies: netcourt-core, serde, toml
// ============================================================================

//! ## Overview
//! `netcourt-config` defines the configuration model shared by every notary
//! client: account id, signing key source, host override, timeout, clock
//! strategy, and an optional filer identity. Validation is strict and fails
//! closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CONFIG_ENV_VAR;
pub use config::ConfigError;
pub use config::DEFAULT_TIMEOUT_SECS;
pub use config::EnterpriseConfig;
pub use config::EntityConfig;
pub use config::NotaryConfig;
pub use config::PersonConfig;
