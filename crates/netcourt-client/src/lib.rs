// crates/netcourt-client/src/lib.rs
// ============================================================================
// Module: NetCourt Client Library
// Description: Signed request flows for NetCourt notary backends.
// Purpose: Submit evidence, poll results, and retrieve certificates.
// Dependencies: netcourt-config, netcourt-core, reqwest, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! `netcourt-client` implements the three backend protocol flows on top of a
//! shared [`ClientCore`]:
//! - [`CrawlerClient`]: `token`, `crawl`, and `query` on the generic platform.
//! - [`BlockchainClient`]: judicial platform with header-encoded envelopes.
//! - [`CertUrlClient`]: judicial platform with certificate-URL envelopes.
//!
//! Invariants:
//! - Each call is one blocking request/response cycle with no retries.
//! - Transport failures surface as network failures, never raw errors.
//! - Keys and signatures are never logged.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod blockchain;
pub mod cert_url;
pub mod certificate;
pub mod client;
pub mod crawler;
pub mod envelope;
pub mod telemetry;
pub mod transport;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use blockchain::BlockchainClient;
pub use blockchain::CertReceipt;
pub use cert_url::CertUrlClient;
pub use certificate::download_cert_with;
pub use client::ClientCore;
pub use client::NotaryClient;
pub use crawler::CrawlResult;
pub use crawler::CrawlerClient;
pub use crawler::QueryOutcome;
pub use envelope::BodyEnvelope;
pub use envelope::CertUrlEnvelope;
pub use envelope::HeaderJsonEnvelope;
pub use envelope::NotaryResponse;
pub use envelope::ResponseEnvelope;
pub use telemetry::NoopMetrics;
pub use telemetry::NotaryFlow;
pub use telemetry::NotaryMetricEvent;
pub use telemetry::NotaryMetrics;
pub use telemetry::NotaryOutcome;
pub use transport::HttpReply;
pub use transport::HttpTransport;
pub use transport::Transport;
pub use transport::TransportError;
