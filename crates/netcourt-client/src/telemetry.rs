// crates/netcourt-client/src/telemetry.rs
// ============================================================================
// Module: NetCourt Telemetry
// Description: Metric hooks for notary requests.
// Purpose: Provide request and latency events without hard metrics deps.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A thin metrics interface for notary request counters and latencies.
//! Deployments plug in their own sink; the default discards everything.
//! Events carry labels only, never payloads, keys, or signatures.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Protocol flow that issued a request.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotaryFlow {
    /// Crawler evidence flow on the generic notarization platform.
    Crawler,
    /// Judicial blockchain flow with header-encoded envelopes.
    Blockchain,
    /// Judicial blockchain flow with certificate-URL envelopes.
    CertUrl,
}

impl NotaryFlow {
    /// Returns a stable label for the flow.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Crawler => "crawler",
            Self::Blockchain => "blockchain",
            Self::CertUrl => "cert_url",
        }
    }
}

/// Request outcome classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotaryOutcome {
    /// Backend accepted the request.
    Ok,
    /// Backend rejected the request.
    Rejected,
    /// No usable reply was received.
    NetworkError,
}

impl NotaryOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Rejected => "rejected",
            Self::NetworkError => "network_error",
        }
    }
}

/// Notary request metric event payload.
///
/// # Invariants
/// - `status` is `None` when no HTTP reply was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotaryMetricEvent {
    /// Flow that issued the request.
    pub flow: NotaryFlow,
    /// Endpoint path.
    pub endpoint: &'static str,
    /// Request outcome.
    pub outcome: NotaryOutcome,
    /// HTTP status when a reply was received.
    pub status: Option<u16>,
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Metrics sink for notary requests and latencies.
pub trait NotaryMetrics: Send + Sync {
    /// Records a request counter event.
    fn record_request(&self, event: NotaryMetricEvent);
    /// Records a latency observation for the request.
    fn record_latency(&self, event: NotaryMetricEvent, latency: Duration);
}

/// No-op metrics sink.
pub struct NoopMetrics;

impl NotaryMetrics for NoopMetrics {
    fn record_request(&self, _event: NotaryMetricEvent) {}

    fn record_latency(&self, _event: NotaryMetricEvent, _latency: Duration) {}
}
