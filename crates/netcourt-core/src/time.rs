// crates/netcourt-core/src/time.rs
// ============================================================================
// Module: NetCourt Request Timestamps
// Description: Millisecond timestamps embedded in signed requests.
// Purpose: Reproduce each backend's millisecond derivation from seconds + micros.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Backends verify `signedData` against the decimal timestamp they receive, so
//! the millisecond value must be derived the way each backend's reference
//! client does it. Both strategies start from whole seconds and sub-second
//! microseconds and differ only in how the sub-second part is folded in.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Strategy
// ============================================================================

/// Millisecond derivation used by a protocol flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MillisStrategy {
    /// Keeps the first three digits of the sub-second fraction.
    #[default]
    Truncate,
    /// Rounds `(seconds + fraction) * 1000` in floating point.
    Round,
}

impl MillisStrategy {
    /// Returns the current unix time in milliseconds.
    #[must_use]
    pub fn now(self) -> u64 {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        self.combine(elapsed.as_secs(), elapsed.subsec_micros())
    }

    /// Combines whole seconds and sub-second microseconds into milliseconds.
    #[must_use]
    pub fn combine(self, secs: u64, micros: u32) -> u64 {
        let micros = micros.min(999_999);
        match self {
            Self::Truncate => secs.saturating_mul(1000).saturating_add(u64::from(micros / 1000)),
            Self::Round => round_millis(secs, micros),
        }
    }

    /// Returns the lowercase label used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Truncate => "truncate",
            Self::Round => "round",
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Floating-point millisecond rounding.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Unix seconds stay far below 2^52, and the rounded value is non-negative."
)]
fn round_millis(secs: u64, micros: u32) -> u64 {
    let seconds = secs as f64 + f64::from(micros) / 1_000_000.0;
    (seconds * 1000.0).round() as u64
}
