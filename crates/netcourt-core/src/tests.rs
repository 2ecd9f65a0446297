// crates/netcourt-core/src/tests.rs
// ============================================================================
// Module: Core Unit Tests
// Description: Unit tests for timestamp strategies and canonical strings.
// Purpose: Pin the arithmetic that backends verify signatures against.
// Dependencies: netcourt-core
// ============================================================================

//! ## Overview
//! Test-only lint relaxations plus focused checks on millisecond derivation.

// ============================================================================
// SECTION: Lint Configuration
// ============================================================================

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use crate::MillisStrategy;
use crate::NotaryError;
use crate::canonical_string;

// ============================================================================
// SECTION: Timestamp Strategies
// ============================================================================

#[test]
fn truncate_keeps_first_three_fraction_digits() {
    assert_eq!(MillisStrategy::Truncate.combine(1_700_000_000, 123_999), 1_700_000_000_123);
    assert_eq!(MillisStrategy::Truncate.combine(1_700_000_000, 999), 1_700_000_000_000);
}

#[test]
fn round_rounds_to_nearest_millisecond() {
    assert_eq!(MillisStrategy::Round.combine(1_700_000_000, 123_600), 1_700_000_000_124);
    assert_eq!(MillisStrategy::Round.combine(1_700_000_000, 123_400), 1_700_000_000_123);
}

#[test]
fn strategies_agree_on_whole_milliseconds() {
    for micros in [0, 1_000, 500_000, 999_000] {
        assert_eq!(
            MillisStrategy::Truncate.combine(1_600_000_000, micros),
            MillisStrategy::Round.combine(1_600_000_000, micros)
        );
    }
}

#[test]
fn round_carries_into_next_second() {
    assert_eq!(MillisStrategy::Round.combine(10, 999_900), 11_000);
    assert_eq!(MillisStrategy::Truncate.combine(10, 999_900), 10_999);
}

#[test]
fn now_is_monotonic_at_millisecond_granularity() {
    for strategy in [MillisStrategy::Truncate, MillisStrategy::Round] {
        let first = strategy.now();
        let second = strategy.now();
        assert!(second >= first);
        // Thirteen decimal digits for any date between 2001 and 2286.
        assert_eq!(first.to_string().len(), 13);
    }
}

// ============================================================================
// SECTION: Canonical String
// ============================================================================

#[test]
fn canonical_string_concatenates_without_separators() {
    assert_eq!(canonical_string("acct", "1", 1_700_000_000_123).unwrap(), "acct11700000000123");
}

#[test]
fn canonical_string_rejects_fully_empty_input() {
    let err = canonical_string("", "", 0).unwrap_err();
    assert!(matches!(err, NotaryError::InvalidArgument(_)));
}

#[test]
fn canonical_string_accepts_zero_timestamp_with_content() {
    assert_eq!(canonical_string("", "x", 0).unwrap(), "x0");
}
