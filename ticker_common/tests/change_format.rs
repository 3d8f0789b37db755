//! Property tests for change formatting.

use proptest::prelude::*;
use ticker_common::instrument::{format_change, round_cents};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// The sign prefix always matches the sign of the rounded delta, with zero as `+`.
    #[test]
    fn sign_prefix_matches_rounded_delta(delta in -2.5f64..=2.5f64) {
        let change = format_change(delta);
        let rounded = round_cents(delta);
        if rounded >= 0.0 {
            prop_assert!(change.starts_with('+'), "{} -> {}", delta, change);
        } else {
            prop_assert!(change.starts_with('-'), "{} -> {}", delta, change);
        }
    }

    /// The numeric part parses back to the rounded delta and has two decimals.
    #[test]
    fn body_is_two_decimal_magnitude(delta in -2.5f64..=2.5f64) {
        let change = format_change(delta);
        let body = &change[1..];
        prop_assert_eq!(body.split('.').nth(1).map(str::len), Some(2));
        let parsed: f64 = change.parse().unwrap();
        prop_assert!((parsed - round_cents(delta)).abs() < 1e-9);
    }
}
