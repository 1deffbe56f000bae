//! Property-based tests for duration array algebra.
//!
//! These tests verify laws that should hold for any array:
//! - Negation is an involution
//! - Absolute value is idempotent and resolution-preserving
//! - Field extraction does not depend on the storage resolution
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use timedelta_array_core::{DurationArray, Resolution, NAT};

fn arb_resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![
        Just(Resolution::Second),
        Just(Resolution::Millisecond),
        Just(Resolution::Microsecond),
        Just(Resolution::Nanosecond),
    ]
}

/// Raw values that are never `i64::MIN` (so negation cannot overflow),
/// with roughly one in ten replaced by NaT.
fn arb_raw() -> impl Strategy<Value = i64> {
    prop_oneof![
        9 => (i64::MIN + 1)..=i64::MAX,
        1 => Just(NAT),
    ]
}

/// Second counts small enough to be representable at nanosecond resolution.
fn arb_seconds() -> impl Strategy<Value = i64> {
    prop_oneof![
        9 => -9_000_000_000i64..9_000_000_000i64,
        1 => Just(NAT),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn double_negation_is_identity(
        values in prop::collection::vec(arb_raw(), 0..32),
        resolution in arb_resolution(),
    ) {
        let arr = DurationArray::from_buffer(values, resolution);
        let twice = arr.negate().unwrap().negate().unwrap();
        prop_assert_eq!(twice.as_slice(), arr.as_slice());
        prop_assert_eq!(twice.resolution(), resolution);
    }

    #[test]
    fn abs_is_idempotent(
        values in prop::collection::vec(arb_raw(), 0..32),
        resolution in arb_resolution(),
    ) {
        let arr = DurationArray::from_buffer(values, resolution);
        let once = arr.abs().unwrap();
        let twice = once.abs().unwrap();
        prop_assert_eq!(once.resolution(), resolution);
        prop_assert_eq!(&once, &twice);
        prop_assert!(once.as_slice().iter().all(|v| *v == NAT || *v >= 0));
        prop_assert_eq!(once.is_na(), arr.is_na());
    }

    #[test]
    fn fields_are_resolution_transparent(
        seconds in prop::collection::vec(arb_seconds(), 0..16),
        resolution in arb_resolution(),
    ) {
        let coarse = DurationArray::from_buffer(seconds, Resolution::Second);
        let scaled = coarse.as_resolution(resolution).unwrap();

        prop_assert_eq!(coarse.days(), scaled.days());
        prop_assert_eq!(coarse.seconds(), scaled.seconds());
        prop_assert_eq!(coarse.microseconds(), scaled.microseconds());
        prop_assert_eq!(coarse.nanoseconds(), scaled.nanoseconds());
        prop_assert_eq!(coarse.to_timedeltas().unwrap(), scaled.to_timedeltas().unwrap());
    }
}
