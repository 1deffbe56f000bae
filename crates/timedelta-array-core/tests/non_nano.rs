//! Behavior of arrays stored at second, millisecond and microsecond resolution.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use arrow::array::Array;
use chrono::TimeDelta;
use timedelta_array_core::{
    array::ArithOutput,
    datetime::Timestamp,
    duration::NAT,
    value::Value,
    Duration, DurationArray, Resolution,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const COARSE: [Resolution; 3] = [
    Resolution::Second,
    Resolution::Millisecond,
    Resolution::Microsecond,
];

fn seconds_at(resolution: Resolution) -> DurationArray {
    let scale = resolution.per_second();
    DurationArray::from_buffer((0..5).map(|s| s * scale).collect(), resolution)
}

fn nanos_reference() -> DurationArray {
    seconds_at(Resolution::Nanosecond)
}

#[test]
fn fields_match_nanosecond_reference() -> TestResult {
    let expected = nanos_reference();
    for resolution in COARSE {
        let arr = seconds_at(resolution);
        assert_eq!(arr.resolution(), resolution);
        assert_eq!(arr.days(), expected.days());
        assert_eq!(arr.seconds(), expected.seconds());
        assert_eq!(arr.microseconds(), expected.microseconds());
        assert_eq!(arr.nanoseconds(), expected.nanoseconds());
    }

    let arr = seconds_at(Resolution::Second);
    assert_eq!(arr.seconds().values().to_vec(), vec![0, 1, 2, 3, 4]);
    assert!(arr.days().values().iter().all(|d| *d == 0));
    Ok(())
}

#[test]
fn fields_of_negative_values_floor() -> TestResult {
    let arr = DurationArray::from_buffer(vec![-1_500, NAT], Resolution::Millisecond);
    assert_eq!(arr.days().value(0), -1);
    assert_eq!(arr.seconds().value(0), 86_398);
    assert_eq!(arr.microseconds().value(0), 500_000);
    assert_eq!(arr.nanoseconds().value(0), 0);
    assert!(arr.days().is_null(1));
    Ok(())
}

#[test]
fn total_seconds_is_resolution_independent() -> TestResult {
    let expected = nanos_reference().total_seconds();
    for resolution in COARSE {
        assert_eq!(seconds_at(resolution).total_seconds(), expected);
    }

    let with_nat = DurationArray::from_buffer(vec![1_500, NAT], Resolution::Millisecond);
    let out = with_nat.total_seconds();
    assert_eq!(out.value(0), 1.5);
    assert!(out.value(1).is_nan());
    Ok(())
}

#[test]
fn to_timedeltas_is_resolution_independent() -> TestResult {
    let expected: Vec<_> = (0..5).map(|s| Some(TimeDelta::seconds(s))).collect();
    assert_eq!(nanos_reference().to_timedeltas()?, expected);
    for resolution in COARSE {
        assert_eq!(seconds_at(resolution).to_timedeltas()?, expected);
    }
    Ok(())
}

#[test]
fn add_nat_is_all_missing_at_array_resolution() -> TestResult {
    for resolution in COARSE {
        let arr = seconds_at(resolution);
        let nat = Value::Duration(Duration::nat(Resolution::Nanosecond));

        let left = arr.add(&nat)?;
        let right = arr.radd(&nat)?;
        assert_eq!(left, right);
        assert_eq!(left.resolution(), resolution);
        assert!(left.is_all_missing());

        let untyped = arr.add(&Value::NaT)?.into_durations().unwrap();
        assert_eq!(untyped.resolution(), resolution);
        assert_eq!(untyped.len(), 5);
        assert!(untyped.is_na().into_iter().all(|na| na));
    }
    Ok(())
}

#[test]
fn add_datetime_nat_yields_missing_timestamps() -> TestResult {
    for resolution in COARSE {
        let arr = seconds_at(resolution);
        let nat = Value::DateTimeNaT(Resolution::Nanosecond);

        let left = arr.add(&nat)?;
        assert_eq!(left, arr.radd(&nat)?);
        match left {
            ArithOutput::Timestamps(ts) => {
                assert_eq!(ts.resolution(), resolution);
                assert_eq!(ts.len(), 5);
                assert_eq!(ts.to_arrow().null_count(), 5);
            }
            other => panic!("expected timestamps, got {other:?}"),
        }
    }
    Ok(())
}

#[test]
fn add_timestamp_promotes_to_finer_resolution() -> TestResult {
    let arr = seconds_at(Resolution::Second);
    let anchor = Timestamp::from_raw(1_000, Resolution::Millisecond);
    let out = arr.add(&Value::Timestamp(anchor))?.into_timestamps().unwrap();
    assert_eq!(out.resolution(), Resolution::Millisecond);
    assert_eq!(out.as_slice(), &[1_000, 2_000, 3_000, 4_000, 5_000]);
    Ok(())
}
