//! Ordered search over sorted duration arrays.
//!
//! Keys are compared as exact nanoseconds, so needles at any resolution can
//! be located without conversion loss. NaT sorts after every other value,
//! matching the order a stable sort of the buffer with NaT last would give.
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::{
    array::{DurationArray, incompatible_value},
    duration::{Duration, NAT},
    error::Result,
    value::Value,
};

/// Which insertion point to report among equal keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// First position where the needle could be inserted.
    #[default]
    Left,
    /// Last position where the needle could be inserted.
    Right,
}

/// Insertion points for a scalar or sequence of needles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchResult {
    /// Result for a scalar needle.
    Scalar(usize),
    /// One position per needle, in input order.
    Array(Vec<usize>),
}

impl SearchResult {
    /// The scalar position, if this is a scalar result.
    pub fn as_scalar(&self) -> Option<usize> {
        match self {
            SearchResult::Scalar(pos) => Some(*pos),
            SearchResult::Array(_) => None,
        }
    }
}

fn sort_key(duration: Duration) -> i128 {
    duration.to_nanos().unwrap_or(i128::MAX)
}

fn timedelta_key(delta: TimeDelta) -> i128 {
    delta.num_seconds() as i128 * 1_000_000_000 + delta.subsec_nanos() as i128
}

impl DurationArray {
    fn insertion_point(&self, needle: i128, side: Side) -> usize {
        let keys = |raw: &i64| {
            if *raw == NAT {
                i128::MAX
            } else {
                *raw as i128 * self.resolution.scale_to_ns() as i128
            }
        };
        match side {
            Side::Left => self.values.partition_point(|v| keys(v) < needle),
            Side::Right => self.values.partition_point(|v| keys(v) <= needle),
        }
    }

    /// Positions at which `value` would be inserted to keep the array
    /// sorted. The array is assumed sorted ascending with NaT last.
    ///
    /// Accepts a duration scalar, NaT, a `chrono::TimeDelta`, a list of
    /// durations or another duration array. Any other operand fails with
    /// `IncompatibleType`.
    pub fn searchsorted(&self, value: &Value, side: Side) -> Result<SearchResult> {
        let point = |key| self.insertion_point(key, side);
        match value {
            Value::NaT => Ok(SearchResult::Scalar(point(i128::MAX))),
            Value::Duration(d) => Ok(SearchResult::Scalar(point(sort_key(*d)))),
            Value::TimeDelta(td) => Ok(SearchResult::Scalar(point(timedelta_key(*td)))),
            Value::Durations(items) => Ok(SearchResult::Array(
                items.iter().map(|d| point(sort_key(*d))).collect(),
            )),
            Value::DurationArray(other) => Ok(SearchResult::Array(
                other.iter().map(|d| point(sort_key(d))).collect(),
            )),
            other => Err(incompatible_value(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datetime::Timestamp, error::DurationError, resolution::Resolution};

    fn sorted_seconds() -> DurationArray {
        DurationArray::from_buffer(vec![1, 2, 2, 5, NAT], Resolution::Second)
    }

    #[test]
    fn scalar_left_and_right() {
        let arr = sorted_seconds();
        let needle = Value::Duration(Duration::from_raw(2, Resolution::Second));
        assert_eq!(arr.searchsorted(&needle, Side::Left).unwrap(), SearchResult::Scalar(1));
        assert_eq!(arr.searchsorted(&needle, Side::Right).unwrap(), SearchResult::Scalar(3));
    }

    #[test]
    fn needles_at_other_resolutions_compare_exactly() {
        let arr = sorted_seconds();
        let needle = Value::Duration(Duration::from_raw(2_000_000_001, Resolution::Nanosecond));
        assert_eq!(arr.searchsorted(&needle, Side::Left).unwrap().as_scalar(), Some(3));

        let td = Value::TimeDelta(TimeDelta::milliseconds(4_999));
        assert_eq!(arr.searchsorted(&td, Side::Right).unwrap().as_scalar(), Some(3));
    }

    #[test]
    fn nat_sorts_last() {
        let arr = sorted_seconds();
        assert_eq!(arr.searchsorted(&Value::NaT, Side::Left).unwrap().as_scalar(), Some(4));
        assert_eq!(arr.searchsorted(&Value::NaT, Side::Right).unwrap().as_scalar(), Some(5));
    }

    #[test]
    fn sequence_needles() {
        let arr = sorted_seconds();
        let needles = DurationArray::from_buffer(vec![0, 3_000, 9_000], Resolution::Millisecond);
        assert_eq!(
            arr.searchsorted(&Value::DurationArray(needles), Side::Left).unwrap(),
            SearchResult::Array(vec![0, 3, 4])
        );
    }

    #[test]
    fn rejects_non_duration_needles() {
        let arr = sorted_seconds();
        let bad = [
            Value::Int(1),
            Value::Float(1.0),
            Value::from("foo"),
            Value::Timestamp(Timestamp::from_raw(0, Resolution::Second)),
            Value::DateTimeNaT(Resolution::Nanosecond),
            Value::IntArray(vec![1, 2]),
        ];
        for needle in &bad {
            let err = arr.searchsorted(needle, Side::Left).unwrap_err();
            assert!(matches!(err, DurationError::IncompatibleType { .. }), "{needle:?}");
            assert!(err.to_string().contains("value should be a 'Duration'"));
        }
    }
}
