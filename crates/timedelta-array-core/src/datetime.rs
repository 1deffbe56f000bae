//! Minimal absolute-time counterpart for duration arithmetic.
//!
//! [`Timestamp`] and [`TimestampArray`] count units since the Unix epoch at a
//! [`Resolution`], with the same `i64::MIN` NaT sentinel as durations. They
//! only carry what duration arithmetic needs: shifting by a duration, an
//! all-missing constructor and a resolution tag. Calendar and timezone logic
//! stays with `chrono`.
use std::sync::Arc;

use arrow::array::{
    ArrayRef, TimestampMicrosecondArray, TimestampMillisecondArray, TimestampNanosecondArray,
    TimestampSecondArray,
};
use chrono::{DateTime, Utc};
use snafu::prelude::*;

use crate::{
    duration::{Duration, NAT},
    error::{OverflowSnafu, Result},
    resolution::Resolution,
};

/// A point in time as `value` units since the Unix epoch, or NaT.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    value: i64,
    resolution: Resolution,
}

impl Timestamp {
    /// Wrap a raw count without validation.
    pub const fn from_raw(value: i64, resolution: Resolution) -> Self {
        Self { value, resolution }
    }

    /// NaT tagged with `resolution`.
    pub const fn nat(resolution: Resolution) -> Self {
        Self {
            value: NAT,
            resolution,
        }
    }

    /// Raw count since the epoch.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Resolution tag.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// `true` iff this is NaT.
    pub fn is_nat(&self) -> bool {
        self.value == NAT
    }

    /// Shift by `delta`. Both sides are promoted to the finer resolution;
    /// NaT on either side gives NaT at that resolution.
    pub fn add(self, delta: Duration) -> Result<Timestamp> {
        let target = self.resolution.finer(delta.resolution());
        if self.is_nat() || delta.is_nat() {
            return Ok(Self::nat(target));
        }
        let base = Resolution::convert(self.value, self.resolution, target)?;
        let step = delta.as_resolution(target)?.value();
        base.checked_add(step)
            .filter(|v| *v != NAT)
            .map(|v| Self::from_raw(v, target))
            .context(OverflowSnafu {
                what: "timestamp shift",
            })
    }

    /// Convert `dt` to a raw count at `resolution`. Sub-unit precision must
    /// be zero.
    pub fn from_datetime(dt: DateTime<Utc>, resolution: Resolution) -> Result<Self> {
        let secs = Resolution::convert(dt.timestamp(), Resolution::Second, resolution)?;
        let sub = Resolution::convert(
            dt.timestamp_subsec_nanos() as i64,
            Resolution::Nanosecond,
            resolution,
        )?;
        secs.checked_add(sub)
            .map(|v| Self::from_raw(v, resolution))
            .context(OverflowSnafu {
                what: format!("timestamp {dt} at {resolution}"),
            })
    }

    /// The equivalent UTC datetime; `None` for NaT or out-of-range values.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        if self.is_nat() {
            return None;
        }
        let per_second = self.resolution.per_second();
        let secs = self.value.div_euclid(per_second);
        let nanos = self.value.rem_euclid(per_second) * self.resolution.scale_to_ns();
        DateTime::from_timestamp(secs, nanos as u32)
    }
}

/// Owned column of timestamps sharing one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampArray {
    values: Vec<i64>,
    resolution: Resolution,
}

impl TimestampArray {
    /// Take ownership of a raw buffer.
    pub fn from_buffer(values: Vec<i64>, resolution: Resolution) -> Self {
        Self { values, resolution }
    }

    /// `len` NaT values at `resolution`.
    pub fn all_missing(len: usize, resolution: Resolution) -> Self {
        Self {
            values: vec![NAT; len],
            resolution,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// `true` when the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolution shared by every element.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// Raw counts, NaT included.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<Timestamp> {
        self.values
            .get(index)
            .map(|v| Timestamp::from_raw(*v, self.resolution))
    }

    /// Missing mask.
    pub fn is_na(&self) -> Vec<bool> {
        self.values.iter().map(|v| *v == NAT).collect()
    }

    /// Arrow timestamp array (no timezone) with NaT mapped to null.
    pub fn to_arrow(&self) -> ArrayRef {
        let opts = self.values.iter().map(|v| (*v != NAT).then_some(*v));
        match self.resolution {
            Resolution::Second => Arc::new(opts.collect::<TimestampSecondArray>()),
            Resolution::Millisecond => Arc::new(opts.collect::<TimestampMillisecondArray>()),
            Resolution::Microsecond => Arc::new(opts.collect::<TimestampMicrosecondArray>()),
            Resolution::Nanosecond => Arc::new(opts.collect::<TimestampNanosecondArray>()),
        }
    }
}
