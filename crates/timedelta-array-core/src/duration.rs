//! Scalar durations tagged with a resolution.
//!
//! A [`Duration`] is one signed 64-bit count of [`Resolution`] units. The bit
//! pattern `i64::MIN` is reserved as NaT ("not-a-time") and is recognized by
//! value. Legitimate arithmetic never produces it: a result that would land on
//! the sentinel is reported as `Overflow`.
//!
//! Binary operations on scalars require equal resolutions; use
//! [`Duration::align`] to promote two operands to the finer of their
//! resolutions first.
use std::cmp::Ordering;

use chrono::TimeDelta;
use snafu::prelude::*;

use crate::{
    datetime::Timestamp,
    error::{IncompatibleResolutionSnafu, InvalidOperationSnafu, OverflowSnafu, Result},
    resolution::Resolution,
};

/// Reserved raw value for NaT.
pub const NAT: i64 = i64::MIN;

const NANOS_PER_DAY: i128 = 86_400_000_000_000;
const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_MICRO: i128 = 1_000;

/// A signed elapsed time of `value` units at `resolution`, or NaT.
#[derive(Debug, Clone, Copy)]
pub struct Duration {
    value: i64,
    resolution: Resolution,
}

/// Calendar-agnostic decomposition of a duration.
///
/// Buckets are computed by floor division from exact nanoseconds: `days`
/// carries the sign and the remaining fields are non-negative. For example
/// `-1ns` is `-1 day + 86399 s + 999999 us + 999 ns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationFields {
    /// Whole days (may be negative).
    pub days: i64,
    /// Seconds within the day, `0..86_400`.
    pub seconds: i64,
    /// Microseconds within the second, `0..1_000_000`.
    pub microseconds: i64,
    /// Nanoseconds within the microsecond, `0..1_000`.
    pub nanoseconds: i64,
}

fn checked_nanos(n: i64, per_unit: i64, unit: &str) -> Result<Duration> {
    n.checked_mul(per_unit)
        .filter(|v| *v != NAT)
        .map(|v| Duration::from_raw(v, Resolution::Nanosecond))
        .context(OverflowSnafu {
            what: format!("{n} {unit} at nanosecond resolution"),
        })
}

impl Duration {
    /// Wrap a raw count without validation. `i64::MIN` yields NaT.
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

    /// `n` days at nanosecond resolution.
    pub fn days(n: i64) -> Result<Self> {
        checked_nanos(n, 86_400_000_000_000, "days")
    }

    /// `n` hours at nanosecond resolution.
    pub fn hours(n: i64) -> Result<Self> {
        checked_nanos(n, 3_600_000_000_000, "hours")
    }

    /// `n` minutes at nanosecond resolution.
    pub fn minutes(n: i64) -> Result<Self> {
        checked_nanos(n, 60_000_000_000, "minutes")
    }

    /// `n` seconds at nanosecond resolution.
    pub fn seconds(n: i64) -> Result<Self> {
        checked_nanos(n, 1_000_000_000, "seconds")
    }

    /// `n` milliseconds at nanosecond resolution.
    pub fn milliseconds(n: i64) -> Result<Self> {
        checked_nanos(n, 1_000_000, "milliseconds")
    }

    /// `n` microseconds at nanosecond resolution.
    pub fn microseconds(n: i64) -> Result<Self> {
        checked_nanos(n, 1_000, "microseconds")
    }

    /// `n` nanoseconds. Fails only for the reserved sentinel.
    pub fn nanoseconds(n: i64) -> Result<Self> {
        checked_nanos(n, 1, "nanoseconds")
    }

    /// Raw count in `self.resolution()` units.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Resolution tag.
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    /// `true` iff this is the NaT sentinel.
    pub fn is_nat(&self) -> bool {
        self.value == NAT
    }

    /// Exact nanoseconds, or `None` for NaT.
    pub fn to_nanos(&self) -> Option<i128> {
        (!self.is_nat()).then(|| self.value as i128 * self.resolution.scale_to_ns() as i128)
    }

    /// Convert losslessly to `resolution`. NaT converts to NaT.
    pub fn as_resolution(&self, resolution: Resolution) -> Result<Self> {
        if self.is_nat() {
            return Ok(Self::nat(resolution));
        }
        let value = Resolution::convert(self.value, self.resolution, resolution)?;
        Ok(Self::from_raw(value, resolution))
    }

    /// Promote both operands to the finer of their resolutions.
    pub fn align(a: Duration, b: Duration) -> Result<(Duration, Duration)> {
        let target = a.resolution.finer(b.resolution);
        Ok((a.as_resolution(target)?, b.as_resolution(target)?))
    }

    /// Decompose into day/second/microsecond/nanosecond buckets.
    pub fn to_fields(&self) -> Result<DurationFields> {
        let total = self.to_nanos().context(InvalidOperationSnafu {
            operation: "field extraction",
        })?;

        let days = total.div_euclid(NANOS_PER_DAY);
        let rem = total.rem_euclid(NANOS_PER_DAY);

        Ok(DurationFields {
            days: days as i64,
            seconds: (rem / NANOS_PER_SECOND) as i64,
            microseconds: ((rem % NANOS_PER_SECOND) / NANOS_PER_MICRO) as i64,
            nanoseconds: (rem % NANOS_PER_MICRO) as i64,
        })
    }

    /// Total length in seconds as a float; NaN for NaT.
    pub fn to_total_seconds(&self) -> f64 {
        if self.is_nat() {
            return f64::NAN;
        }
        self.value as f64 / self.resolution.per_second() as f64
    }

    /// Sum of two durations at the same resolution.
    ///
    /// NaT on either side yields NaT without checking for overflow.
    pub fn add(self, other: Duration) -> Result<Duration> {
        ensure!(
            self.resolution == other.resolution,
            IncompatibleResolutionSnafu {
                left: self.resolution,
                right: other.resolution,
            }
        );
        if self.is_nat() || other.is_nat() {
            return Ok(Self::nat(self.resolution));
        }
        checked_raw(
            self.value.checked_add(other.value),
            self.resolution,
            "duration addition",
        )
    }

    /// Difference of two durations at the same resolution.
    pub fn sub(self, other: Duration) -> Result<Duration> {
        ensure!(
            self.resolution == other.resolution,
            IncompatibleResolutionSnafu {
                left: self.resolution,
                right: other.resolution,
            }
        );
        if self.is_nat() || other.is_nat() {
            return Ok(Self::nat(self.resolution));
        }
        checked_raw(
            self.value.checked_sub(other.value),
            self.resolution,
            "duration subtraction",
        )
    }

    /// Shift an absolute time point by this duration.
    ///
    /// The result carries the finer of the two resolutions.
    pub fn add_absolute(self, anchor: Timestamp) -> Result<Timestamp> {
        anchor.add(self)
    }

    /// Sign flip. NaT stays NaT.
    pub fn negate(self) -> Result<Duration> {
        if self.is_nat() {
            return Ok(self);
        }
        checked_raw(self.value.checked_neg(), self.resolution, "duration negation")
    }

    /// Magnitude. NaT stays NaT.
    pub fn abs(self) -> Result<Duration> {
        if self.is_nat() {
            return Ok(self);
        }
        checked_raw(self.value.checked_abs(), self.resolution, "duration abs")
    }

    /// Unary plus: the value unchanged, NaT included.
    pub fn to_positive(self) -> Duration {
        self
    }

    /// Convert to a [`chrono::TimeDelta`]; `Ok(None)` for NaT.
    pub fn to_timedelta(&self) -> Result<Option<TimeDelta>> {
        if self.is_nat() {
            return Ok(None);
        }
        let per_second = self.resolution.per_second();
        let secs = self.value.div_euclid(per_second);
        let sub = self.value.rem_euclid(per_second) * self.resolution.scale_to_ns();
        TimeDelta::new(secs, sub as u32)
            .map(Some)
            .context(OverflowSnafu {
                what: format!("conversion of {} {} to TimeDelta", self.value, self.resolution),
            })
    }

    /// Build a nanosecond duration from a [`chrono::TimeDelta`].
    pub fn from_timedelta(delta: TimeDelta) -> Result<Self> {
        let nanos = delta.num_nanoseconds().filter(|v| *v != NAT).context(OverflowSnafu {
            what: "TimeDelta to nanoseconds",
        })?;
        Ok(Self::from_raw(nanos, Resolution::Nanosecond))
    }
}

fn checked_raw(value: Option<i64>, resolution: Resolution, what: &str) -> Result<Duration> {
    value
        .filter(|v| *v != NAT)
        .map(|v| Duration::from_raw(v, resolution))
        .context(OverflowSnafu { what })
}

impl PartialEq for Duration {
    /// Durations compare by the span they represent, across resolutions.
    /// NaT is unequal to everything, itself included.
    fn eq(&self, other: &Self) -> bool {
        match (self.to_nanos(), other.to_nanos()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl PartialOrd for Duration {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self.to_nanos(), other.to_nanos()) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => None,
        }
    }
}
