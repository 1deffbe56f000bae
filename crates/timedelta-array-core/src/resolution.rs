//! Physical time units for raw duration counts.
//!
//! A [`Resolution`] says what one raw `i64` count means. The set is closed
//! (seconds, milliseconds, microseconds, nanoseconds) and totally ordered by
//! granularity, with nanoseconds as the finest unit: `Second < Nanosecond`.
//! Combining two operands always happens at the finer of their resolutions.
use std::{fmt, str::FromStr};

use arrow::datatypes::TimeUnit;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::error::{DurationError, LossyConversionSnafu, OverflowSnafu};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Unit represented by one raw count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Resolution {
    /// One count is one second.
    #[serde(rename = "s")]
    Second,
    /// One count is one millisecond.
    #[serde(rename = "ms")]
    Millisecond,
    /// One count is one microsecond.
    #[serde(rename = "us")]
    Microsecond,
    /// One count is one nanosecond.
    #[serde(rename = "ns")]
    Nanosecond,
}

impl Resolution {
    /// All resolutions, coarsest first.
    pub const ALL: [Resolution; 4] = [
        Resolution::Second,
        Resolution::Millisecond,
        Resolution::Microsecond,
        Resolution::Nanosecond,
    ];

    /// Number of nanoseconds in one count of this resolution.
    pub const fn scale_to_ns(self) -> i64 {
        match self {
            Resolution::Second => 1_000_000_000,
            Resolution::Millisecond => 1_000_000,
            Resolution::Microsecond => 1_000,
            Resolution::Nanosecond => 1,
        }
    }

    /// Number of counts of this resolution in one second.
    pub const fn per_second(self) -> i64 {
        NANOS_PER_SECOND / self.scale_to_ns()
    }

    /// Short code used in diagnostics and serialized metadata.
    pub const fn code(self) -> &'static str {
        match self {
            Resolution::Second => "s",
            Resolution::Millisecond => "ms",
            Resolution::Microsecond => "us",
            Resolution::Nanosecond => "ns",
        }
    }

    /// The finer (higher-precision) of two resolutions.
    pub fn finer(self, other: Resolution) -> Resolution {
        self.max(other)
    }

    /// Rescale a raw count from `from` to `to` without losing information.
    ///
    /// Upcasts multiply and fail with `Overflow` if the result leaves `i64`
    /// or hits the NaT sentinel. Downcasts require exact divisibility and fail
    /// with `LossyConversion` otherwise. The sentinel itself is not special
    /// here; callers handle NaT before converting.
    pub fn convert(value: i64, from: Resolution, to: Resolution) -> Result<i64, DurationError> {
        if from == to {
            return Ok(value);
        }

        if to > from {
            let factor = from.scale_to_ns() / to.scale_to_ns();
            value
                .checked_mul(factor)
                .filter(|v| *v != i64::MIN)
                .context(OverflowSnafu {
                    what: format!("conversion of {value} from {from} to {to}"),
                })
        } else {
            let factor = to.scale_to_ns() / from.scale_to_ns();
            ensure!(
                value % factor == 0,
                LossyConversionSnafu { value, from, to }
            );
            Ok(value / factor)
        }
    }

    /// The equivalent arrow [`TimeUnit`].
    pub fn to_arrow_time_unit(self) -> TimeUnit {
        match self {
            Resolution::Second => TimeUnit::Second,
            Resolution::Millisecond => TimeUnit::Millisecond,
            Resolution::Microsecond => TimeUnit::Microsecond,
            Resolution::Nanosecond => TimeUnit::Nanosecond,
        }
    }

    /// Map an arrow [`TimeUnit`] onto a resolution.
    pub fn from_arrow_time_unit(unit: &TimeUnit) -> Self {
        match unit {
            TimeUnit::Second => Resolution::Second,
            TimeUnit::Millisecond => Resolution::Millisecond,
            TimeUnit::Microsecond => Resolution::Microsecond,
            TimeUnit::Nanosecond => Resolution::Nanosecond,
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors produced when parsing a resolution code such as `ms`.
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseResolutionError {
    /// The input was empty or only whitespace.
    #[snafu(display("resolution is empty"))]
    Empty,

    /// The input did not name a supported unit.
    #[snafu(display("unknown resolution '{input}' (expected s|ms|us|ns)"))]
    Unknown {
        /// The original input.
        input: String,
    },
}

impl FromStr for Resolution {
    type Err = ParseResolutionError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let spec = input.trim();
        ensure!(!spec.is_empty(), EmptySnafu);

        match spec.to_ascii_lowercase().as_str() {
            "s" | "sec" | "second" | "seconds" => Ok(Resolution::Second),
            "ms" | "milli" | "millisecond" | "milliseconds" => Ok(Resolution::Millisecond),
            "us" | "micro" | "microsecond" | "microseconds" => Ok(Resolution::Microsecond),
            "ns" | "nano" | "nanosecond" | "nanoseconds" => Ok(Resolution::Nanosecond),
            _ => UnknownSnafu { input: spec }.fail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_factors_match_units() {
        assert_eq!(Resolution::Second.scale_to_ns(), 1_000_000_000);
        assert_eq!(Resolution::Millisecond.scale_to_ns(), 1_000_000);
        assert_eq!(Resolution::Microsecond.scale_to_ns(), 1_000);
        assert_eq!(Resolution::Nanosecond.scale_to_ns(), 1);
        assert_eq!(Resolution::Millisecond.per_second(), 1_000);
    }

    #[test]
    fn ordering_is_by_granularity() {
        assert!(Resolution::Second < Resolution::Millisecond);
        assert!(Resolution::Microsecond < Resolution::Nanosecond);
        assert_eq!(
            Resolution::Second.finer(Resolution::Microsecond),
            Resolution::Microsecond
        );
        let mut all = Resolution::ALL;
        all.reverse();
        all.sort();
        assert_eq!(all, Resolution::ALL);
    }

    #[test]
    fn convert_upcast_and_exact_downcast() {
        assert_eq!(
            Resolution::convert(3, Resolution::Second, Resolution::Nanosecond),
            Ok(3_000_000_000)
        );
        assert_eq!(
            Resolution::convert(5_000, Resolution::Microsecond, Resolution::Millisecond),
            Ok(5)
        );
        assert_eq!(
            Resolution::convert(-7, Resolution::Millisecond, Resolution::Millisecond),
            Ok(-7)
        );
    }

    #[test]
    fn convert_rejects_overflow_and_precision_loss() {
        let err = Resolution::convert(i64::MAX / 10, Resolution::Second, Resolution::Millisecond)
            .unwrap_err();
        assert!(matches!(err, DurationError::Overflow { .. }));

        let err = Resolution::convert(1_500, Resolution::Millisecond, Resolution::Second)
            .unwrap_err();
        assert!(matches!(err, DurationError::LossyConversion { value: 1_500, .. }));
    }

    #[test]
    fn parse_and_display_round_trip() {
        for r in Resolution::ALL {
            assert_eq!(r.to_string().parse::<Resolution>(), Ok(r));
        }
        assert_eq!(" Seconds ".parse::<Resolution>(), Ok(Resolution::Second));
        assert_eq!("".parse::<Resolution>(), Err(ParseResolutionError::Empty));
        assert!(matches!(
            "fortnight".parse::<Resolution>(),
            Err(ParseResolutionError::Unknown { .. })
        ));
    }

    #[test]
    fn arrow_time_unit_mapping_is_one_to_one() {
        for r in Resolution::ALL {
            assert_eq!(Resolution::from_arrow_time_unit(&r.to_arrow_time_unit()), r);
        }
    }

    #[test]
    fn serde_uses_short_codes() {
        let json = serde_json::to_string(&Resolution::Microsecond).unwrap();
        assert_eq!(json, "\"us\"");
        let back: Resolution = serde_json::from_str("\"ms\"").unwrap();
        assert_eq!(back, Resolution::Millisecond);
    }
}
