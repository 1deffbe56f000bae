//! Regular step metadata for duration arrays.
//!
//! A [`Frequency`] records that consecutive elements of an array differ by a
//! fixed step (for example "every hour"). It is metadata only: nothing in the
//! engine relies on it for correctness, but every operation that may break the
//! step pattern must drop it.
//!
//! Frequencies are parsed from short aliases (`H`, `2h`, `-1H`, `15min`,
//! `D`, `S`, `L`/`ms`, `U`/`us`, `N`/`ns`). A missing number means 1.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{
    error::{DurationError, LossyConversionSnafu, OverflowSnafu},
    resolution::Resolution,
};

/// Calendar-agnostic unit of a frequency step. Every unit has a fixed length
/// in nanoseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencyUnit {
    /// 24 hours.
    Day,
    /// 60 minutes.
    Hour,
    /// 60 seconds.
    Minute,
    /// One second.
    Second,
    /// One millisecond.
    Milli,
    /// One microsecond.
    Micro,
    /// One nanosecond.
    Nano,
}

impl FrequencyUnit {
    /// Length of one unit in nanoseconds.
    pub const fn nanos(self) -> i64 {
        match self {
            FrequencyUnit::Day => 86_400_000_000_000,
            FrequencyUnit::Hour => 3_600_000_000_000,
            FrequencyUnit::Minute => 60_000_000_000,
            FrequencyUnit::Second => 1_000_000_000,
            FrequencyUnit::Milli => 1_000_000,
            FrequencyUnit::Micro => 1_000,
            FrequencyUnit::Nano => 1,
        }
    }

    fn alias(self) -> &'static str {
        match self {
            FrequencyUnit::Day => "D",
            FrequencyUnit::Hour => "h",
            FrequencyUnit::Minute => "min",
            FrequencyUnit::Second => "s",
            FrequencyUnit::Milli => "ms",
            FrequencyUnit::Micro => "us",
            FrequencyUnit::Nano => "ns",
        }
    }

    /// Coarsest resolution holding one unit as a whole count.
    fn native_resolution(self) -> Resolution {
        match self {
            FrequencyUnit::Milli => Resolution::Millisecond,
            FrequencyUnit::Micro => Resolution::Microsecond,
            FrequencyUnit::Nano => Resolution::Nanosecond,
            _ => Resolution::Second,
        }
    }
}

/// A step of `n` units between consecutive elements. `n` is never zero and
/// may be negative (a descending sequence).
///
/// Serialized as its alias string (`"1h"`, `"-2D"`); deserialization goes
/// through [`FromStr`] and rejects a zero multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    n: i64,
    unit: FrequencyUnit,
}

impl Frequency {
    /// Build a frequency of `n` units. Returns `None` when `n == 0`.
    pub fn new(n: i64, unit: FrequencyUnit) -> Option<Self> {
        (n != 0).then_some(Self { n, unit })
    }

    /// One hour.
    pub fn hourly() -> Self {
        Self {
            n: 1,
            unit: FrequencyUnit::Hour,
        }
    }

    /// One day.
    pub fn daily() -> Self {
        Self {
            n: 1,
            unit: FrequencyUnit::Day,
        }
    }

    /// Signed multiple of the unit.
    pub fn n(&self) -> i64 {
        self.n
    }

    /// Step unit.
    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// The same step in the opposite direction.
    pub fn negate(&self) -> Self {
        Self {
            n: -self.n,
            unit: self.unit,
        }
    }

    /// Exact step length in nanoseconds.
    pub fn step_nanos(&self) -> i128 {
        self.n as i128 * self.unit.nanos() as i128
    }

    /// Step length expressed as a raw count at `resolution`.
    ///
    /// Fails with `LossyConversion` when the step is finer than the
    /// resolution (for example a 1ms step on a seconds array) and with
    /// `Overflow` when it does not fit in `i64`. Only sub-second units can be
    /// lossy; the error reports the multiple in the step's own unit.
    pub fn step_in(&self, resolution: Resolution) -> Result<i64, DurationError> {
        let scale = resolution.scale_to_ns() as i128;
        let nanos = self.step_nanos();
        ensure!(
            nanos % scale == 0,
            LossyConversionSnafu {
                value: self.n,
                from: self.unit.native_resolution(),
                to: resolution,
            }
        );
        i64::try_from(nanos / scale).ok().context(OverflowSnafu {
            what: format!("step of frequency {self} at {resolution}"),
        })
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.n, self.unit.alias())
    }
}

impl TryFrom<String> for Frequency {
    type Error = ParseFrequencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(freq: Frequency) -> Self {
        freq.to_string()
    }
}

/// Errors produced when parsing a frequency alias (e.g. `2H`).
#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum ParseFrequencyError {
    /// The input was empty or only whitespace.
    #[snafu(display("frequency spec is empty"))]
    Empty,

    /// The input had a number but no unit alias.
    #[snafu(display("frequency spec '{spec}' is missing a unit alias"))]
    MissingUnit {
        /// The original spec string.
        spec: String,
    },

    /// The numeric multiple failed to parse.
    #[snafu(display("invalid frequency multiple in '{spec}': {source}"))]
    InvalidNumber {
        /// The original spec string.
        spec: String,
        /// The parse error returned by `i64::from_str`.
        source: std::num::ParseIntError,
    },

    /// The multiple was zero.
    #[snafu(display("frequency multiple must be non-zero in '{spec}'"))]
    Zero {
        /// The original spec string.
        spec: String,
    },

    /// The alias is not a fixed-length unit this engine understands.
    #[snafu(display("unknown frequency alias '{unit}' in '{spec}'"))]
    UnknownUnit {
        /// The original spec string.
        spec: String,
        /// The unrecognized alias.
        unit: String,
    },
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let spec = input.trim();
        ensure!(!spec.is_empty(), EmptySnafu);

        let unit_start = spec
            .char_indices()
            .find(|(_, c)| c.is_ascii_alphabetic())
            .map(|(i, _)| i)
            .context(MissingUnitSnafu { spec })?;

        let (num_str, unit_str) = spec.split_at(unit_start);
        let num_str = num_str.trim();

        let n: i64 = match num_str {
            "" | "+" => 1,
            "-" => -1,
            digits => digits
                .parse()
                .context(InvalidNumberSnafu { spec })?,
        };
        ensure!(n != 0, ZeroSnafu { spec });

        // Single-letter aliases are case sensitive ("M" is not minutes).
        let unit = match unit_str.trim() {
            "D" | "d" | "day" | "days" => FrequencyUnit::Day,
            "H" | "h" | "hour" | "hours" => FrequencyUnit::Hour,
            "T" | "min" | "minute" | "minutes" => FrequencyUnit::Minute,
            "S" | "s" | "sec" | "second" | "seconds" => FrequencyUnit::Second,
            "L" | "ms" => FrequencyUnit::Milli,
            "U" | "us" => FrequencyUnit::Micro,
            "N" | "ns" => FrequencyUnit::Nano,
            other => {
                return UnknownUnitSnafu { spec, unit: other }.fail();
            }
        };

        Ok(Self { n, unit })
    }
}
