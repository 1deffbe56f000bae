//! Dynamically-typed operands for arithmetic, search and assignment.
//!
//! Array operations that accept "something duration-like" take a [`Value`].
//! The set of variants is closed: each operation matches on it explicitly and
//! rejects the variants it does not support with `IncompatibleType`.
use chrono::TimeDelta;

use crate::{
    array::DurationArray,
    datetime::{Timestamp, TimestampArray},
    duration::Duration,
    frequency::Frequency,
    resolution::Resolution,
};

/// A fixed-frequency span of calendar time (for example, the day
/// 2021-01-01). Only used as an operand kind that duration arrays reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Periods since the epoch at `freq`.
    pub ordinal: i64,
    /// Span of one period.
    pub freq: Frequency,
}

/// Any operand an array operation may be handed.
#[derive(Debug, Clone)]
pub enum Value {
    /// Plain integer.
    Int(i64),
    /// Plain float.
    Float(f64),
    /// Arbitrary string.
    Str(String),
    /// Untyped missing value; behaves as a duration NaT.
    NaT,
    /// Missing absolute time at a resolution.
    DateTimeNaT(Resolution),
    /// Duration scalar (may itself be NaT).
    Duration(Duration),
    /// `chrono` duration.
    TimeDelta(TimeDelta),
    /// Absolute time point.
    Timestamp(Timestamp),
    /// Calendar period.
    Period(Period),
    /// Sequence of durations.
    Durations(Vec<Duration>),
    /// Duration array.
    DurationArray(DurationArray),
    /// Absolute time array.
    TimestampArray(TimestampArray),
    /// Plain integer array.
    IntArray(Vec<i64>),
}

impl Value {
    /// Short name of the operand kind for diagnostics.
    pub fn kind_name(&self) -> String {
        match self {
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::NaT => "NaT".to_string(),
            Value::DateTimeNaT(r) => format!("datetime[{r}] NaT"),
            Value::Duration(d) => format!("Duration[{}]", d.resolution()),
            Value::TimeDelta(_) => "TimeDelta".to_string(),
            Value::Timestamp(t) => format!("Timestamp[{}]", t.resolution()),
            Value::Period(p) => format!("Period[{}]", p.freq),
            Value::Durations(_) => "list of Duration".to_string(),
            Value::DurationArray(a) => format!("DurationArray[{}]", a.resolution()),
            Value::TimestampArray(a) => format!("TimestampArray[{}]", a.resolution()),
            Value::IntArray(_) => "int64 array".to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Duration> for Value {
    fn from(v: Duration) -> Self {
        Value::Duration(v)
    }
}

impl From<TimeDelta> for Value {
    fn from(v: TimeDelta) -> Self {
        Value::TimeDelta(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Timestamp(v)
    }
}

impl From<Period> for Value {
    fn from(v: Period) -> Self {
        Value::Period(v)
    }
}

impl From<Vec<Duration>> for Value {
    fn from(v: Vec<Duration>) -> Self {
        Value::Durations(v)
    }
}

impl From<DurationArray> for Value {
    fn from(v: DurationArray) -> Self {
        Value::DurationArray(v)
    }
}

impl From<TimestampArray> for Value {
    fn from(v: TimestampArray) -> Self {
        Value::TimestampArray(v)
    }
}
