//! Binary arithmetic between duration arrays and other operands.
//!
//! The right-hand side is a [`Value`]; each variant has a fixed result kind:
//!
//! | operand                    | `add` result                              |
//! |----------------------------|-------------------------------------------|
//! | `NaT`, duration NaT        | all-NaT `DurationArray`, array resolution |
//! | `DateTimeNaT`, NaT stamp   | all-NaT `TimestampArray`, array resolution|
//! | `Duration`, `TimeDelta`    | `DurationArray`, finer resolution         |
//! | `DurationArray`, list      | `DurationArray`, finer resolution         |
//! | `Timestamp`                | `TimestampArray`, finer resolution        |
//! | `TimestampArray`           | `TimestampArray`, finer resolution        |
//! | anything else              | `IncompatibleType`                        |
//!
//! The all-missing cases keep the array's own resolution regardless of the
//! operand's.
use snafu::prelude::*;

use crate::{
    array::{DurationArray, rescale_buffer},
    datetime::{Timestamp, TimestampArray},
    duration::{Duration, NAT},
    error::{IncompatibleTypeSnafu, LengthMismatchSnafu, OverflowSnafu, Result},
    resolution::Resolution,
    value::Value,
};

/// Result of array arithmetic: durations, or absolute times when an absolute
/// operand was involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArithOutput {
    /// Duration result.
    Durations(DurationArray),
    /// Absolute-time result.
    Timestamps(TimestampArray),
}

impl ArithOutput {
    /// Resolution of the result.
    pub fn resolution(&self) -> Resolution {
        match self {
            ArithOutput::Durations(a) => a.resolution(),
            ArithOutput::Timestamps(a) => a.resolution(),
        }
    }

    /// `true` when every element is missing.
    pub fn is_all_missing(&self) -> bool {
        match self {
            ArithOutput::Durations(a) => a.is_na().into_iter().all(|na| na),
            ArithOutput::Timestamps(a) => a.is_na().into_iter().all(|na| na),
        }
    }

    /// The duration result, if this is one.
    pub fn into_durations(self) -> Option<DurationArray> {
        match self {
            ArithOutput::Durations(a) => Some(a),
            ArithOutput::Timestamps(_) => None,
        }
    }

    /// The absolute-time result, if this is one.
    pub fn into_timestamps(self) -> Option<TimestampArray> {
        match self {
            ArithOutput::Timestamps(a) => Some(a),
            ArithOutput::Durations(_) => None,
        }
    }
}

#[derive(Clone, Copy)]
enum Op {
    Add,
    Sub,
}

impl Op {
    fn apply(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Op::Add => a.checked_add(b),
            Op::Sub => a.checked_sub(b),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Op::Add => "addition",
            Op::Sub => "subtraction",
        }
    }
}

/// Combine two equal-length raw buffers at the same resolution, NaT
/// absorbing.
fn combine(left: &[i64], right: &[i64], op: Op) -> Result<Vec<i64>> {
    left.iter()
        .zip(right)
        .map(|(&a, &b)| {
            if a == NAT || b == NAT {
                return Ok(NAT);
            }
            op.apply(a, b)
                .filter(|v| *v != NAT)
                .context(OverflowSnafu {
                    what: format!("elementwise {}", op.name()),
                })
        })
        .collect()
}

impl DurationArray {
    fn all_nat(&self) -> DurationArray {
        DurationArray::from_buffer(vec![NAT; self.len()], self.resolution())
    }

    /// Shift every element by a scalar. Keeps the frequency.
    fn shift(&self, delta: Duration, op: Op) -> Result<DurationArray> {
        if delta.is_nat() {
            return Ok(self.all_nat());
        }
        let target = self.resolution().finer(delta.resolution());
        let left = rescale_buffer(self.as_slice(), self.resolution(), target)?;
        let step = delta.as_resolution(target)?.value();
        let right = vec![step; left.len()];
        let values = combine(&left, &right, op)?;

        let mut out = DurationArray::from_buffer(values, target);
        out.freq = self.freq;
        Ok(out)
    }

    fn zip_with(&self, other: &DurationArray, op: Op) -> Result<DurationArray> {
        ensure!(
            self.len() == other.len(),
            LengthMismatchSnafu {
                left: self.len(),
                right: other.len(),
            }
        );
        let target = self.resolution().finer(other.resolution());
        let left = rescale_buffer(self.as_slice(), self.resolution(), target)?;
        let right = rescale_buffer(other.as_slice(), other.resolution(), target)?;
        Ok(DurationArray::from_buffer(combine(&left, &right, op)?, target))
    }

    fn shift_anchor(&self, anchor: Timestamp) -> Result<TimestampArray> {
        if anchor.is_nat() {
            return Ok(TimestampArray::all_missing(self.len(), self.resolution()));
        }
        let values = self
            .iter()
            .map(|d| anchor.add(d).map(|t| t.value()))
            .collect::<Result<Vec<_>>>()?;
        let target = self.resolution().finer(anchor.resolution());
        Ok(TimestampArray::from_buffer(values, target))
    }

    fn shift_anchors(&self, anchors: &TimestampArray) -> Result<TimestampArray> {
        ensure!(
            self.len() == anchors.len(),
            LengthMismatchSnafu {
                left: self.len(),
                right: anchors.len(),
            }
        );
        let target = self.resolution().finer(anchors.resolution());
        let values = self
            .iter()
            .zip(anchors.as_slice())
            .map(|(d, &t)| {
                Timestamp::from_raw(t, anchors.resolution())
                    .add(d)
                    .map(|t| t.value())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(TimestampArray::from_buffer(values, target))
    }

    /// `self + other`.
    pub fn add(&self, other: &Value) -> Result<ArithOutput> {
        let out = match other {
            Value::NaT => ArithOutput::Durations(self.all_nat()),
            Value::DateTimeNaT(_) => {
                ArithOutput::Timestamps(TimestampArray::all_missing(self.len(), self.resolution()))
            }
            Value::Duration(d) => ArithOutput::Durations(self.shift(*d, Op::Add)?),
            Value::TimeDelta(td) => {
                ArithOutput::Durations(self.shift(Duration::from_timedelta(*td)?, Op::Add)?)
            }
            Value::DurationArray(arr) => ArithOutput::Durations(self.zip_with(arr, Op::Add)?),
            Value::Durations(list) => {
                let arr = DurationArray::from_scalars(list)?;
                ArithOutput::Durations(self.zip_with(&arr, Op::Add)?)
            }
            Value::Timestamp(t) => ArithOutput::Timestamps(self.shift_anchor(*t)?),
            Value::TimestampArray(arr) => ArithOutput::Timestamps(self.shift_anchors(arr)?),
            other => {
                return IncompatibleTypeSnafu {
                    msg: format!(
                        "cannot add '{}' to DurationArray[{}]",
                        other.kind_name(),
                        self.resolution()
                    ),
                }
                .fail();
            }
        };
        Ok(out)
    }

    /// `other + self`. Addition is commutative, so this equals [`Self::add`].
    pub fn radd(&self, other: &Value) -> Result<ArithOutput> {
        self.add(other)
    }

    /// `self - other` for duration-kind operands.
    pub fn sub(&self, other: &Value) -> Result<DurationArray> {
        match other {
            Value::NaT => Ok(self.all_nat()),
            Value::Duration(d) => self.shift(*d, Op::Sub),
            Value::TimeDelta(td) => self.shift(Duration::from_timedelta(*td)?, Op::Sub),
            Value::DurationArray(arr) => self.zip_with(arr, Op::Sub),
            Value::Durations(list) => self.zip_with(&DurationArray::from_scalars(list)?, Op::Sub),
            other => IncompatibleTypeSnafu {
                msg: format!(
                    "cannot subtract '{}' from DurationArray[{}]",
                    other.kind_name(),
                    self.resolution()
                ),
            }
            .fail(),
        }
    }
}
