//! Columnar duration arrays.
//!
//! A [`DurationArray`] owns a contiguous `Vec<i64>` of raw counts that share
//! one [`Resolution`], plus an optional [`Frequency`] annotation. NaT is the
//! `i64::MIN` sentinel in the buffer.
//!
//! Ownership rules:
//! - Every producing operation (unary ops, arithmetic, casts, field
//!   extraction) allocates a fresh buffer. No two arrays share storage.
//! - [`DurationArray::as_slice`] is the only view into the buffer and is
//!   read-only.
//! - [`DurationArray::set`] is the single mutation entry point. It takes
//!   `&mut self`; the type is not internally synchronized.
//!
//! Frequency rules:
//! - `negate` propagates the negated frequency.
//! - `abs`, `positive` and elementwise array arithmetic drop it.
//! - Shifting by a scalar duration keeps it.
//! - `set` always clears it, even when the assigned value matches the step.
//!
//! The operation families live in submodules: arithmetic (`arith`), casts
//! (`cast`), ordered search (`search`) and arrow interop (`interop`).
use arrow::array::{Float64Array, Int64Array};
use chrono::TimeDelta;
use log::debug;
use snafu::prelude::*;

use crate::{
    duration::{Duration, DurationFields, NAT},
    error::{
        DurationError, FrequencyMismatchSnafu, IncompatibleResolutionSnafu, IncompatibleTypeSnafu,
        IndexOutOfBoundsSnafu, InvalidOperationSnafu, OverflowSnafu, Result,
    },
    frequency::Frequency,
    resolution::Resolution,
    value::Value,
};

pub mod arith;
pub mod cast;
pub mod interop;
pub mod search;

pub use arith::ArithOutput;
pub use cast::{Cast, CastArray, CastOptions, CastPolicy, CastTarget, CastWarning, IntegerKind};
pub use search::{SearchResult, Side};

/// Owned, resolution-tagged column of durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationArray {
    values: Vec<i64>,
    resolution: Resolution,
    freq: Option<Frequency>,
}

/// Diagnostic used when a value is not a duration, NaT, or a sequence of them.
pub(crate) fn incompatible_value(value: &Value) -> DurationError {
    IncompatibleTypeSnafu {
        msg: format!(
            "value should be a 'Duration', 'NaT', or array of those. Got '{}' instead.",
            value.kind_name()
        ),
    }
    .build()
}

/// Rescale a raw buffer to a finer or equal resolution, keeping NaT.
pub(crate) fn rescale_buffer(
    values: &[i64],
    from: Resolution,
    to: Resolution,
) -> Result<Vec<i64>> {
    values
        .iter()
        .map(|&v| {
            if v == NAT {
                Ok(NAT)
            } else {
                Resolution::convert(v, from, to)
            }
        })
        .collect()
}

impl DurationArray {
    /// Take ownership of a raw buffer at `resolution`. No range validation is
    /// performed; `i64::MIN` entries are NaT.
    pub fn from_buffer(values: Vec<i64>, resolution: Resolution) -> Self {
        Self {
            values,
            resolution,
            freq: None,
        }
    }

    /// Build an array from scalars, promoting every element to the finest
    /// resolution present. An empty input yields an empty nanosecond array.
    ///
    /// Fails with `IncompatibleResolution` when an element cannot be
    /// represented at the common resolution.
    pub fn from_scalars(scalars: &[Duration]) -> Result<Self> {
        let resolution = scalars
            .iter()
            .map(Duration::resolution)
            .max()
            .unwrap_or(Resolution::Nanosecond);

        let values = scalars
            .iter()
            .map(|d| {
                d.as_resolution(resolution)
                    .map(|d| d.value())
                    .map_err(|_| {
                        IncompatibleResolutionSnafu {
                            left: d.resolution(),
                            right: resolution,
                        }
                        .build()
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::from_buffer(values, resolution))
    }

    /// A regular sequence of `periods` values starting at `start` and stepping
    /// by `freq`, carrying `freq` as its annotation.
    pub fn range(start: Duration, periods: usize, freq: Frequency) -> Result<Self> {
        ensure!(
            !start.is_nat(),
            InvalidOperationSnafu {
                operation: "range construction",
            }
        );
        let resolution = start.resolution();
        let step = freq.step_in(resolution)?;
        let first = start.value();

        // Every element lies between the first and the last, so checking the
        // last one bounds the whole sequence.
        if let Some(last_index) = periods.checked_sub(1) {
            i64::try_from(last_index)
                .ok()
                .and_then(|i| i.checked_mul(step))
                .and_then(|offset| first.checked_add(offset))
                .filter(|v| *v != NAT)
                .context(OverflowSnafu {
                    what: format!("range of {periods} elements with step {freq}"),
                })?;
        }

        let mut values = Vec::new();
        values
            .try_reserve_exact(periods)
            .ok()
            .context(OverflowSnafu {
                what: format!("allocation of {periods} range elements"),
            })?;
        let mut current = first;
        for _ in 0..periods {
            values.push(current);
            current = current.wrapping_add(step);
        }

        Ok(Self {
            values,
            resolution,
            freq: Some(freq),
        })
    }

    /// Attach `freq` after checking that the data follows its step exactly.
    pub fn with_freq(mut self, freq: Frequency) -> Result<Self> {
        let step = freq.step_in(self.resolution)?;

        if let Some(pos) = self.values.iter().position(|v| *v == NAT) {
            debug!("rejecting frequency {freq}: NaT at position {pos}");
            return FrequencyMismatchSnafu {
                freq: freq.to_string(),
                position: pos,
            }
            .fail();
        }

        let mismatch = self
            .values
            .windows(2)
            .position(|w| w[1] as i128 - w[0] as i128 != step as i128);
        if let Some(pos) = mismatch {
            debug!("rejecting frequency {freq}: step broken at position {}", pos + 1);
            return FrequencyMismatchSnafu {
                freq: freq.to_string(),
                position: pos + 1,
            }
            .fail();
        }

        self.freq = Some(freq);
        Ok(self)
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

    /// Frequency annotation, if any.
    pub fn freq(&self) -> Option<Frequency> {
        self.freq
    }

    /// Read-only view of the raw buffer, NaT included.
    pub fn as_slice(&self) -> &[i64] {
        &self.values
    }

    /// Element at `index`.
    pub fn get(&self, index: usize) -> Option<Duration> {
        self.values
            .get(index)
            .map(|v| Duration::from_raw(*v, self.resolution))
    }

    /// Iterate over elements as scalars.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Duration> + '_ {
        self.values
            .iter()
            .map(move |v| Duration::from_raw(*v, self.resolution))
    }

    /// Missing mask.
    pub fn is_na(&self) -> Vec<bool> {
        self.values.iter().map(|v| *v == NAT).collect()
    }

    /// Lossless copy at another resolution. Keeps the frequency.
    pub fn as_resolution(&self, resolution: Resolution) -> Result<Self> {
        Ok(Self {
            values: rescale_buffer(&self.values, self.resolution, resolution)?,
            resolution,
            freq: self.freq,
        })
    }

    fn field(&self, pick: impl Fn(&DurationFields) -> i64) -> Int64Array {
        self.iter()
            .map(|d| d.to_fields().ok().map(|f| pick(&f)))
            .collect()
    }

    /// Whole days per element; NaT becomes null.
    pub fn days(&self) -> Int64Array {
        self.field(|f| f.days)
    }

    /// Seconds within the day per element; NaT becomes null.
    pub fn seconds(&self) -> Int64Array {
        self.field(|f| f.seconds)
    }

    /// Microseconds within the second per element; NaT becomes null.
    pub fn microseconds(&self) -> Int64Array {
        self.field(|f| f.microseconds)
    }

    /// Nanoseconds within the microsecond per element; NaT becomes null.
    pub fn nanoseconds(&self) -> Int64Array {
        self.field(|f| f.nanoseconds)
    }

    /// Total seconds per element; NaT becomes NaN.
    pub fn total_seconds(&self) -> Float64Array {
        Float64Array::from_iter_values(self.iter().map(|d| d.to_total_seconds()))
    }

    /// Convert every element to a [`chrono::TimeDelta`]; NaT becomes `None`.
    pub fn to_timedeltas(&self) -> Result<Vec<Option<TimeDelta>>> {
        self.iter().map(|d| d.to_timedelta()).collect()
    }

    /// Assign `value` at `index`.
    ///
    /// Accepts a [`Duration`] at any resolution (converted losslessly), NaT,
    /// or a `chrono::TimeDelta`. Clears the frequency annotation.
    pub fn set(&mut self, index: usize, value: &Value) -> Result<()> {
        ensure!(
            index < self.values.len(),
            IndexOutOfBoundsSnafu {
                index,
                len: self.values.len(),
            }
        );

        let raw = match value {
            Value::NaT => NAT,
            Value::Duration(d) => d.as_resolution(self.resolution)?.value(),
            Value::TimeDelta(td) => Duration::from_timedelta(*td)?
                .as_resolution(self.resolution)?
                .value(),
            other => return Err(incompatible_value(other)),
        };

        self.values[index] = raw;
        if let Some(freq) = self.freq.take() {
            debug!("cleared frequency {freq} after assignment at position {index}");
        }
        Ok(())
    }

    fn map_checked(&self, op: fn(i64) -> Option<i64>, what: &str) -> Result<Vec<i64>> {
        self.values
            .iter()
            .map(|&v| {
                if v == NAT {
                    return Ok(NAT);
                }
                op(v).filter(|r| *r != NAT).context(OverflowSnafu { what })
            })
            .collect()
    }

    /// Elementwise sign flip. A frequency is propagated negated.
    pub fn negate(&self) -> Result<Self> {
        Ok(Self {
            values: self.map_checked(i64::checked_neg, "array negation")?,
            resolution: self.resolution,
            freq: self.freq.map(|f| f.negate()),
        })
    }

    /// Elementwise magnitude. The frequency is dropped.
    pub fn abs(&self) -> Result<Self> {
        Ok(Self {
            values: self.map_checked(i64::checked_abs, "array abs")?,
            resolution: self.resolution,
            freq: None,
        })
    }

    /// Unary plus: an independent copy with the same values and no
    /// frequency.
    pub fn positive(&self) -> Self {
        Self {
            values: self.values.clone(),
            resolution: self.resolution,
            freq: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    fn hours_ns(h: i64) -> i64 {
        h * 3_600 * 1_000_000_000
    }

    fn sample() -> DurationArray {
        DurationArray::from_buffer(vec![hours_ns(-1), NAT, hours_ns(2)], Resolution::Nanosecond)
    }

    #[test]
    fn from_scalars_promotes_to_finest_resolution() {
        let arr = DurationArray::from_scalars(&[
            Duration::from_raw(1, Resolution::Second),
            Duration::nat(Resolution::Second),
            Duration::from_raw(5, Resolution::Millisecond),
        ])
        .unwrap();
        assert_eq!(arr.resolution(), Resolution::Millisecond);
        assert_eq!(arr.as_slice(), &[1_000, NAT, 5]);
        assert_eq!(arr.freq(), None);
    }

    #[test]
    fn from_scalars_reports_unrepresentable_element() {
        let err = DurationArray::from_scalars(&[
            Duration::from_raw(i64::MAX, Resolution::Second),
            Duration::from_raw(1, Resolution::Nanosecond),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DurationError::IncompatibleResolution {
                left: Resolution::Second,
                right: Resolution::Nanosecond,
            }
        );
    }

    #[test]
    fn from_scalars_empty_defaults_to_nanoseconds() {
        let arr = DurationArray::from_scalars(&[]).unwrap();
        assert!(arr.is_empty());
        assert_eq!(arr.resolution(), Resolution::Nanosecond);
    }

    #[test]
    fn fields_null_out_nat() {
        let arr = DurationArray::from_buffer(
            vec![86_400 * 2 + 5, NAT, -1],
            Resolution::Second,
        );
        let days = arr.days();
        assert_eq!(days.value(0), 2);
        assert!(days.is_null(1));
        assert_eq!(days.value(2), -1);

        let secs = arr.seconds();
        assert_eq!(secs.value(0), 5);
        assert_eq!(secs.value(2), 86_399);
        assert_eq!(arr.microseconds().null_count(), 1);
        assert_eq!(arr.nanoseconds().value(0), 0);
    }

    #[test]
    fn total_seconds_nat_is_nan() {
        let out = sample().total_seconds();
        assert_eq!(out.value(0), -3_600.0);
        assert!(out.value(1).is_nan());
        assert_eq!(out.value(2), 7_200.0);
        assert_eq!(out.null_count(), 0);
    }

    #[test]
    fn negate_and_abs() {
        let arr = sample();
        assert_eq!(
            arr.negate().unwrap().as_slice(),
            &[hours_ns(1), NAT, hours_ns(-2)]
        );
        assert_eq!(arr.abs().unwrap().as_slice(), &[hours_ns(1), NAT, hours_ns(2)]);
        assert_eq!(arr.negate().unwrap().negate().unwrap(), arr);
    }

    #[test]
    fn positive_is_an_independent_copy() {
        let arr = sample();
        let pos = arr.positive();
        assert_eq!(pos, arr);
        assert_ne!(pos.as_slice().as_ptr(), arr.as_slice().as_ptr());
    }

    #[test]
    fn range_attaches_frequency() {
        let start = Duration::days(2).unwrap();
        let arr = DurationArray::range(start, 4, Frequency::hourly()).unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr.freq(), Some(Frequency::hourly()));
        assert_eq!(arr.get(3).unwrap(), Duration::hours(51).unwrap());
    }

    #[test]
    fn range_overflow_is_an_error_not_a_panic() {
        let start = Duration::from_raw(i64::MAX, Resolution::Second);
        let err = DurationArray::range(start, usize::MAX, Frequency::hourly()).unwrap_err();
        assert!(matches!(err, DurationError::Overflow { .. }));

        let start = Duration::from_raw(i64::MAX - 3_600, Resolution::Second);
        let err = DurationArray::range(start, 3, Frequency::hourly()).unwrap_err();
        assert!(matches!(err, DurationError::Overflow { .. }));

        let ok = DurationArray::range(start, 2, Frequency::hourly()).unwrap();
        assert_eq!(ok.as_slice(), &[i64::MAX - 3_600, i64::MAX]);
    }

    #[test]
    fn range_of_zero_periods_is_empty() {
        let arr = DurationArray::range(Duration::days(1).unwrap(), 0, Frequency::daily()).unwrap();
        assert!(arr.is_empty());
        assert_eq!(arr.freq(), Some(Frequency::daily()));
    }

    #[test]
    fn range_from_nat_is_invalid() {
        let err = DurationArray::range(Duration::nat(Resolution::Second), 2, Frequency::daily())
            .unwrap_err();
        assert!(matches!(err, DurationError::InvalidOperation { .. }));
    }

    #[test]
    fn with_freq_validates_step() {
        let ok = DurationArray::from_buffer(vec![0, 3_600, 7_200], Resolution::Second)
            .with_freq(Frequency::hourly())
            .unwrap();
        assert_eq!(ok.freq(), Some(Frequency::hourly()));

        let err = DurationArray::from_buffer(vec![0, 3_600, 7_201], Resolution::Second)
            .with_freq(Frequency::hourly())
            .unwrap_err();
        assert!(matches!(
            err,
            DurationError::FrequencyMismatch { position: 2, .. }
        ));

        let err = DurationArray::from_buffer(vec![0, NAT], Resolution::Second)
            .with_freq(Frequency::hourly())
            .unwrap_err();
        assert!(matches!(
            err,
            DurationError::FrequencyMismatch { position: 1, .. }
        ));
    }

    #[test]
    fn set_converts_resolution_and_clears_freq() {
        let mut arr = DurationArray::from_buffer(vec![0, 3_600], Resolution::Second)
            .with_freq(Frequency::hourly())
            .unwrap();
        arr.set(1, &Value::Duration(Duration::from_raw(7_200_000, Resolution::Millisecond)))
            .unwrap();
        assert_eq!(arr.as_slice(), &[0, 7_200]);
        assert_eq!(arr.freq(), None);

        arr.set(0, &Value::NaT).unwrap();
        assert!(arr.get(0).unwrap().is_nat());
    }

    #[test]
    fn set_rejects_lossy_and_foreign_values() {
        let mut arr = DurationArray::from_buffer(vec![0, 1], Resolution::Second);
        let err = arr
            .set(0, &Value::Duration(Duration::from_raw(1_500, Resolution::Millisecond)))
            .unwrap_err();
        assert!(matches!(err, DurationError::LossyConversion { .. }));

        let err = arr.set(0, &Value::Int(1)).unwrap_err();
        assert!(err.is_incompatible_type());

        let err = arr.set(5, &Value::NaT).unwrap_err();
        assert_eq!(err, DurationError::IndexOutOfBounds { index: 5, len: 2 });
    }

    #[test]
    fn as_resolution_is_lossless() {
        let arr = DurationArray::from_buffer(vec![1, NAT], Resolution::Second);
        let ms = arr.as_resolution(Resolution::Millisecond).unwrap();
        assert_eq!(ms.as_slice(), &[1_000, NAT]);
        let back = ms.as_resolution(Resolution::Second).unwrap();
        assert_eq!(back, arr);
    }
}
