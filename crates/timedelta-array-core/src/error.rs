//! Error types and SNAFU context selectors for the timedelta engine.
//!
//! This module centralizes the `DurationError` enum used by every public
//! operation and exposes context selectors (via
//! `#[snafu(visibility(pub(crate)))]`) so sibling modules can attach context
//! without re-exporting selectors at the crate root.
//!
//! Array-level field extraction never surfaces `InvalidOperation`; it writes a
//! null into the output instead. Every other variant is returned to the caller
//! as soon as it occurs.

use arrow::datatypes::DataType;
use snafu::prelude::*;

use crate::resolution::Resolution;

/// Convenience alias used throughout the crate.
pub type Result<T, E = DurationError> = std::result::Result<T, E>;

/// Errors from scalar and array duration operations.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum DurationError {
    /// Arithmetic or a resolution change left the representable `i64` range
    /// (or landed exactly on the NaT sentinel).
    #[snafu(display("Overflow while computing {what}"))]
    Overflow {
        /// Operation that overflowed.
        what: String,
    },

    /// Two operands carry resolutions with no lossless common representation.
    #[snafu(display("Incompatible resolutions: {left} and {right}"))]
    IncompatibleResolution {
        /// Resolution of the left operand.
        left: Resolution,
        /// Resolution of the right operand.
        right: Resolution,
    },

    /// A search, assignment or arithmetic operand is not a duration-like value.
    #[snafu(display("{msg}"))]
    IncompatibleType {
        /// Human-readable diagnostic naming the rejected value kind.
        msg: String,
    },

    /// An `astype` target cannot represent the data under the active policy.
    #[snafu(display("Cannot cast {from} to {to}: {reason}"))]
    InvalidCast {
        /// Source kind (for example `duration[ns]`).
        from: String,
        /// Requested target kind.
        to: String,
        /// Why the cast was refused.
        reason: String,
    },

    /// A scalar operation is undefined for the given value (for example,
    /// field extraction on NaT).
    #[snafu(display("Invalid operation: {operation} is undefined for NaT"))]
    InvalidOperation {
        /// Name of the rejected operation.
        operation: String,
    },

    /// A downcast between resolutions would drop sub-unit precision.
    #[snafu(display("Cannot convert {value} from {from} to {to} without losing precision"))]
    LossyConversion {
        /// Raw count that could not be converted.
        value: i64,
        /// Source resolution.
        from: Resolution,
        /// Target resolution.
        to: Resolution,
    },

    /// Elementwise operands have different lengths.
    #[snafu(display("Length mismatch: {left} vs {right}"))]
    LengthMismatch {
        /// Length of the receiver.
        left: usize,
        /// Length of the other operand.
        right: usize,
    },

    /// Indexed assignment outside the array bounds.
    #[snafu(display("Index {index} is out of bounds for array of length {len}"))]
    IndexOutOfBounds {
        /// Requested position.
        index: usize,
        /// Array length.
        len: usize,
    },

    /// The data does not follow the step pattern of the requested frequency.
    #[snafu(display("Values do not conform to frequency {freq} (first mismatch at position {position})"))]
    FrequencyMismatch {
        /// Frequency that failed validation.
        freq: String,
        /// First offending element.
        position: usize,
    },

    /// An arrow array that is not a duration array was passed to `from_arrow`.
    #[snafu(display("Unsupported arrow type for duration data: {datatype:?}"))]
    UnsupportedArrowType {
        /// The arrow data type that was rejected.
        datatype: DataType,
    },
}

impl DurationError {
    /// Returns `true` for the `IncompatibleType` category.
    pub fn is_incompatible_type(&self) -> bool {
        matches!(self, DurationError::IncompatibleType { .. })
    }
}
