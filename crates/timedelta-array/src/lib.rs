//! # timedelta-array
//!
//! Resolution-aware duration arrays with NaT semantics.
//!
//! This crate is the supported public entry point and provides a small, stable surface.
//!
//! ## Example
//!
//! ```rust
//! use timedelta_array::prelude::*;
//!
//! let arr = DurationArray::from_buffer(vec![0, 1, 2, 3, 4], Resolution::Second);
//! assert_eq!(arr.seconds().value(4), 4);
//! assert_eq!(arr.negate().unwrap().as_slice(), &[0, -1, -2, -3, -4]);
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Absolute-time namespace (wrapper-only).
pub mod datetime {
    pub use timedelta_array_core::datetime::{Timestamp, TimestampArray};
}

/// Casting namespace (wrapper-only).
pub mod cast {
    pub use timedelta_array_core::array::{
        Cast, CastArray, CastOptions, CastPolicy, CastTarget, CastWarning, IntegerKind,
    };
}

pub use timedelta_array_core::array::{ArithOutput, DurationArray, SearchResult, Side};
pub use timedelta_array_core::duration::{Duration, DurationFields, NAT};
pub use timedelta_array_core::error::DurationError;
pub use timedelta_array_core::frequency::{Frequency, FrequencyUnit, ParseFrequencyError};
pub use timedelta_array_core::index::DurationIndex;
pub use timedelta_array_core::resolution::{ParseResolutionError, Resolution};
pub use timedelta_array_core::value::{Period, Value};
