//! Wrapper prelude.
//!
//! The `timedelta-array` crate is the supported public entry point.
//! Downstream code should prefer importing from this prelude instead of
//! depending on internal core module paths.

pub use crate::cast;
pub use crate::datetime;
pub use crate::{
    ArithOutput, Duration, DurationArray, DurationError, DurationFields, DurationIndex, Frequency,
    FrequencyUnit, NAT, ParseFrequencyError, ParseResolutionError, Period, Resolution,
    SearchResult, Side, Value,
};
