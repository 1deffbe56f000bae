//! Core engine for resolution-aware duration arrays.
//!
//! This crate provides the building blocks for `timedelta-array`:
//!
//! - A `Resolution` tag (s, ms, us, ns) with lossless conversion rules
//!   (`resolution` module).
//! - A scalar `Duration` with NaT semantics, exact cross-resolution
//!   comparison and calendar-style field decomposition (`duration` module).
//! - A columnar `DurationArray` with frequency annotations, arithmetic
//!   against scalars, arrays and absolute times, casting, ordered search and
//!   Arrow interop (`array` module).
//! - A minimal absolute-time counterpart used as the result of
//!   duration + timestamp arithmetic (`datetime` module).
//!
//! Missing values ("NaT") are stored as the `i64::MIN` sentinel in every
//! buffer. The library installs no logger; diagnostics go through the `log`
//! facade.
#![deny(missing_docs)]
pub mod array;
pub mod datetime;
pub mod duration;
pub mod error;
pub mod frequency;
pub mod index;
pub mod resolution;
pub mod value;

pub use array::DurationArray;
pub use duration::{Duration, DurationFields, NAT};
pub use error::{DurationError, Result};
pub use frequency::{Frequency, FrequencyUnit, ParseFrequencyError};
pub use index::DurationIndex;
pub use resolution::{ParseResolutionError, Resolution};
pub use value::{Period, Value};
