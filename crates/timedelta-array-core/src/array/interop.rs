//! Conversions between [`DurationArray`] and Arrow duration arrays.
//!
//! The Arrow `TimeUnit` maps one-to-one onto [`Resolution`]. NaT and Arrow
//! nulls are the same thing on either side of the boundary.
use std::sync::Arc;

use arrow::{
    array::{
        Array, ArrayRef, ArrowPrimitiveType, AsArray, DurationMicrosecondArray,
        DurationMillisecondArray, DurationNanosecondArray, DurationSecondArray, PrimitiveArray,
    },
    datatypes::{
        DataType, DurationMicrosecondType, DurationMillisecondType, DurationNanosecondType,
        DurationSecondType,
    },
};

use crate::{
    array::DurationArray,
    duration::NAT,
    error::{Result, UnsupportedArrowTypeSnafu},
    resolution::Resolution,
};

fn raw_values<T>(array: &PrimitiveArray<T>) -> Vec<i64>
where
    T: ArrowPrimitiveType<Native = i64>,
{
    array.iter().map(|v| v.unwrap_or(NAT)).collect()
}

impl DurationArray {
    /// Arrow duration array at the matching unit, NaT as null.
    pub fn to_arrow(&self) -> ArrayRef {
        let opts = self.values.iter().map(|v| (*v != NAT).then_some(*v));
        match self.resolution {
            Resolution::Second => Arc::new(opts.collect::<DurationSecondArray>()),
            Resolution::Millisecond => Arc::new(opts.collect::<DurationMillisecondArray>()),
            Resolution::Microsecond => Arc::new(opts.collect::<DurationMicrosecondArray>()),
            Resolution::Nanosecond => Arc::new(opts.collect::<DurationNanosecondArray>()),
        }
    }

    /// Copy an Arrow duration array. Nulls become NaT.
    ///
    /// A valid (non-null) slot holding `i64::MIN` also reads as NaT, since
    /// that bit pattern is the sentinel here; it does not survive a round
    /// trip as a value and comes back from [`Self::to_arrow`] as null.
    ///
    /// Fails with `UnsupportedArrowType` for anything but `Duration(_)`.
    pub fn from_arrow(array: &dyn Array) -> Result<Self> {
        let DataType::Duration(unit) = array.data_type() else {
            return UnsupportedArrowTypeSnafu {
                datatype: array.data_type().clone(),
            }
            .fail();
        };
        let resolution = Resolution::from_arrow_time_unit(unit);
        let values = match resolution {
            Resolution::Second => raw_values(array.as_primitive::<DurationSecondType>()),
            Resolution::Millisecond => raw_values(array.as_primitive::<DurationMillisecondType>()),
            Resolution::Microsecond => raw_values(array.as_primitive::<DurationMicrosecondType>()),
            Resolution::Nanosecond => raw_values(array.as_primitive::<DurationNanosecondType>()),
        };
        Ok(Self::from_buffer(values, resolution))
    }
}
