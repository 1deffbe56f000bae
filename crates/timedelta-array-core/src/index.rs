//! Named index over a duration array.
//!
//! [`DurationIndex`] is a thin wrapper used where durations label rows. It
//! delegates to [`DurationArray`] and only changes how rejected search
//! needles are reported.
use crate::{
    array::{DurationArray, SearchResult, Side},
    error::{DurationError, IncompatibleTypeSnafu, Result},
    value::Value,
};

/// Immutable, optionally named index of durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationIndex {
    data: DurationArray,
    name: Option<String>,
}

impl DurationIndex {
    /// Wrap `data` without a name.
    pub fn new(data: DurationArray) -> Self {
        Self { data, name: None }
    }

    /// Attach a name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Underlying array.
    pub fn array(&self) -> &DurationArray {
        &self.data
    }

    /// Index name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// `true` when the index has no labels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// See [`DurationArray::searchsorted`]. Rejected needles are reported as
    /// a dtype mismatch.
    pub fn searchsorted(&self, value: &Value, side: Side) -> Result<SearchResult> {
        self.data.searchsorted(value, side).map_err(|err| match err {
            DurationError::IncompatibleType { .. } => IncompatibleTypeSnafu {
                msg: format!(
                    "searchsorted requires compatible dtype or scalar, not {}",
                    value.kind_name()
                ),
            }
            .build(),
            other => other,
        })
    }
}

impl From<DurationArray> for DurationIndex {
    fn from(data: DurationArray) -> Self {
        Self::new(data)
    }
}
