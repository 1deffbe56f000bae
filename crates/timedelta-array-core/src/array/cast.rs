//! `astype` conversions for duration arrays.
//!
//! Integer storage has two canonical kinds, `int64` and `uint64`. Those are
//! honored exactly. Any other integer width is a "generic" request whose
//! handling is chosen by [`CastPolicy`]:
//!
//! - `Strict` (default): refuse with `InvalidCast`.
//! - `Coerce`: return the canonical kind of the same signedness, log a
//!   warning and attach a [`CastWarning`] to the result.
//!
//! Unsigned targets refuse arrays holding negative durations. NaT is
//! reinterpreted bit-for-bit as it would be by a raw buffer view.
use std::fmt;

use log::warn;
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

use crate::{
    array::DurationArray,
    duration::NAT,
    error::{InvalidCastSnafu, Result},
    resolution::Resolution,
};

/// How to treat integer targets that are not canonical storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastPolicy {
    /// Fail with `InvalidCast`.
    #[default]
    Strict,
    /// Degrade to canonical storage with a warning.
    Coerce,
}

/// Options for [`DurationArray::astype`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastOptions {
    /// Policy for non-canonical integer targets.
    #[serde(default)]
    pub policy: CastPolicy,
}

impl CastOptions {
    /// Options with the coercing policy.
    pub fn coerce() -> Self {
        Self {
            policy: CastPolicy::Coerce,
        }
    }
}

/// Fixed-width integer kinds a cast may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegerKind {
    /// 8-bit signed.
    I8,
    /// 16-bit signed.
    I16,
    /// 32-bit signed.
    I32,
    /// 64-bit signed (canonical).
    I64,
    /// 8-bit unsigned.
    U8,
    /// 16-bit unsigned.
    U16,
    /// 32-bit unsigned.
    U32,
    /// 64-bit unsigned (canonical).
    U64,
}

impl IntegerKind {
    /// `true` for the signed kinds.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            IntegerKind::I8 | IntegerKind::I16 | IntegerKind::I32 | IntegerKind::I64
        )
    }

    /// The canonical 64-bit kind with the same signedness.
    pub fn canonical(self) -> IntegerKind {
        if self.is_signed() {
            IntegerKind::I64
        } else {
            IntegerKind::U64
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntegerKind::I8 => "int8",
            IntegerKind::I16 => "int16",
            IntegerKind::I32 => "int32",
            IntegerKind::I64 => "int64",
            IntegerKind::U8 => "uint8",
            IntegerKind::U16 => "uint16",
            IntegerKind::U32 => "uint32",
            IntegerKind::U64 => "uint64",
        }
    }
}

impl fmt::Display for IntegerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Target of an `astype` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastTarget {
    /// Raw counts as integers.
    Integer(IntegerKind),
    /// Durations at another resolution.
    Duration(Resolution),
    /// Raw counts as floats, NaT as NaN.
    Float64,
}

impl fmt::Display for CastTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CastTarget::Integer(kind) => write!(f, "{kind}"),
            CastTarget::Duration(r) => write!(f, "duration[{r}]"),
            CastTarget::Float64 => f.write_str("float64"),
        }
    }
}

/// Data produced by a cast.
#[derive(Debug, Clone, PartialEq)]
pub enum CastArray {
    /// Canonical signed storage.
    Int64(Vec<i64>),
    /// Canonical unsigned storage.
    UInt64(Vec<u64>),
    /// Float counts.
    Float64(Vec<f64>),
    /// Durations at a new resolution.
    Duration(DurationArray),
}

impl CastArray {
    /// Integer kind of the storage, for integer results.
    pub fn integer_kind(&self) -> Option<IntegerKind> {
        match self {
            CastArray::Int64(_) => Some(IntegerKind::I64),
            CastArray::UInt64(_) => Some(IntegerKind::U64),
            CastArray::Float64(_) | CastArray::Duration(_) => None,
        }
    }
}

/// Recoverable notice that a cast returned a different kind than requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CastWarning {
    /// Kind the caller asked for.
    pub requested: IntegerKind,
    /// Kind actually returned.
    pub returned: IntegerKind,
    /// Human-readable notice.
    pub message: String,
}

/// Outcome of a successful cast.
#[derive(Debug, Clone, PartialEq)]
pub struct Cast {
    /// Converted data.
    pub array: CastArray,
    /// Set when the policy coerced the requested kind.
    pub warning: Option<CastWarning>,
}

impl DurationArray {
    fn source_kind(&self) -> String {
        format!("duration[{}]", self.resolution)
    }

    /// Convert the array to `target`.
    pub fn astype(&self, target: CastTarget, options: &CastOptions) -> Result<Cast> {
        match target {
            CastTarget::Integer(kind) => self.astype_integer(kind, options),
            CastTarget::Duration(resolution) => {
                let converted = self.as_resolution(resolution).map_err(|source| {
                    InvalidCastSnafu {
                        from: self.source_kind(),
                        to: target.to_string(),
                        reason: source.to_string(),
                    }
                    .build()
                })?;
                Ok(Cast {
                    array: CastArray::Duration(converted),
                    warning: None,
                })
            }
            CastTarget::Float64 => {
                let values = self
                    .values
                    .iter()
                    .map(|&v| if v == NAT { f64::NAN } else { v as f64 })
                    .collect();
                Ok(Cast {
                    array: CastArray::Float64(values),
                    warning: None,
                })
            }
        }
    }

    fn astype_integer(&self, requested: IntegerKind, options: &CastOptions) -> Result<Cast> {
        let returned = requested.canonical();
        let warning = if returned == requested {
            None
        } else {
            ensure!(
                options.policy == CastPolicy::Coerce,
                InvalidCastSnafu {
                    from: self.source_kind(),
                    to: requested.to_string(),
                    reason: format!("only {returned} storage is supported; request it explicitly"),
                }
            );
            let message = format!(
                "astype to {requested} returned {returned}; request {returned} to get exactly the specified kind"
            );
            warn!("{message}");
            Some(CastWarning {
                requested,
                returned,
                message,
            })
        };

        let array = if returned.is_signed() {
            CastArray::Int64(self.values.clone())
        } else {
            let negative = self.values.iter().position(|&v| v != NAT && v < 0);
            if let Some(pos) = negative {
                return InvalidCastSnafu {
                    from: self.source_kind(),
                    to: requested.to_string(),
                    reason: format!("negative value at position {pos}"),
                }
                .fail();
            }
            CastArray::UInt64(self.values.iter().map(|&v| v as u64).collect())
        };

        Ok(Cast { array, warning })
    }
}
