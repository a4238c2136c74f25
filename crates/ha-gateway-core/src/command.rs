//! Validated command values.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// A cover position or tilt, in percent.
///
/// Only values in `0..=100` can be constructed, so anything holding a
/// `CoverPercent` is safe to forward upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub struct CoverPercent(u8);

impl CoverPercent {
    /// Fully closed.
    pub const MIN: Self = Self(0);
    /// Fully open.
    pub const MAX: Self = Self(100);

    /// Return the percentage.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for CoverPercent {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= 100 => Ok(Self(v)),
            _ => Err(CoreError::OutOfRange(value)),
        }
    }
}

impl From<CoverPercent> for u8 {
    fn from(value: CoverPercent) -> Self {
        value.0
    }
}

impl fmt::Display for CoverPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
