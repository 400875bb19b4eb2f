//! Inclusive integer ranges used as per-axis bounding boxes.
//!
//! Invariants (checked by `IRange::new`)
//! - `min <= max`.
//! - `max != i64::MAX` and `min > -i64::MAX`, so `min - 1` and `max + 1` never overflow.
//! - `max - min + 1` fits in `i64` (the size is always representable).

use std::fmt;

use crate::error::RegionError;

/// Closed range `min..=max` of integer coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IRange {
    min: i64,
    max: i64,
}

impl IRange {
    /// Validating constructor.
    pub fn new(min: i64, max: i64) -> Result<Self, RegionError> {
        if min > max {
            return Err(RegionError::invalid(format!(
                "min > max (min = {min}, max = {max})"
            )));
        }
        if max == i64::MAX {
            return Err(RegionError::invalid("max == i64::MAX"));
        }
        if min <= -i64::MAX {
            return Err(RegionError::invalid("min == -i64::MAX or i64::MIN"));
        }
        if max.checked_sub(min).and_then(|d| d.checked_add(1)).is_none() {
            return Err(RegionError::invalid(format!(
                "max - min >= i64::MAX (min = {min}, max = {max})"
            )));
        }
        Ok(Self { min, max })
    }

    /// Single-point range `v..=v`.
    #[inline]
    pub fn point(v: i64) -> Result<Self, RegionError> {
        Self::new(v, v)
    }

    #[inline]
    pub fn min(&self) -> i64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> i64 {
        self.max
    }

    /// Number of integers in the range (`max - min + 1`).
    #[inline]
    pub fn size(&self) -> i64 {
        self.max - self.min + 1
    }

    #[inline]
    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    #[inline]
    pub fn contains_range(&self, other: &IRange) -> bool {
        self.min <= other.min && other.max <= self.max
    }

    /// Range `floor(lo)..=ceil(hi)` of a real interval.
    ///
    /// `lo`/`hi` must be finite; saturating float→int conversion is then caught by
    /// the `new` checks.
    pub(crate) fn enclosing(lo: f64, hi: f64) -> Result<Self, RegionError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(RegionError::invalid(format!(
                "non-finite coordinate bounds {lo}..{hi}"
            )));
        }
        Self::new(lo.floor() as i64, hi.ceil() as i64)
    }
}

impl fmt::Display for IRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.min, self.max)
    }
}

/// Joins ranges with a separator, e.g. `0..5x0..3`.
pub(crate) fn join_ranges(ranges: &[IRange], sep: &str) -> String {
    ranges
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(sep)
}
