//! Axis-aligned integer boxes.

use std::fmt;

use super::{check_section_at_last_coordinate, validate_coord_ranges, PointMembership, Region};
use crate::error::RegionError;
use crate::range::{join_ranges, IRange};

/// The box `coord_ranges[0] × … × coord_ranges[n-1]`; the only rectangular region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hyperparallelepiped {
    coord_ranges: Vec<IRange>,
}

impl Hyperparallelepiped {
    pub fn new(coord_ranges: &[IRange]) -> Result<Self, RegionError> {
        Ok(Self {
            coord_ranges: validate_coord_ranges(coord_ranges)?,
        })
    }

    /// Caller guarantees `coord_ranges` is non-empty.
    pub(crate) fn from_valid(coord_ranges: Vec<IRange>) -> Self {
        debug_assert!(!coord_ranges.is_empty());
        Self { coord_ranges }
    }

    #[inline]
    pub fn coord_ranges(&self) -> &[IRange] {
        &self.coord_ranges
    }

    /// O(1): drop the last range.
    pub fn section_at_last_coordinate(&self, value: i64) -> Result<Vec<Region>, RegionError> {
        if !check_section_at_last_coordinate(&self.coord_ranges, value)? {
            return Ok(Vec::new());
        }
        let n = self.coord_ranges.len();
        Ok(vec![Self::from_valid(self.coord_ranges[..n - 1].to_vec()).into()])
    }

    /// Whether the whole box, shifted back by `back_shifts`, lies inside a matrix
    /// with dimensions `dims`.
    ///
    /// Missing shifts are 0; a missing dimension counts as 1 (only coordinate 0 is
    /// valid there).
    pub fn is_inside_matrix(&self, dims: &[u64], back_shifts: &[i64]) -> bool {
        self.coord_ranges.iter().enumerate().all(|(k, r)| {
            let shift = back_shifts.get(k).copied().unwrap_or(0);
            let dim = dims.get(k).copied().unwrap_or(1);
            let (Some(lo), Some(hi)) = (r.min().checked_sub(shift), r.max().checked_sub(shift))
            else {
                return false;
            };
            lo >= 0 && (hi as u64) < dim
        })
    }

    #[inline]
    pub(crate) fn section_is_uninterrupted_segment(&self, value: i64) -> bool {
        self.coord_ranges.len() == 2 && self.coord_ranges[1].contains(value)
    }

    #[inline]
    pub(crate) fn segment_section_at_last_coordinate(&self) -> (i64, i64) {
        (self.coord_ranges[0].min(), self.coord_ranges[0].max())
    }
}

impl PointMembership for Hyperparallelepiped {
    #[inline]
    fn n(&self) -> usize {
        self.coord_ranges.len()
    }

    fn contains(&self, coords: &[i64]) -> bool {
        coords.len() >= self.coord_ranges.len()
            && self
                .coord_ranges
                .iter()
                .zip(coords)
                .all(|(r, &x)| r.contains(x))
    }
}

impl fmt::Display for Hyperparallelepiped {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-dimensional rectangular region {}",
            self.coord_ranges.len(),
            join_ranges(&self.coord_ranges, "x")
        )
    }
}
