//! Containment-driven section: a view over an owning parent with a fixed last coordinate.

use std::fmt;
use std::sync::Arc;

use super::{PointMembership, Region};
use crate::error::RegionError;
use crate::range::IRange;

/// `{x : parent.contains(x_0, …, x_{n-1}, value)}` bounded by the parent's first `n` ranges.
#[derive(Clone, Debug)]
pub struct SectionView {
    parent: Arc<Region>,
    value: i64,
    coord_ranges: Vec<IRange>,
}

impl SectionView {
    /// Errors: `InvalidState` for a 1-D parent, `Unsupported` if the parent cannot
    /// answer `contains`.
    pub fn new(parent: Arc<Region>, value: i64) -> Result<Self, RegionError> {
        let n = parent.n();
        if n == 1 {
            return Err(RegionError::invalid_state(
                "cannot get a section of a 1-dimensional region",
            ));
        }
        if !parent.is_contains_supported() {
            return Err(RegionError::unsupported(format!(
                "containment-driven section requires contains: {parent}"
            )));
        }
        let coord_ranges = parent.coord_ranges()[..n - 1].to_vec();
        Ok(Self {
            parent,
            value,
            coord_ranges,
        })
    }

    #[inline]
    pub fn coord_ranges(&self) -> &[IRange] {
        &self.coord_ranges
    }

    pub fn parent(&self) -> &Arc<Region> {
        &self.parent
    }

    /// The fixed last coordinate of the parent.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

impl PointMembership for SectionView {
    #[inline]
    fn n(&self) -> usize {
        self.coord_ranges.len()
    }

    fn contains(&self, coords: &[i64]) -> bool {
        let n = self.coord_ranges.len();
        if coords.len() < n {
            return false;
        }
        let mut parent_coords = Vec::with_capacity(n + 1);
        parent_coords.extend_from_slice(&coords[..n]);
        parent_coords.push(self.value);
        // parent support is checked in `new`
        self.parent.membership(&parent_coords).unwrap_or(false)
    }
}

impl fmt::Display for SectionView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "section at {} of {}", self.value, self.parent)
    }
}
