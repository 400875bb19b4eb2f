//! Integer lattice regions and their hyperplane-section decomposition.
//!
//! Purpose
//! - Describe sets of integer points in n-D space (boxes, convex hyperpolyhedra,
//!   simplices, arbitrary 2-D polygons) without enumerating them.
//! - Let bulk array code walk a region slice by slice: every region can cut itself
//!   at `x[n-1] = value` into `(n-1)`-dimensional regions, down to 1-D segments.
//!
//! Why this design
//! - The family is closed, so `Region` is a sealed enum; shared behavior lives in
//!   one `match` per operation instead of dynamic dispatch.
//! - A simplex is a `ConvexHyperpolyhedron` that additionally carries its vertices.
//! - The containment-driven fallback section is an explicit variant
//!   (`SectionView`: `Arc` parent plus a fixed trailing coordinate).
//! - Point containment is a capability: types that support it implement
//!   `PointMembership`; `Polygon2D` does not, and `Region::contains` reports
//!   `Unsupported` for it at runtime.
//!
//! Conventions
//! - `coord_ranges` is a bounding box, not a tight hull.
//! - All predicates use plain `f64` arithmetic; rounding is accepted as is.

mod convex;
mod hyperparallelepiped;
mod polygon;
mod section;
mod simplex;

use std::fmt;
use std::sync::Arc;

pub use convex::ConvexHyperpolyhedron;
pub use hyperparallelepiped::Hyperparallelepiped;
pub use polygon::Polygon2D;
pub use section::SectionView;
pub use simplex::is_simplex_degenerated;

use crate::error::RegionError;
use crate::range::IRange;

/// Point-membership capability.
///
/// Coordinates after the first `n()` are ignored. Fewer than `n()` coordinates
/// never name a point of the region, so `contains` answers `false` for them;
/// `Region::contains` reports that case as `InvalidArgument` instead.
pub trait PointMembership {
    fn n(&self) -> usize;
    fn contains(&self, coords: &[i64]) -> bool;
}

/// A set of integer points in n-dimensional space.
#[derive(Clone, Debug)]
pub enum Region {
    Hyperparallelepiped(Hyperparallelepiped),
    ConvexHyperpolyhedron(ConvexHyperpolyhedron),
    Polygon2D(Polygon2D),
    Section(SectionView),
}

impl Region {
    /// 1-D segment `x_range`.
    pub fn segment(x_range: IRange) -> Self {
        Hyperparallelepiped::from_valid(vec![x_range]).into()
    }

    pub fn rectangle_2d(x_range: IRange, y_range: IRange) -> Self {
        Hyperparallelepiped::from_valid(vec![x_range, y_range]).into()
    }

    pub fn parallelepiped_3d(x_range: IRange, y_range: IRange, z_range: IRange) -> Self {
        Hyperparallelepiped::from_valid(vec![x_range, y_range, z_range]).into()
    }

    pub fn hyperparallelepiped(coord_ranges: &[IRange]) -> Result<Self, RegionError> {
        Ok(Hyperparallelepiped::new(coord_ranges)?.into())
    }

    pub fn triangle_2d(
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
    ) -> Result<Self, RegionError> {
        Self::simplex(&[vec![x1, y1], vec![x2, y2], vec![x3, y3]])
    }

    #[allow(clippy::too_many_arguments)]
    pub fn tetrahedron_3d(
        x1: f64,
        y1: f64,
        z1: f64,
        x2: f64,
        y2: f64,
        z2: f64,
        x3: f64,
        y3: f64,
        z3: f64,
        x4: f64,
        y4: f64,
        z4: f64,
    ) -> Result<Self, RegionError> {
        Self::simplex(&[
            vec![x1, y1, z1],
            vec![x2, y2, z2],
            vec![x3, y3, z3],
            vec![x4, y4, z4],
        ])
    }

    /// n-D simplex from `n+1` vertices of length `n`.
    pub fn simplex(vertices: &[Vec<f64>]) -> Result<Self, RegionError> {
        Ok(ConvexHyperpolyhedron::simplex(vertices)?.into())
    }

    /// Hyperpolyhedron `{x in box : a_i·x <= b_i}` with `a` given row-major (`m × n`).
    pub fn convex_hyperpolyhedron(
        a: &[f64],
        b: &[f64],
        coord_ranges: &[IRange],
    ) -> Result<Self, RegionError> {
        Ok(ConvexHyperpolyhedron::new(a, b, coord_ranges)?.into())
    }

    pub fn polygon_2d(vertices: &[[f64; 2]]) -> Result<Self, RegionError> {
        Ok(Polygon2D::new(vertices)?.into())
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.coord_ranges().len()
    }

    /// Bounding ranges, one per axis.
    pub fn coord_ranges(&self) -> &[IRange] {
        match self {
            Region::Hyperparallelepiped(r) => r.coord_ranges(),
            Region::ConvexHyperpolyhedron(r) => r.coord_ranges(),
            Region::Polygon2D(r) => r.coord_ranges(),
            Region::Section(r) => r.coord_ranges(),
        }
    }

    /// Bounding range of axis `k`. Panics if `k >= n()`.
    #[inline]
    pub fn coord_range(&self, k: usize) -> IRange {
        self.coord_ranges()[k]
    }

    /// `true` only if the region is exactly its bounding box. Never a false positive.
    #[inline]
    pub fn is_rectangular(&self) -> bool {
        matches!(self, Region::Hyperparallelepiped(_))
    }

    /// Whether `contains` is implemented for this region.
    pub fn is_contains_supported(&self) -> bool {
        !matches!(self, Region::Polygon2D(_))
    }

    /// Integer-point membership.
    ///
    /// Errors: `InvalidArgument` if fewer than `n()` coordinates are passed,
    /// `Unsupported` for `Polygon2D`.
    pub fn contains(&self, coords: &[i64]) -> Result<bool, RegionError> {
        if coords.len() < self.n() {
            return Err(RegionError::invalid(format!(
                "{} coordinates passed to a {}-dimensional region",
                coords.len(),
                self.n()
            )));
        }
        self.membership(coords).ok_or_else(|| {
            RegionError::unsupported(format!("contains is not supported by {self}"))
        })
    }

    /// `None` when the variant has no point-membership capability.
    pub(crate) fn membership(&self, coords: &[i64]) -> Option<bool> {
        match self {
            Region::Hyperparallelepiped(r) => Some(r.contains(coords)),
            Region::ConvexHyperpolyhedron(r) => Some(r.contains(coords)),
            Region::Polygon2D(_) => None,
            Region::Section(r) => Some(r.contains(coords)),
        }
    }

    /// Decompose `self ∩ {x[n-1] = value}` into `(n-1)`-dimensional regions.
    ///
    /// Returns an empty vector when `value` is outside `coord_range(n-1)`.
    /// Errors with `InvalidState` for 1-D regions.
    pub fn section_at_last_coordinate(&self, value: i64) -> Result<Vec<Region>, RegionError> {
        match self {
            Region::Hyperparallelepiped(r) => r.section_at_last_coordinate(value),
            Region::ConvexHyperpolyhedron(r) => r.section_at_last_coordinate(value),
            Region::Polygon2D(r) => r.section_at_last_coordinate(value),
            Region::Section(_) => self.section_by_containment(value),
        }
    }

    /// Slow, always-correct section: one `SectionView` that asks `self.contains`
    /// with `value` appended.
    ///
    /// Errors with `Unsupported` if this region cannot answer `contains`.
    pub fn section_by_containment(&self, value: i64) -> Result<Vec<Region>, RegionError> {
        if !check_section_at_last_coordinate(self.coord_ranges(), value)? {
            return Ok(Vec::new());
        }
        let view = SectionView::new(Arc::new(self.clone()), value)?;
        Ok(vec![view.into()])
    }

    /// `true` only when the section at `value` is known to be one contiguous run
    /// (2-D box or convex parents, `value` inside the last range).
    pub(crate) fn section_is_uninterrupted_segment(&self, value: i64) -> bool {
        match self {
            Region::Hyperparallelepiped(r) => r.section_is_uninterrupted_segment(value),
            Region::ConvexHyperpolyhedron(r) => r.section_is_uninterrupted_segment(value),
            Region::Polygon2D(_) | Region::Section(_) => false,
        }
    }

    /// Inclusive bounds of the uninterrupted section at `value`; `None` if empty
    /// or if the variant has no fast path.
    pub(crate) fn segment_section_at_last_coordinate(&self, value: i64) -> Option<(i64, i64)> {
        match self {
            Region::Hyperparallelepiped(r) => Some(r.segment_section_at_last_coordinate()),
            Region::ConvexHyperpolyhedron(r) => r.segment_section_at_last_coordinate(value),
            Region::Polygon2D(_) | Region::Section(_) => None,
        }
    }

    pub fn as_hyperparallelepiped(&self) -> Option<&Hyperparallelepiped> {
        match self {
            Region::Hyperparallelepiped(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_convex_hyperpolyhedron(&self) -> Option<&ConvexHyperpolyhedron> {
        match self {
            Region::ConvexHyperpolyhedron(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_polygon_2d(&self) -> Option<&Polygon2D> {
        match self {
            Region::Polygon2D(r) => Some(r),
            _ => None,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Region::Hyperparallelepiped(r) => r.fmt(f),
            Region::ConvexHyperpolyhedron(r) => r.fmt(f),
            Region::Polygon2D(r) => r.fmt(f),
            Region::Section(r) => r.fmt(f),
        }
    }
}

impl From<Hyperparallelepiped> for Region {
    fn from(r: Hyperparallelepiped) -> Self {
        Region::Hyperparallelepiped(r)
    }
}

impl From<ConvexHyperpolyhedron> for Region {
    fn from(r: ConvexHyperpolyhedron) -> Self {
        Region::ConvexHyperpolyhedron(r)
    }
}

impl From<Polygon2D> for Region {
    fn from(r: Polygon2D) -> Self {
        Region::Polygon2D(r)
    }
}

impl From<SectionView> for Region {
    fn from(r: SectionView) -> Self {
        Region::Section(r)
    }
}

/// Shared base-contract check: ranges are non-empty.
pub(crate) fn validate_coord_ranges(coord_ranges: &[IRange]) -> Result<Vec<IRange>, RegionError> {
    if coord_ranges.is_empty() {
        return Err(RegionError::invalid("empty coord_ranges"));
    }
    Ok(coord_ranges.to_vec())
}

/// `Ok(false)` if `value` is outside the last range; `InvalidState` for 1-D regions.
pub(crate) fn check_section_at_last_coordinate(
    coord_ranges: &[IRange],
    value: i64,
) -> Result<bool, RegionError> {
    match coord_ranges {
        [] | [_] => Err(RegionError::invalid_state(
            "cannot get a section of a 1-dimensional region",
        )),
        [.., last] => Ok(last.contains(value)),
    }
}

/// Bounding ranges `floor(min)..=ceil(max)` of a vertex set.
///
/// `required_dims == 0` accepts any (common) vertex length.
pub(crate) fn coord_ranges_of_vertices<V: AsRef<[f64]>>(
    vertices: &[V],
    required_dims: usize,
) -> Result<Vec<IRange>, RegionError> {
    let first = vertices
        .first()
        .ok_or_else(|| RegionError::invalid("no vertices are specified"))?
        .as_ref();
    let dims = first.len();
    for (k, v) in vertices.iter().enumerate() {
        let v = v.as_ref();
        if v.is_empty() {
            return Err(RegionError::invalid(format!(
                "empty vertices[{k}]: 0-dimensional points are not allowed"
            )));
        }
        if required_dims > 0 && v.len() != required_dims {
            return Err(RegionError::invalid(format!(
                "the vertex #{k} is {}-dimensional, but only {required_dims}-dimensional vertices are allowed",
                v.len()
            )));
        }
        if v.len() != dims {
            return Err(RegionError::invalid(format!(
                "different number of dimensions in the vertex #{k} ({}-dimensional) and the vertex #0 ({dims}-dimensional)",
                v.len()
            )));
        }
        if let Some(j) = v.iter().position(|c| !c.is_finite()) {
            return Err(RegionError::invalid(format!(
                "non-finite coordinate #{j} in the vertex #{k}"
            )));
        }
    }
    (0..dims)
        .map(|j| {
            let (lo, hi) = vertices.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                let c = v.as_ref()[j];
                (lo.min(c), hi.max(c))
            });
            IRange::enclosing(lo, hi)
        })
        .collect()
}

#[cfg(test)]
mod tests;
