//! Convex hyperpolyhedra: bounding box ∩ `{x : A x <= b}`.
//!
//! Sectioning substitutes the fixed last coordinate into every inequality, so the
//! result is again a hyperpolyhedron with the same number of rows; in 2-D the
//! 1-D interval is solved directly.

use std::fmt;

use nalgebra::{DMatrix, DVector};

use super::{
    check_section_at_last_coordinate, validate_coord_ranges, Hyperparallelepiped,
    PointMembership, Region,
};
use crate::error::RegionError;
use crate::range::{join_ranges, IRange};

/// `{x in box : a_i·x <= b_i for all rows i}`.
///
/// Invariants:
/// - `a` is `m × n`, `b` has length `m` (`m` may be 0).
/// - `vertices` is `Some` only for simplices built from vertices; then `m == n + 1`
///   and row `k` is the hyperfacet opposite vertex `k`.
#[derive(Clone, Debug)]
pub struct ConvexHyperpolyhedron {
    pub(super) coord_ranges: Vec<IRange>,
    pub(super) a: DMatrix<f64>,
    pub(super) b: DVector<f64>,
    pub(super) vertices: Option<Vec<DVector<f64>>>,
}

impl ConvexHyperpolyhedron {
    /// `a` is row-major with `a.len() == n * b.len()`, `n = coord_ranges.len()`.
    pub fn new(a: &[f64], b: &[f64], coord_ranges: &[IRange]) -> Result<Self, RegionError> {
        let coord_ranges = validate_coord_ranges(coord_ranges)?;
        let n = coord_ranges.len();
        let m = b.len();
        if Some(a.len()) != n.checked_mul(m) {
            return Err(RegionError::invalid(format!(
                "illegal size of A matrix: a.len()={} must be equal to b.len()*n={}*{}",
                a.len(),
                m,
                n
            )));
        }
        if a.iter().chain(b).any(|v| !v.is_finite()) {
            return Err(RegionError::invalid("non-finite inequality coefficient"));
        }
        Ok(Self {
            coord_ranges,
            a: DMatrix::from_row_slice(m, n, a),
            b: DVector::from_column_slice(b),
            vertices: None,
        })
    }

    #[inline]
    pub fn coord_ranges(&self) -> &[IRange] {
        &self.coord_ranges
    }

    /// Number of inequalities `m`.
    #[inline]
    pub fn inequality_count(&self) -> usize {
        self.b.len()
    }

    /// Coefficients, row-major (`m × n`).
    pub fn a(&self) -> Vec<f64> {
        self.a.transpose().as_slice().to_vec()
    }

    pub fn b(&self) -> Vec<f64> {
        self.b.as_slice().to_vec()
    }

    pub fn a_matrix(&self) -> &DMatrix<f64> {
        &self.a
    }

    #[inline]
    pub fn is_simplex(&self) -> bool {
        self.vertices.is_some()
    }

    /// Simplex vertices (copies), if this hyperpolyhedron was built from vertices.
    pub fn vertices(&self) -> Option<Vec<Vec<f64>>> {
        self.vertices
            .as_ref()
            .map(|vs| vs.iter().map(|v| v.as_slice().to_vec()).collect())
    }

    pub fn section_at_last_coordinate(&self, value: i64) -> Result<Vec<Region>, RegionError> {
        if !check_section_at_last_coordinate(&self.coord_ranges, value)? {
            return Ok(Vec::new());
        }
        let n = self.coord_ranges.len();
        if n == 2 {
            let Some((min, max)) = self.segment_section_at_last_coordinate(value) else {
                return Ok(Vec::new());
            };
            return Ok(vec![Region::segment(IRange::new(min, max)?)]);
        }
        // a_i0 x0 + … + a_i(n-2) x(n-2) <= b_i - a_i(n-1) c
        let c = value as f64;
        let b = DVector::from_fn(self.b.len(), |i, _| self.b[i] - self.a[(i, n - 1)] * c);
        Ok(vec![Self {
            coord_ranges: self.coord_ranges[..n - 1].to_vec(),
            a: self.a.columns(0, n - 1).into_owned(),
            b,
            vertices: None,
        }
        .into()])
    }

    #[inline]
    pub(crate) fn section_is_uninterrupted_segment(&self, value: i64) -> bool {
        self.coord_ranges.len() == 2 && self.coord_ranges[1].contains(value)
    }

    /// Solve `a_i0 x <= b_i - a_i1 c` for all rows inside `coord_range(0)`.
    pub(crate) fn segment_section_at_last_coordinate(&self, value: i64) -> Option<(i64, i64)> {
        if self.coord_ranges.len() != 2 {
            return None;
        }
        let c = value as f64;
        let mut left = self.coord_ranges[0].min() as f64;
        let mut right = self.coord_ranges[0].max() as f64;
        for i in 0..self.b.len() {
            let coef = self.a[(i, 0)];
            let d = self.b[i] - self.a[(i, 1)] * c;
            if coef > 0.0 {
                right = right.min(d / coef);
            } else if coef < 0.0 {
                left = left.max(d / coef);
            } else if d < 0.0 {
                // 0 <= d fails for every x
                return None;
            }
        }
        let min = left.ceil() as i64;
        let max = right.floor() as i64;
        (min <= max).then_some((min, max))
    }
}

impl PointMembership for ConvexHyperpolyhedron {
    #[inline]
    fn n(&self) -> usize {
        self.coord_ranges.len()
    }

    fn contains(&self, coords: &[i64]) -> bool {
        let n = self.coord_ranges.len();
        if coords.len() < n {
            return false;
        }
        if !self
            .coord_ranges
            .iter()
            .zip(coords)
            .all(|(r, &x)| r.contains(x))
        {
            return false;
        }
        (0..self.b.len()).all(|i| {
            let mut scalar_prod = 0.0;
            for j in 0..n {
                scalar_prod += self.a[(i, j)] * coords[j] as f64;
            }
            scalar_prod <= self.b[i]
        })
    }
}

impl fmt::Display for ConvexHyperpolyhedron {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.coord_ranges.len();
        match &self.vertices {
            Some(vertices) => {
                let kind = match n {
                    2 => " (triangle)",
                    3 => " (tetrahedron)",
                    _ => "",
                };
                write!(f, "{n}-dimensional simplex{kind} with vertices ")?;
                for (k, v) in vertices.iter().enumerate() {
                    if k > 0 {
                        write!(f, ", ")?;
                    }
                    let coords: Vec<String> = v.iter().map(|c| c.to_string()).collect();
                    write!(f, "({})", coords.join(","))?;
                }
                Ok(())
            }
            None => write!(
                f,
                "{n}-dimensional convex hyperpolyhedral region (inside {})",
                join_ranges(&self.coord_ranges, "x")
            ),
        }
    }
}
