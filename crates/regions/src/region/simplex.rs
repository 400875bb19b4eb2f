//! Simplices from vertices: one hyperfacet inequality per vertex.
//!
//! For vertex k, the hyperplane through the other n vertices v_0..v_{n-1} is
//!
//! ```text
//! |   x_0    x_1  …    x_{n-1}  1 |
//! | v_0,0  v_0,1  …  v_0,n-1    1 |
//! |             …                 | = 0
//! | v_n-1,0       …  v_n-1,n-1  1 |
//! ```
//!
//! Expanding along the first row gives `a·x = b` where `a_j` are the signed
//! cofactors of the `x_j` entries and `-b` is the signed cofactor of the `1`.
//! The row is then oriented so that vertex k satisfies `a·v_k <= b`; if `v_k`
//! lies exactly on the hyperplane the vertices are affinely dependent.
//!
//! The determinant is a plain recursive cofactor expansion, O(n!). This bounds
//! practical use to roughly 6–7 dimensions; the degeneracy test relies on its
//! exact rounding behavior, so it is not replaced by a decomposition.

use nalgebra::{DMatrix, DVector};

use super::{coord_ranges_of_vertices, ConvexHyperpolyhedron};
use crate::cfg::SIMPLEX_DIM_ADVISORY;
use crate::error::RegionError;
use crate::range::IRange;

impl ConvexHyperpolyhedron {
    /// Simplex with `n+1` vertices of length `n`.
    ///
    /// Errors: `InvalidArgument` for malformed vertex sets, `DegenerateSimplex`
    /// if the vertices are affinely dependent.
    pub fn simplex(vertices: &[Vec<f64>]) -> Result<Self, RegionError> {
        let (coord_ranges, vs) = validate_simplex_vertices(vertices)?;
        let n = coord_ranges.len();
        if n > SIMPLEX_DIM_ADVISORY {
            tracing::warn!(
                n,
                advisory = SIMPLEX_DIM_ADVISORY,
                "building a high-dimensional simplex with O(n!) cofactor expansion"
            );
        }
        let (a, b, non_degenerate) = build_simplex_by_vertices(&vs);
        let simplex = Self {
            coord_ranges,
            a,
            b,
            vertices: Some(vs),
        };
        if !non_degenerate {
            return Err(RegionError::degenerate(format!(
                "degenerated simplex is not allowed: {simplex}"
            )));
        }
        Ok(simplex)
    }
}

/// Whether `Region::simplex(vertices)` would fail with `DegenerateSimplex`.
///
/// Argument errors (wrong vertex count, mismatched lengths) are still reported.
pub fn is_simplex_degenerated(vertices: &[Vec<f64>]) -> Result<bool, RegionError> {
    let (_, vs) = validate_simplex_vertices(vertices)?;
    let (_, _, non_degenerate) = build_simplex_by_vertices(&vs);
    Ok(!non_degenerate)
}

fn validate_simplex_vertices(
    vertices: &[Vec<f64>],
) -> Result<(Vec<IRange>, Vec<DVector<f64>>), RegionError> {
    let coord_ranges = coord_ranges_of_vertices(vertices, 0)?;
    let n = coord_ranges.len();
    if vertices.len() != n + 1 {
        let shape = match n {
            2 => "triangle".to_string(),
            3 => "tetrahedron".to_string(),
            _ => format!("{n}-dimensional simplex"),
        };
        return Err(RegionError::invalid(format!(
            "illegal number of vertices {}: the {shape} must be defined by {} vertices",
            vertices.len(),
            n + 1
        )));
    }
    let vs = vertices
        .iter()
        .map(|v| DVector::from_column_slice(v))
        .collect();
    Ok((coord_ranges, vs))
}

/// Returns `(a, b, non_degenerate)`; rows are filled even when degenerate.
fn build_simplex_by_vertices(vertices: &[DVector<f64>]) -> (DMatrix<f64>, DVector<f64>, bool) {
    let n = vertices.len() - 1;
    let mut a = DMatrix::zeros(n + 1, n);
    let mut b = DVector::zeros(n + 1);
    let mut non_degenerate = true;
    for (k, vertex) in vertices.iter().enumerate() {
        // Other vertices, each augmented with a trailing 1.
        let others = DMatrix::from_fn(n, n + 1, |i, j| {
            let v = &vertices[if i < k { i } else { i + 1 }];
            if j < n {
                v[j]
            } else {
                1.0
            }
        });
        for minor_index in 0..=n {
            let minor = others.clone().remove_column(minor_index);
            let det = cofactor_determinant(&minor);
            let minor_value = if minor_index % 2 == 0 { det } else { -det };
            if minor_index < n {
                a[(k, minor_index)] = minor_value;
            } else {
                b[k] = -minor_value;
            }
        }
        let mut sum = 0.0;
        for j in 0..n {
            sum += a[(k, j)] * vertex[j];
        }
        if sum == b[k] {
            non_degenerate = false;
        } else if sum > b[k] {
            // vertex k must satisfy its own facet inequality
            for j in 0..n {
                a[(k, j)] = -a[(k, j)];
            }
            b[k] = -b[k];
        }
    }
    (a, b, non_degenerate)
}

/// Determinant by recursive expansion along the first row.
pub(crate) fn cofactor_determinant(m: &DMatrix<f64>) -> f64 {
    let n = m.nrows();
    debug_assert_eq!(n, m.ncols());
    match n {
        0 => 1.0,
        1 => m[(0, 0)],
        2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        _ => {
            let rest = m.rows(1, n - 1).into_owned();
            let mut sum = 0.0;
            for j in 0..n {
                let minor = rest.clone().remove_column(j);
                let term = m[(0, j)] * cofactor_determinant(&minor);
                if j % 2 == 0 {
                    sum += term;
                } else {
                    sum -= term;
                }
            }
            sum
        }
    }
}
