//! Arbitrary 2-D polygons (possibly self-intersecting or degenerate).
//!
//! Membership is answered only through scan-line sections: `contains` is not
//! supported. A section at `y` walks the edges once and collects crossing
//! x-values; vertices lying exactly on the scan line look ahead to decide between
//! "touch" (counted twice) and "pass through" (counted once). Edges lying on the
//! scan line are emitted in a second pass. Segments of the two passes may overlap;
//! no merging is attempted.

use std::fmt;

use super::{check_section_at_last_coordinate, coord_ranges_of_vertices, Region};
use crate::error::RegionError;
use crate::range::IRange;

/// Closed polygon with vertices `(vx[k], vy[k])`; the last vertex connects to the first.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon2D {
    coord_ranges: Vec<IRange>,
    vx: Vec<f64>,
    vy: Vec<f64>,
}

impl Polygon2D {
    pub fn new(vertices: &[[f64; 2]]) -> Result<Self, RegionError> {
        let coord_ranges = coord_ranges_of_vertices(vertices, 2)?;
        Ok(Self {
            coord_ranges,
            vx: vertices.iter().map(|v| v[0]).collect(),
            vy: vertices.iter().map(|v| v[1]).collect(),
        })
    }

    #[inline]
    pub fn coord_ranges(&self) -> &[IRange] {
        &self.coord_ranges
    }

    #[inline]
    pub fn vertices_count(&self) -> usize {
        self.vx.len()
    }

    /// Panics if `index >= vertices_count()`.
    #[inline]
    pub fn vertex_x(&self, index: usize) -> f64 {
        self.vx[index]
    }

    /// Panics if `index >= vertices_count()`.
    #[inline]
    pub fn vertex_y(&self, index: usize) -> f64 {
        self.vy[index]
    }

    pub fn vertices(&self) -> Vec<[f64; 2]> {
        self.vx.iter().zip(&self.vy).map(|(&x, &y)| [x, y]).collect()
    }

    /// Scan-line section at `y = section_y`: 1-D segments, possibly overlapping.
    pub fn section_at_last_coordinate(&self, section_y: i64) -> Result<Vec<Region>, RegionError> {
        if !check_section_at_last_coordinate(&self.coord_ranges, section_y)? {
            return Ok(Vec::new());
        }
        let y = section_y as f64;
        let (vx, vy) = (&self.vx, &self.vy);
        let m = vx.len();
        let prev = |k: usize| if k > 0 { k - 1 } else { m - 1 };

        let mut section_x: Vec<f64> = Vec::with_capacity(m);
        let mut horizontal_count = 0usize;
        for k in 0..m {
            let (vx_prev, vy_prev) = (vx[prev(k)], vy[prev(k)]);
            if vy[k] != y {
                let crosses = if vy[k] > y { vy_prev < y } else { vy_prev > y };
                if crosses {
                    section_x.push(vx[k] + (vx_prev - vx[k]) * (y - vy[k]) / (vy_prev - vy[k]));
                }
            } else if vy_prev != y {
                // Arrived on the scan line; find how the boundary leaves it.
                let vy_next = (1..m)
                    .map(|step| vy[(k + step) % m])
                    .find(|&v| v != y)
                    .ok_or_else(|| {
                        RegionError::invariant(format!(
                            "cannot find another vy, though vy_prev != vy[{k}] in {self}"
                        ))
                    })?;
                section_x.push(vx[k]);
                if (vy_next > y) == (vy_prev > y) {
                    // touch, not pass through
                    section_x.push(vx[k]);
                }
            } else {
                // Edge on the scan line; counted even if degenerate (all vertices equal).
                horizontal_count += 1;
            }
        }
        if section_x.len() % 2 != 0 {
            return Err(RegionError::invariant(format!(
                "odd number {} of intersections of {self} and the horizontal y={section_y}",
                section_x.len()
            )));
        }

        // requested <= m, so this only fails when m segments cannot be held at
        // once; it is reported instead of aborting on allocation.
        let requested = section_x.len() / 2 + horizontal_count;
        let mut result: Vec<Region> = Vec::new();
        result
            .try_reserve_exact(requested)
            .map_err(|_| RegionError::ResourceExhausted { requested })?;

        section_x.sort_by(f64::total_cmp);
        for pair in section_x.chunks_exact(2) {
            push_rounded_segment(&mut result, pair[0], pair[1])?;
        }
        if horizontal_count > 0 {
            for k in 0..m {
                let (vx_prev, vy_prev) = (vx[prev(k)], vy[prev(k)]);
                if vy[k] == y && vy_prev == y {
                    push_rounded_segment(&mut result, vx[k].min(vx_prev), vx[k].max(vx_prev))?;
                }
            }
        }
        Ok(result)
    }
}

/// Push `ceil(lo)..=floor(hi)` unless it holds no integer.
fn push_rounded_segment(out: &mut Vec<Region>, lo: f64, hi: f64) -> Result<(), RegionError> {
    let min = lo.ceil() as i64;
    let max = hi.floor() as i64;
    if min <= max {
        out.push(Region::segment(IRange::new(min, max)?));
    }
    Ok(())
}

impl fmt::Display for Polygon2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "2-dimensional polygon ")?;
        for (k, (x, y)) in self.vx.iter().zip(&self.vy).enumerate() {
            if k > 0 {
                write!(f, "-")?;
            }
            write!(f, "({x},{y})")?;
        }
        Ok(())
    }
}
