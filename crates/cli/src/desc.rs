//! JSON region descriptions accepted by the CLI.
//!
//! ```json
//! {"kind": "box", "ranges": [[0, 5], [0, 3]]}
//! {"kind": "simplex", "vertices": [[0, 0], [4, 0], [0, 4]]}
//! {"kind": "convex", "a": [[1, 0]], "b": [3], "ranges": [[0, 5], [0, 5]]}
//! {"kind": "polygon", "vertices": [[0, 0], [5, 0], [5, 5]]}
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use regions::{IRange, Region};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RegionDesc {
    Box {
        ranges: Vec<[i64; 2]>,
    },
    Simplex {
        vertices: Vec<Vec<f64>>,
    },
    Convex {
        /// One row per inequality `a_i·x <= b_i`.
        a: Vec<Vec<f64>>,
        b: Vec<f64>,
        ranges: Vec<[i64; 2]>,
    },
    Polygon {
        vertices: Vec<[f64; 2]>,
    },
}

impl RegionDesc {
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn to_region(&self) -> Result<Region> {
        let region = match self {
            RegionDesc::Box { ranges } => Region::hyperparallelepiped(&to_ranges(ranges)?)?,
            RegionDesc::Simplex { vertices } => Region::simplex(vertices)?,
            RegionDesc::Convex { a, b, ranges } => {
                let n = ranges.len();
                if let Some(row) = a.iter().position(|row| row.len() != n) {
                    bail!("row {row} of a has {} coefficients, expected {n}", a[row].len());
                }
                let flat: Vec<f64> = a.iter().flatten().copied().collect();
                Region::convex_hyperpolyhedron(&flat, b, &to_ranges(ranges)?)?
            }
            RegionDesc::Polygon { vertices } => Region::polygon_2d(vertices)?,
        };
        Ok(region)
    }
}

fn to_ranges(ranges: &[[i64; 2]]) -> Result<Vec<IRange>> {
    ranges
        .iter()
        .map(|&[min, max]| IRange::new(min, max).context("invalid range"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Region {
        serde_json::from_str::<RegionDesc>(text)
            .unwrap()
            .to_region()
            .unwrap()
    }

    #[test]
    fn parses_every_kind() {
        let b = parse(r#"{"kind": "box", "ranges": [[0, 5], [1, 3]]}"#);
        assert_eq!(b.to_string(), "2-dimensional rectangular region 0..5x1..3");
        let s = parse(r#"{"kind": "simplex", "vertices": [[0, 0], [4, 0], [0, 4]]}"#);
        assert!(s.contains(&[1, 1]).unwrap());
        let c = parse(r#"{"kind": "convex", "a": [[1, 0]], "b": [3], "ranges": [[0, 5], [0, 5]]}"#);
        assert!(!c.contains(&[4, 0]).unwrap());
        let p = parse(r#"{"kind": "polygon", "vertices": [[0, 0], [5, 0], [5, 5]]}"#);
        assert!(!p.is_contains_supported());
    }

    #[test]
    fn ragged_convex_rows_are_rejected() {
        let desc: RegionDesc = serde_json::from_str(
            r#"{"kind": "convex", "a": [[1, 0], [1]], "b": [3, 4], "ranges": [[0, 5], [0, 5]]}"#,
        )
        .unwrap();
        assert!(desc.to_region().is_err());
    }

    #[test]
    fn degenerate_simplex_surfaces_as_error() {
        let desc: RegionDesc =
            serde_json::from_str(r#"{"kind": "simplex", "vertices": [[0, 0], [2, 0], [4, 0]]}"#)
                .unwrap();
        let err = desc.to_region().unwrap_err();
        assert!(err.to_string().contains("degenerated simplex"));
    }
}
