//! Flatten a region into axis-0 runs and tabulate them.

use anyhow::Result;
use polars::prelude::*;
use regions::Region;
use serde_json::{json, Value};

/// One run `x_min..=x_max` along axis 0 at fixed outer coordinates `outer[k] = x_{k+1}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub outer: Vec<i64>,
    pub x_min: i64,
    pub x_max: i64,
}

/// Runs covering `region`, ordered by the outer coordinates (last axis slowest).
///
/// Polygon runs may overlap; they are reported as produced.
pub fn runs(region: &Region) -> Result<Vec<Run>> {
    let mut out = Vec::new();
    collect_runs(region, &mut Vec::new(), &mut out)?;
    Ok(out)
}

/// Runs of `section` (an `n-1`-dimensional piece cut at `outer`).
pub fn runs_at(section: &Region, outer: &[i64]) -> Result<Vec<Run>> {
    let mut out = Vec::new();
    let mut suffix: Vec<i64> = outer.iter().rev().copied().collect();
    collect_runs(section, &mut suffix, &mut out)?;
    Ok(out)
}

// `suffix` holds fixed coordinates from the last axis inwards.
fn collect_runs(region: &Region, suffix: &mut Vec<i64>, out: &mut Vec<Run>) -> Result<()> {
    let n = region.n();
    if n == 1 {
        let outer: Vec<i64> = suffix.iter().rev().copied().collect();
        let range = region.coord_range(0);
        if region.is_rectangular() {
            out.push(Run {
                outer,
                x_min: range.min(),
                x_max: range.max(),
            });
            return Ok(());
        }
        // Group contained points into maximal runs.
        let mut start = None;
        for x in range.min()..=range.max() {
            match (region.contains(&[x])?, start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    out.push(Run {
                        outer: outer.clone(),
                        x_min: s,
                        x_max: x - 1,
                    });
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            out.push(Run {
                outer,
                x_min: s,
                x_max: range.max(),
            });
        }
        return Ok(());
    }
    let last = region.coord_range(n - 1);
    for value in last.min()..=last.max() {
        for section in region.section_at_last_coordinate(value)? {
            suffix.push(value);
            collect_runs(&section, suffix, out)?;
            suffix.pop();
        }
    }
    Ok(())
}

/// Table with columns `x1..x{n-1}`, `x_min`, `x_max`.
pub fn runs_frame(n: usize, runs: &[Run]) -> PolarsResult<DataFrame> {
    let mut columns = Vec::with_capacity(n + 1);
    for k in 1..n {
        let name = format!("x{k}");
        let values: Vec<i64> = runs.iter().map(|r| r.outer[k - 1]).collect();
        columns.push(Series::new(name.as_str().into(), values).into());
    }
    let x_min: Vec<i64> = runs.iter().map(|r| r.x_min).collect();
    let x_max: Vec<i64> = runs.iter().map(|r| r.x_max).collect();
    columns.push(Series::new("x_min".into(), x_min).into());
    columns.push(Series::new("x_max".into(), x_max).into());
    DataFrame::new(columns)
}

/// JSON for one section: rectangular 1-D pieces as `[min, max]`, others described.
pub fn describe_section(section: &Region) -> Value {
    if section.n() == 1 && section.is_rectangular() {
        let r = section.coord_range(0);
        return json!([r.min(), r.max()]);
    }
    let ranges: Vec<[i64; 2]> = section
        .coord_ranges()
        .iter()
        .map(|r| [r.min(), r.max()])
        .collect();
    json!({
        "kind": kind_name(section),
        "ranges": ranges,
        "display": section.to_string(),
    })
}

fn kind_name(region: &Region) -> &'static str {
    match region {
        Region::Hyperparallelepiped(_) => "box",
        Region::ConvexHyperpolyhedron(c) if c.is_simplex() => "simplex",
        Region::ConvexHyperpolyhedron(_) => "convex",
        Region::Polygon2D(_) => "polygon",
        Region::Section(_) => "section",
    }
}
