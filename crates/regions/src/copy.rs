//! Region-driven copy and fill over the narrow matrix interface.
//!
//! Purpose
//! - Walk a `Region` slice by slice and turn each 1-D leaf into bulk runs or
//!   point writes: `dest[x] = src[x - shifts]` for every region point `x`.
//!
//! Why this design
//! - The outer coordinates are peeled with `section_at_last_coordinate`; 2-D box and
//!   convex slices take the uninterrupted-segment fast path and become one run.
//! - Rectangular 1-D leaves are runs; other 1-D leaves are walked point by point
//!   with `contains`.
//! - Boxes are bounds-checked up front, so a failing box copy writes nothing. Other
//!   shapes detect violations while iterating and may leave a partial write.
//!
//! Conventions
//! - Missing shifts are 0; shifts past `region.n()` are ignored.

use crate::error::RegionError;
use crate::matrix::{MatrixRead, MatrixWrite};
use crate::region::Region;

/// Copy every point of `region` from `src` (shifted back by `shifts`) into `dest`.
///
/// Errors: `OutOfBounds` if a region point lies outside `dest` or its shifted
/// point lies outside `src`. For a `Hyperparallelepiped` nothing is written on
/// failure; other shapes may fail after writing part of the region.
pub fn copy_region<T, D, S>(
    dest: &mut D,
    src: &S,
    region: &Region,
    shifts: &[i64],
) -> Result<(), RegionError>
where
    T: Copy,
    D: MatrixWrite<T> + ?Sized,
    S: MatrixRead<T> + ?Sized,
{
    if let Some(rect) = region.as_hyperparallelepiped() {
        if !rect.is_inside_matrix(&dims_u64(dest.dims()), &[]) {
            return Err(RegionError::out_of_bounds(format!(
                "{region} is not inside the destination matrix {:?}",
                dest.dims()
            )));
        }
        if !rect.is_inside_matrix(&dims_u64(src.dims()), shifts) {
            return Err(RegionError::out_of_bounds(format!(
                "{region}, shifted back by {shifts:?}, is not inside the source matrix {:?}",
                src.dims()
            )));
        }
    }
    RegionCopier::new(dest, Some(src), region.n(), shifts, Policy::MustBeInside).run(region)
}

/// Like `copy_region`, but never fails on bounds: source points outside `src` read
/// as `outside`, destination points outside `dest` are skipped.
pub fn copy_region_continued<T, D, S>(
    dest: &mut D,
    src: &S,
    region: &Region,
    shifts: &[i64],
    outside: T,
) -> Result<(), RegionError>
where
    T: Copy,
    D: MatrixWrite<T> + ?Sized,
    S: MatrixRead<T> + ?Sized,
{
    RegionCopier::new(dest, Some(src), region.n(), shifts, Policy::Continued { outside })
        .run(region)
}

/// Write `value` at every point of `region` that lies inside `dest`.
pub fn fill_region<T, D>(dest: &mut D, region: &Region, value: T) -> Result<(), RegionError>
where
    T: Copy,
    D: MatrixWrite<T> + ?Sized,
{
    RegionCopier::<T, D, D>::new(
        dest,
        None,
        region.n(),
        &[],
        Policy::Continued { outside: value },
    )
    .run(region)
}

#[derive(Clone, Copy, Debug)]
enum Policy<T> {
    MustBeInside,
    Continued { outside: T },
}

struct RegionCopier<'a, T, D: ?Sized, S: ?Sized> {
    dest: &'a mut D,
    // `None`: every source point is outside (fill)
    src: Option<&'a S>,
    shifts: Vec<i64>,
    policy: Policy<T>,
    dest_coords: Vec<i64>,
    src_coords: Vec<i64>,
    buf: Vec<T>,
    written: u64,
}

impl<'a, T, D, S> RegionCopier<'a, T, D, S>
where
    T: Copy,
    D: MatrixWrite<T> + ?Sized,
    S: MatrixRead<T> + ?Sized,
{
    fn new(dest: &'a mut D, src: Option<&'a S>, n: usize, shifts: &[i64], policy: Policy<T>) -> Self {
        let shifts: Vec<i64> = (0..n).map(|k| shifts.get(k).copied().unwrap_or(0)).collect();
        let src_coords = shifts.iter().map(|s| 0i64.saturating_sub(*s)).collect();
        Self {
            dest,
            src,
            shifts,
            policy,
            dest_coords: vec![0; n],
            src_coords,
            buf: Vec::new(),
            written: 0,
        }
    }

    fn run(mut self, region: &Region) -> Result<(), RegionError> {
        tracing::debug!(
            region = %region,
            continued = self.is_continued(),
            rectangular = region.is_rectangular(),
            "region copy started"
        );
        self.process(region)?;
        tracing::debug!(written = self.written, "region copy finished");
        Ok(())
    }

    #[inline]
    fn is_continued(&self) -> bool {
        matches!(self.policy, Policy::Continued { .. })
    }

    #[inline]
    fn set_coord(&mut self, k: usize, value: i64) {
        self.dest_coords[k] = value;
        self.src_coords[k] = value.saturating_sub(self.shifts[k]);
    }

    fn process(&mut self, region: &Region) -> Result<(), RegionError> {
        let n = region.n();
        if n == 1 {
            let range = region.coord_range(0);
            return if region.is_rectangular() {
                self.copy_run(range.min(), range.max())
            } else {
                self.copy_points(region)
            };
        }
        let last = n - 1;
        let range = region.coord_range(last);
        let (mut from, mut to) = (range.min(), range.max());
        if self.is_continued() {
            // Rows outside the destination cannot be written at all.
            from = from.max(0);
            to = to.min(dim_i64(self.dest.dim(last)) - 1);
        }
        for value in from..=to {
            self.set_coord(last, value);
            if region.section_is_uninterrupted_segment(value) {
                if n != 2 {
                    return Err(RegionError::invariant(format!(
                        "uninterrupted segment reported by {n}-dimensional {region}"
                    )));
                }
                if let Some((min, max)) = region.segment_section_at_last_coordinate(value) {
                    self.copy_run(min, max)?;
                }
                continue;
            }
            for section in region.section_at_last_coordinate(value)? {
                if section.n() != last {
                    return Err(RegionError::invariant(format!(
                        "section at {value} of {region} is {}-dimensional, expected {last}",
                        section.n()
                    )));
                }
                self.process(&section)?;
            }
        }
        Ok(())
    }

    /// Copy the run `min..=max` along axis 0 at the current outer coordinates.
    fn copy_run(&mut self, min: i64, max: i64) -> Result<(), RegionError> {
        match self.policy {
            Policy::MustBeInside => self.copy_run_inside(min, max),
            Policy::Continued { outside } => {
                self.copy_run_continued(min, max, outside);
                Ok(())
            }
        }
    }

    fn copy_run_inside(&mut self, min: i64, max: i64) -> Result<(), RegionError> {
        self.set_coord(0, max);
        let dest_end = self.dest.index(&self.dest_coords);
        let src_end = self.src.and_then(|src| src.index(&self.src_coords));
        self.set_coord(0, min);
        let dest_index = self
            .dest
            .index(&self.dest_coords)
            .filter(|_| dest_end.is_some())
            .ok_or_else(|| {
                RegionError::out_of_bounds(format!(
                    "run {min}..{max} at {:?} is outside the destination matrix {:?}",
                    self.dest_coords,
                    self.dest.dims()
                ))
            })?;
        let (src, src_index) = self
            .src
            .and_then(|src| src.index(&self.src_coords).map(|i| (src, i)))
            .filter(|_| src_end.is_some())
            .ok_or_else(|| {
                RegionError::out_of_bounds(format!(
                    "source run starting at {:?} is outside the source matrix",
                    self.src_coords
                ))
            })?;
        let len = (max - min + 1) as usize;
        self.buf.clear();
        src.read_run(src_index, len, &mut self.buf);
        self.dest.write_run(dest_index, &self.buf);
        self.written += len as u64;
        Ok(())
    }

    fn copy_run_continued(&mut self, min: i64, max: i64, outside: T) {
        let from = min.max(0);
        let to = max.min(dim_i64(self.dest.dim(0)) - 1);
        if from > to {
            return;
        }
        self.set_coord(0, from);
        let Some(dest_index) = self.dest.index(&self.dest_coords) else {
            return;
        };
        let len = (to - from + 1) as usize;
        self.written += len as u64;

        // Part of from..=to whose shifted points fall inside the source row.
        let shift = self.shifts[0];
        let mut inside = None;
        if let Some(src) = self.src {
            let lo = from.max(shift);
            let hi = to.min(shift.saturating_add(dim_i64(src.dim(0))).saturating_sub(1));
            if lo <= hi {
                self.set_coord(0, lo);
                inside = src.index(&self.src_coords).map(|i| (src, lo, hi, i));
            }
        }
        let Some((src, lo, hi, src_index)) = inside else {
            self.dest.fill_run(dest_index, len, outside);
            return;
        };
        let head = (lo - from) as usize;
        let body = (hi - lo + 1) as usize;
        self.dest.fill_run(dest_index, head, outside);
        self.buf.clear();
        src.read_run(src_index, body, &mut self.buf);
        self.dest.write_run(dest_index + head, &self.buf);
        self.dest
            .fill_run(dest_index + head + body, len - head - body, outside);
    }

    /// Walk a non-rectangular 1-D region point by point.
    fn copy_points(&mut self, region: &Region) -> Result<(), RegionError> {
        let range = region.coord_range(0);
        let (mut from, mut to) = (range.min(), range.max());
        if self.is_continued() {
            from = from.max(0);
            to = to.min(dim_i64(self.dest.dim(0)) - 1);
        }
        for x in from..=to {
            self.set_coord(0, x);
            if region.contains(&self.dest_coords)? {
                self.copy_point()?;
            }
        }
        Ok(())
    }

    fn copy_point(&mut self) -> Result<(), RegionError> {
        let Some(dest_index) = self.dest.index(&self.dest_coords) else {
            return match self.policy {
                Policy::MustBeInside => Err(RegionError::out_of_bounds(format!(
                    "point {:?} is outside the destination matrix {:?}",
                    self.dest_coords,
                    self.dest.dims()
                ))),
                Policy::Continued { .. } => Ok(()),
            };
        };
        let read = self
            .src
            .and_then(|src| src.index(&self.src_coords).map(|i| src.get(i)));
        let value = match (read, self.policy) {
            (Some(v), _) => v,
            (None, Policy::Continued { outside }) => outside,
            (None, Policy::MustBeInside) => {
                return Err(RegionError::out_of_bounds(format!(
                    "source point {:?} is outside the source matrix",
                    self.src_coords
                )))
            }
        };
        self.dest.set(dest_index, value);
        self.written += 1;
        Ok(())
    }
}

fn dims_u64(dims: &[usize]) -> Vec<u64> {
    dims.iter().map(|&d| d as u64).collect()
}

#[inline]
fn dim_i64(dim: usize) -> i64 {
    i64::try_from(dim).unwrap_or(i64::MAX)
}
