//! Narrow matrix interface consumed by the region copy driver, plus a dense
//! reference implementation.
//!
//! Conventions
//! - Coordinates are `i64`; the linear index is `x0 + d0·(x1 + d1·(x2 + …))`, so runs
//!   along axis 0 are contiguous.
//! - Missing coordinates are 0; coordinates past `dims().len()` must be 0.

use ndarray::{ArrayD, Dimension, IxDyn, ShapeBuilder};

/// Read access: dimensions, index translation, element and run reads.
pub trait MatrixRead<T: Copy> {
    fn dims(&self) -> &[usize];

    /// Dimension `k`; axes past `dims().len()` have size 1.
    #[inline]
    fn dim(&self, k: usize) -> usize {
        self.dims().get(k).copied().unwrap_or(1)
    }

    /// Linear index of `coords`, or `None` if the point is outside the matrix.
    fn index(&self, coords: &[i64]) -> Option<usize> {
        let mut index = 0usize;
        let mut stride = 1usize;
        for (k, &c) in coords.iter().enumerate() {
            let dim = self.dim(k);
            if c < 0 || c as u64 >= dim as u64 {
                return None;
            }
            index += c as usize * stride;
            stride *= dim;
        }
        Some(index)
    }

    #[inline]
    fn is_inside(&self, coords: &[i64]) -> bool {
        self.index(coords).is_some()
    }

    /// Element at a linear index returned by `index`.
    fn get(&self, index: usize) -> T;

    /// Append `len` elements starting at `index` to `out`.
    fn read_run(&self, index: usize, len: usize, out: &mut Vec<T>) {
        out.extend((index..index + len).map(|i| self.get(i)));
    }
}

/// Write access on top of `MatrixRead`.
pub trait MatrixWrite<T: Copy>: MatrixRead<T> {
    fn set(&mut self, index: usize, value: T);

    fn write_run(&mut self, index: usize, values: &[T]) {
        for (i, &v) in values.iter().enumerate() {
            self.set(index + i, v);
        }
    }

    fn fill_run(&mut self, index: usize, len: usize, value: T) {
        for i in index..index + len {
            self.set(i, value);
        }
    }
}

/// Dense n-D matrix over `ndarray::ArrayD` in column-major (axis 0 fastest) order.
#[derive(Clone, Debug, PartialEq)]
pub struct DenseMatrix<T> {
    dims: Vec<usize>,
    data: ArrayD<T>,
}

impl<T: Copy> DenseMatrix<T> {
    pub fn filled(dims: &[usize], value: T) -> Self {
        Self {
            dims: dims.to_vec(),
            data: ArrayD::from_elem(IxDyn(dims).f(), value),
        }
    }

    /// Build from a function of the coordinates.
    pub fn from_fn(dims: &[usize], mut f: impl FnMut(&[usize]) -> T) -> Self {
        Self {
            dims: dims.to_vec(),
            data: ArrayD::from_shape_fn(IxDyn(dims).f(), |ix| f(ix.slice())),
        }
    }

    /// Element at `coords`, or `None` outside the matrix.
    pub fn at(&self, coords: &[i64]) -> Option<T> {
        self.index(coords).map(|i| self.get(i))
    }

    pub fn as_array(&self) -> &ArrayD<T> {
        &self.data
    }

    fn flat(&self) -> &[T] {
        self.data
            .as_slice_memory_order()
            .expect("owned column-major array is contiguous")
    }

    fn flat_mut(&mut self) -> &mut [T] {
        self.data
            .as_slice_memory_order_mut()
            .expect("owned column-major array is contiguous")
    }
}

impl<T: Copy> MatrixRead<T> for DenseMatrix<T> {
    #[inline]
    fn dims(&self) -> &[usize] {
        &self.dims
    }

    #[inline]
    fn get(&self, index: usize) -> T {
        self.flat()[index]
    }

    fn read_run(&self, index: usize, len: usize, out: &mut Vec<T>) {
        out.extend_from_slice(&self.flat()[index..index + len]);
    }
}

impl<T: Copy> MatrixWrite<T> for DenseMatrix<T> {
    #[inline]
    fn set(&mut self, index: usize, value: T) {
        self.flat_mut()[index] = value;
    }

    fn write_run(&mut self, index: usize, values: &[T]) {
        self.flat_mut()[index..index + values.len()].copy_from_slice(values);
    }

    fn fill_run(&mut self, index: usize, len: usize, value: T) {
        self.flat_mut()[index..index + len].fill(value);
    }
}
