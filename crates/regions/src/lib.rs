//! Integer lattice regions for bulk n-D array operations.
//!
//! A `Region` is a set of integer points (box, convex hyperpolyhedron, simplex,
//! 2-D polygon) that can cut itself along its last coordinate into
//! lower-dimensional regions. The `copy` module walks those cuts to copy or fill
//! matrices through the narrow `matrix` interface.
//!
//! API Policy
//! - Factories live on `Region`; concrete shapes are reachable through the enum
//!   variants and `as_*` accessors.
//! - Fast-path hooks used by the copy driver are crate-internal.

pub(crate) mod cfg;
pub mod copy;
pub mod error;
pub mod matrix;
pub mod random;
pub mod range;
pub mod region;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use copy::{copy_region, copy_region_continued, fill_region};
pub use error::RegionError;
pub use range::IRange;
pub use region::{PointMembership, Region};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::copy::{copy_region, copy_region_continued, fill_region};
    pub use crate::error::RegionError;
    pub use crate::matrix::{DenseMatrix, MatrixRead, MatrixWrite};
    pub use crate::random::{draw_polygon_radial, draw_simplex, RadialCfg, ReplayToken, VertexCount};
    pub use crate::range::IRange;
    pub use crate::region::{
        is_simplex_degenerated, ConvexHyperpolyhedron, Hyperparallelepiped, PointMembership,
        Polygon2D, Region, SectionView,
    };
}
