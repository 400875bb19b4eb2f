//! Random regions for tests and benchmarks (radial jitter + replay tokens).
//!
//! Purpose
//! - Reproducible star-shaped polygons and non-degenerate simplices, indexable by
//!   `(seed, index)` so a failing draw can be replayed on its own.
//!
//! Model
//! - Polygon: `n` equally spaced angles plus bounded angular jitter, sorted, each
//!   with a jittered radius around `center`. Sorting keeps the boundary simple
//!   (star-shaped around `center`) but not necessarily convex.
//! - Simplex: `n+1` vertices uniform in `[origin, origin + extent)^n`, redrawn while
//!   affinely dependent.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::SIMPLEX_DRAW_ATTEMPTS;
use crate::error::RegionError;
use crate::region::{is_simplex_degenerated, Region};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(3),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Radial-jitter polygon configuration.
#[derive(Clone, Copy, Debug)]
pub struct RadialCfg {
    pub vertex_count: VertexCount,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radii are `base_radius * (1 + u)` with `u ∈ [-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    pub base_radius: f64,
    pub center: [f64; 2],
    pub random_phase: bool,
}

impl Default for RadialCfg {
    fn default() -> Self {
        Self {
            vertex_count: VertexCount::Fixed(12),
            angle_jitter_frac: 0.3,
            radial_jitter: 0.25,
            base_radius: 16.0,
            center: [0.0, 0.0],
            random_phase: true,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }

    /// Next index under the same seed.
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }
}

/// Vertices of a star-shaped polygon around `cfg.center`.
pub fn draw_polygon_vertices(cfg: RadialCfg, tok: ReplayToken) -> Vec<[f64; 2]> {
    let mut rng = tok.to_std_rng();
    let n = cfg.vertex_count.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.99);
    let r0 = cfg.base_radius.max(1e-9);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = if cfg.random_phase {
        rng.gen::<f64>() * std::f64::consts::TAU
    } else {
        0.0
    };
    let mut angles: Vec<f64> = (0..n)
        .map(|k| phase + (k as f64) * delta + (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta)
        .collect();
    angles.sort_by(f64::total_cmp);
    angles
        .into_iter()
        .map(|th| {
            let r = (1.0 + (rng.gen::<f64>() * 2.0 - 1.0) * rj) * r0;
            [cfg.center[0] + th.cos() * r, cfg.center[1] + th.sin() * r]
        })
        .collect()
}

/// Random star-shaped `Polygon2D`.
pub fn draw_polygon_radial(cfg: RadialCfg, tok: ReplayToken) -> Result<Region, RegionError> {
    Region::polygon_2d(&draw_polygon_vertices(cfg, tok))
}

/// Random non-degenerate `n`-dimensional simplex inside `[origin, origin + extent)^n`.
///
/// Errors: `InvalidArgument` if `origin.len()` is 0 or `extent` is not positive,
/// `DegenerateSimplex` if every redraw was affinely dependent.
pub fn draw_simplex(origin: &[f64], extent: f64, tok: ReplayToken) -> Result<Region, RegionError> {
    let n = origin.len();
    if n == 0 || !(extent > 0.0 && extent.is_finite()) {
        return Err(RegionError::invalid(format!(
            "cannot draw a simplex in {n} dimensions with extent {extent}"
        )));
    }
    let mut rng = tok.to_std_rng();
    for attempt in 0..SIMPLEX_DRAW_ATTEMPTS {
        let vertices: Vec<Vec<f64>> = (0..=n)
            .map(|_| origin.iter().map(|o| o + rng.gen::<f64>() * extent).collect())
            .collect();
        if !is_simplex_degenerated(&vertices)? {
            return Region::simplex(&vertices);
        }
        tracing::debug!(attempt, ?tok, "degenerate random simplex, redrawing");
    }
    Err(RegionError::degenerate(format!(
        "{SIMPLEX_DRAW_ATTEMPTS} draws of {tok:?} were all degenerate"
    )))
}
