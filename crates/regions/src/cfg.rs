//! Fixed tunables (internal).
//!
//! Policy
//! - Constants, not runtime configuration. Region predicates are exact `f64`
//!   comparisons, so there are no tolerances to tune here.

/// Simplex dimension above which the O(n!) cofactor construction gets slow enough
/// to log a warning. Construction still proceeds.
pub(crate) const SIMPLEX_DIM_ADVISORY: usize = 7;
/// Redraws before `random::draw_simplex` gives up on a degenerate vertex set.
pub(crate) const SIMPLEX_DRAW_ATTEMPTS: usize = 16;
