//! Exact TSP over `(current city, visited set)` states.
//!
//! [`HeldKarpSolver`] fills the memo table bottom-up and [`PathReconstructor`]
//! replays the same choice over the finished table. Both go through
//! [`best_continuation`], so the reported cost is exactly the cost of the
//! reported tour. Nothing in this module logs.

pub mod memo;
pub mod reconstruct;
pub mod solver;
pub mod state;

use std::time::Duration;

use held_karp_derive::New;

use crate::{DistanceMatrix, Error, Result, Tour};

use memo::MemoTable;
use reconstruct::PathReconstructor;
use solver::HeldKarpSolver;
use state::{MAX_BITMASK_CITIES, State};

/// Largest problem solved without raising the ceiling explicitly.
pub const DEFAULT_MAX_CITIES: usize = 20;

/// Resource guards for one solve. Neither changes the answer when it does not
/// trigger.
#[derive(Clone, Debug, PartialEq, New)]
pub struct SolverLimits {
    /// Problems above this many cities fail with `ResourceExhausted`.
    pub max_cities: usize,
    /// Wall-clock budget for filling the memo table.
    pub time_limit: Option<Duration>,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CITIES)
    }
}

/// Optimal cost and the tour achieving it.
#[derive(Clone, Debug, PartialEq, New)]
pub struct TspSolution {
    pub min_cost: f64,
    pub tour: Tour,
}

/// Solves `distances` exactly, starting and ending at city 0.
pub fn solve_tsp_held_karp(distances: &DistanceMatrix, limits: &SolverLimits) -> Result<TspSolution> {
    let n = distances.n();
    let solution = HeldKarpSolver::new(limits.clone()).solve(distances, n)?;
    let tour = PathReconstructor::reconstruct(distances, n, &solution.memo)?;
    Ok(TspSolution::new(solution.min_cost, tour))
}

pub(crate) fn check_dimensions(distances: &DistanceMatrix, n: usize) -> Result<()> {
    if n == 0 {
        return Err(Error::invalid_dimension("need at least one city"));
    }
    if distances.n() != n {
        return Err(Error::invalid_dimension(format!(
            "n={n} but the distance matrix is {0}x{0}",
            distances.n()
        )));
    }
    if n > MAX_BITMASK_CITIES {
        return Err(Error::invalid_dimension(format!(
            "n={n} exceeds the {MAX_BITMASK_CITIES}-city visited-set width"
        )));
    }
    Ok(())
}

/// Cheapest way to leave `state`: over unvisited cities `c` in ascending order,
/// `cost(current, c) + memo[(c, visited ∪ {c})]`, keeping the first minimum.
///
/// Every successor must already be in `memo`. Returns `None` only when nothing
/// is left to visit.
#[inline]
pub(crate) fn best_continuation(
    distances: &DistanceMatrix,
    memo: &MemoTable,
    state: State,
) -> Option<(usize, f64)> {
    first_minimum(
        (0..memo.n())
            .filter(|&city| !state.visited.contains(city))
            .map(|city| {
                (
                    city,
                    distances.cost(state.current, city) + memo.value(state.advance(city)),
                )
            }),
    )
}

/// First candidate with the smallest cost. A later candidate replaces the
/// incumbent only when strictly smaller; NaN never replaces anything and is
/// replaced by any non-NaN cost.
pub(crate) fn first_minimum(
    candidates: impl IntoIterator<Item = (usize, f64)>,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (city, cost) in candidates {
        match best {
            Some((_, incumbent)) if !improves(cost, incumbent) => {}
            _ => best = Some((city, cost)),
        }
    }
    best
}

#[inline]
fn improves(candidate: f64, incumbent: f64) -> bool {
    !candidate.is_nan() && (incumbent.is_nan() || candidate < incumbent)
}
