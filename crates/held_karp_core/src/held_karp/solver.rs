use std::time::Instant;

use crate::{
    DistanceMatrix, Error, Result,
    held_karp::{
        SolverLimits, best_continuation, check_dimensions,
        memo::MemoTable,
        state::{State, VisitedSet},
    },
};

/// Subsets filled between two deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 1 << 12;

/// Optimal cost plus the table it was read from.
#[derive(Clone, Debug)]
pub struct Solution {
    pub min_cost: f64,
    pub memo: MemoTable,
}

#[derive(Clone, Debug, Default)]
pub struct HeldKarpSolver {
    limits: SolverLimits,
}

impl HeldKarpSolver {
    pub fn new(limits: SolverLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &SolverLimits {
        &self.limits
    }

    /// Fills every reachable `(current, visited)` state and returns the value
    /// of the start state.
    ///
    /// Subsets are visited in descending numeric order. Every successor
    /// `visited ∪ {c}` is numerically larger than `visited`, so it is final
    /// before anything reads it and no recursion is needed.
    pub fn solve(&self, distances: &DistanceMatrix, n: usize) -> Result<Solution> {
        check_dimensions(distances, n)?;
        if n > self.limits.max_cities {
            return Err(Error::resource_exhausted(format!(
                "n={n} exceeds the configured ceiling of {} cities",
                self.limits.max_cities
            )));
        }

        let started = Instant::now();
        let deadline = self
            .limits
            .time_limit
            .and_then(|limit| started.checked_add(limit));

        let mut memo = MemoTable::allocate(n)?;
        let full = VisitedSet::full(n);

        for current in 0..n {
            memo.insert(State::new(current, full), distances.cost(current, 0));
        }

        let origin = VisitedSet::origin();
        let subsets = (origin.bits()..full.bits()).rev().filter(|bits| bits & 1 == 1);
        for (step, bits) in subsets.enumerate() {
            if step % DEADLINE_CHECK_INTERVAL == 0
                && let Some(deadline) = deadline
                && Instant::now() >= deadline
            {
                return Err(Error::resource_exhausted(format!(
                    "time limit of {:.3}s reached after {step} subsets for n={n}",
                    (deadline - started).as_secs_f64()
                )));
            }

            let visited = VisitedSet::from_bits(bits);
            for current in 0..n {
                if !visited.contains(current) || (current == 0 && visited != origin) {
                    continue;
                }
                let state = State::new(current, visited);
                let (_, cost) = best_continuation(distances, &memo, state).ok_or_else(|| {
                    Error::other(format!("no unvisited city to leave {state} towards"))
                })?;
                memo.insert(state, cost);
            }
        }

        let min_cost = memo.value(State::start());
        Ok(Solution { min_cost, memo })
    }
}
