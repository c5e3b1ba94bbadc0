use crate::{
    DistanceMatrix, Error, Result, Tour,
    held_karp::{best_continuation, check_dimensions, memo::MemoTable, state::State},
};

/// Recovers the optimal visiting order from a completed memo table.
pub struct PathReconstructor;

impl PathReconstructor {
    /// Walks from the origin, each step taking the city that
    /// [`best_continuation`] picks: one edge plus a memoized remainder, with
    /// the solver's tie-break. No sub-problem is recomputed.
    pub fn reconstruct(distances: &DistanceMatrix, n: usize, memo: &MemoTable) -> Result<Tour> {
        check_dimensions(distances, n)?;
        if memo.n() != n {
            return Err(Error::invalid_dimension(format!(
                "memo table was built for n={} but n={n}",
                memo.n()
            )));
        }

        let mut cities = Vec::with_capacity(n + 1);
        cities.push(0);

        let mut state = State::start();
        for _ in 1..n {
            let (next, _) = best_continuation(distances, memo, state).ok_or_else(|| {
                Error::other(format!("no unvisited city to leave {state} towards"))
            })?;
            cities.push(next);
            state = state.advance(next);
        }
        cities.push(0);

        Tour::from_cities(cities, n)
    }
}

#[cfg(test)]
mod tests {
    use super::PathReconstructor;
    use crate::{DistanceMatrix, Error, held_karp::solver::HeldKarpSolver};

    fn square(rows: Vec<Vec<f64>>) -> DistanceMatrix {
        DistanceMatrix::from_rows(rows).expect("square")
    }

    #[test]
    fn reconstruct_closes_the_tour_at_the_origin() {
        let distances = square(vec![
            vec![0.0, 2.0, 9.0, 10.0],
            vec![1.0, 0.0, 6.0, 4.0],
            vec![15.0, 7.0, 0.0, 8.0],
            vec![6.0, 3.0, 12.0, 0.0],
        ]);
        let solution = HeldKarpSolver::default().solve(&distances, 4).expect("solve");
        let tour =
            PathReconstructor::reconstruct(&distances, 4, &solution.memo).expect("reconstruct");

        assert_eq!(tour.cities(), &[0, 2, 3, 1, 0]);
        assert_eq!(tour.cost(&distances), solution.min_cost);
        assert_eq!(solution.min_cost, 21.0);
    }

    #[test]
    fn reconstruct_rejects_memo_of_another_dimension() {
        let small = square(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let large = square(vec![vec![0.0; 3]; 3]);
        let solution = HeldKarpSolver::default().solve(&small, 2).expect("solve");

        let err = PathReconstructor::reconstruct(&large, 3, &solution.memo)
            .expect_err("memo for n=2");
        assert!(matches!(err, Error::InvalidDimension(_)));
    }

    #[test]
    fn reconstruct_rejects_n_disagreeing_with_matrix() {
        let distances = square(vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        let solution = HeldKarpSolver::default().solve(&distances, 2).expect("solve");

        let err = PathReconstructor::reconstruct(&distances, 3, &solution.memo)
            .expect_err("n=3 for 2x2");
        assert!(matches!(err, Error::InvalidDimension(_)));
    }
}
