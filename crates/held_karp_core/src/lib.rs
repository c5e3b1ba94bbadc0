//! Exact travelling-salesman tours for small inputs via the Held-Karp dynamic
//! program, plus the matrix acquisition and presentation around it.

mod error;
mod generate;
pub mod held_karp;
mod io;
pub mod logging;
mod matrix;
mod point;
pub mod runner;
mod tour;

pub(crate) use io::options;

pub use error::{Error, Result};
pub use generate::{DEFAULT_COORD_MAX, DEFAULT_SEED, random_euclidean_matrix, random_points};
pub use held_karp::{
    DEFAULT_MAX_CITIES, SolverLimits, TspSolution,
    memo::MemoTable,
    reconstruct::PathReconstructor,
    solve_tsp_held_karp,
    solver::{HeldKarpSolver, Solution},
    state::{MAX_BITMASK_CITIES, State, VisitedSet},
};
pub use io::input::ProblemInput;
pub use io::options::{InputFormat, LogFormat, LogLevel, SolverOptions};
pub use io::output::{render_tour, write_tour};
pub use matrix::DistanceMatrix;
pub use point::Point;
pub use tour::{Tour, TourMetrics};
