use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{DistanceMatrix, Error, Point, Result};

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_COORD_MAX: f64 = 100.0;

/// `count` points drawn uniformly from `[0, coord_max)²`. The same seed always
/// yields the same points.
pub fn random_points(count: usize, seed: u64, coord_max: f64) -> Result<Vec<Point>> {
    if count == 0 {
        return Err(Error::invalid_dimension("cannot generate zero cities"));
    }
    if !coord_max.is_finite() || coord_max <= 0.0 {
        return Err(Error::invalid_input(format!(
            "coord-max must be a finite value > 0, got {coord_max}"
        )));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..count)
        .map(|_| Point::new(rng.random_range(0.0..coord_max), rng.random_range(0.0..coord_max)))
        .collect())
}

pub fn random_euclidean_matrix(count: usize, seed: u64, coord_max: f64) -> Result<DistanceMatrix> {
    DistanceMatrix::from_points(&random_points(count, seed, coord_max)?)
}
