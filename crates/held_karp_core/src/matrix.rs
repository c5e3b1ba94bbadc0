use crate::{Error, Point, Result};

/// Immutable `n×n` travel-cost grid, stored row-major.
///
/// Entries are not validated on construction; the solver tolerates negative,
/// infinite and NaN costs. Use [`DistanceMatrix::validate_costs`] to opt in to
/// rejecting them.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    costs: Vec<f64>,
}

impl DistanceMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::invalid_dimension("distance matrix has no rows"));
        }

        let mut costs = Vec::with_capacity(n * n);
        for (idx, row) in rows.into_iter().enumerate() {
            if row.len() != n {
                return Err(Error::invalid_dimension(format!(
                    "row {idx} has {} entries, expected {n} for a {n}x{n} matrix",
                    row.len()
                )));
            }
            costs.extend(row);
        }

        Ok(Self { n, costs })
    }

    /// Euclidean distance between every ordered pair of points.
    pub fn from_points(points: &[Point]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::invalid_dimension("no points to build a matrix from"));
        }
        let costs = points
            .iter()
            .flat_map(|from| points.iter().map(move |to| from.dist(to)))
            .collect();

        Ok(Self {
            n: points.len(),
            costs,
        })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Cost of travelling `from -> to`. Panics when either index is `>= n`.
    #[inline]
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.costs[from * self.n + to]
    }

    pub fn row(&self, from: usize) -> &[f64] {
        &self.costs[from * self.n..(from + 1) * self.n]
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.cost(i, j) == self.cost(j, i)))
    }

    /// Rejects NaN, infinite and negative entries.
    pub fn validate_costs(&self) -> Result<()> {
        for from in 0..self.n {
            for (to, &cost) in self.row(from).iter().enumerate() {
                if !cost.is_finite() || cost < 0.0 {
                    return Err(Error::arithmetic_anomaly(format!(
                        "cost {from}->{to} is {cost}; expected a finite non-negative value"
                    )));
                }
            }
        }
        Ok(())
    }
}
