use held_karp_derive::New;

use crate::{DistanceMatrix, Error, Result};

/// Closed tour over city ids: starts and ends at city 0 and visits every other
/// city exactly once in between.
#[derive(Clone, Debug, PartialEq)]
pub struct Tour {
    cities: Vec<usize>,
}

impl Tour {
    /// Builds a tour after checking it is a Hamiltonian cycle of `n` cities
    /// rooted at 0.
    pub fn from_cities(cities: Vec<usize>, n: usize) -> Result<Self> {
        let tour = Self { cities };
        tour.validate(n)?;
        Ok(tour)
    }

    pub fn validate(&self, n: usize) -> Result<()> {
        if n == 0 {
            return Err(Error::invalid_dimension("a tour needs at least one city"));
        }
        if self.cities.len() != n + 1 {
            return Err(Error::invalid_input(format!(
                "tour has {} stops, expected {} for {n} cities",
                self.cities.len(),
                n + 1
            )));
        }
        if self.cities.first() != Some(&0) || self.cities.last() != Some(&0) {
            return Err(Error::invalid_input("tour must start and end at city 0"));
        }

        let mut seen = vec![false; n];
        for &city in &self.cities[1..n] {
            if city == 0 || city >= n {
                return Err(Error::invalid_input(format!(
                    "tour visits city {city}, expected one of 1..{n}"
                )));
            }
            if std::mem::replace(&mut seen[city], true) {
                return Err(Error::invalid_input(format!(
                    "tour visits city {city} more than once"
                )));
            }
        }
        Ok(())
    }

    pub fn cities(&self) -> &[usize] {
        &self.cities
    }

    /// Number of stops, origin counted at both ends.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Directed edges in travel order.
    pub fn edges(&self) -> impl DoubleEndedIterator<Item = (usize, usize)> + '_ {
        self.cities.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Total cost summed from the last edge back to the first, the same order
    /// the recurrence accumulates in, so it equals the solver's cost bit for
    /// bit.
    pub fn cost(&self, distances: &DistanceMatrix) -> f64 {
        self.edges()
            .rev()
            .fold(0.0, |acc, (from, to)| distances.cost(from, to) + acc)
    }

    /// Total cost summed in travel order, as running subtotals are shown.
    pub fn forward_cost(&self, distances: &DistanceMatrix) -> f64 {
        self.edges()
            .fold(0.0, |acc, (from, to)| acc + distances.cost(from, to))
    }

    pub fn tour_metrics(&self, distances: &DistanceMatrix) -> TourMetrics {
        let edge_costs: Vec<f64> = self
            .edges()
            .map(|(from, to)| distances.cost(from, to))
            .collect();

        if edge_costs.is_empty() {
            return TourMetrics::default();
        }

        let total: f64 = edge_costs.iter().sum();
        let average = total / edge_costs.len() as f64;
        let (longest_edge, longest) = self.edges().zip(edge_costs.iter().copied()).fold(
            ((0, 0), f64::NEG_INFINITY),
            |best, (edge, cost)| if cost > best.1 { (edge, cost) } else { best },
        );

        TourMetrics::new(edge_costs.len(), total, average, longest, longest_edge)
    }
}

#[derive(Debug, Default, PartialEq, New)]
pub struct TourMetrics {
    pub edges: usize,
    pub total: f64,
    pub average: f64,
    pub longest: f64,
    pub longest_edge: (usize, usize),
}

#[cfg(test)]
mod tests {
    use super::Tour;
    use crate::{DistanceMatrix, Error};

    fn triangle() -> DistanceMatrix {
        DistanceMatrix::from_rows(vec![
            vec![0.0, 10.0, 15.0],
            vec![10.0, 0.0, 20.0],
            vec![15.0, 20.0, 0.0],
        ])
        .expect("square")
    }

    #[test]
    fn from_cities_accepts_valid_cycles() {
        let tour = Tour::from_cities(vec![0, 2, 1, 0], 3).expect("valid tour");
        assert_eq!(tour.len(), 4);
        assert_eq!(tour.edges().collect::<Vec<_>>(), vec![(0, 2), (2, 1), (1, 0)]);

        let single = Tour::from_cities(vec![0, 0], 1).expect("single city");
        assert_eq!(single.edges().collect::<Vec<_>>(), vec![(0, 0)]);
    }

    #[test]
    fn from_cities_rejects_malformed_tours() {
        for (cities, n) in [
            (vec![0, 1, 0], 3),
            (vec![1, 2, 0, 1], 3),
            (vec![0, 1, 1, 0], 3),
            (vec![0, 1, 3, 0], 3),
            (vec![0, 0, 1, 0], 3),
        ] {
            let err = Tour::from_cities(cities.clone(), n).expect_err("malformed tour");
            assert!(matches!(err, Error::InvalidInput(_)), "{cities:?}");
        }
    }

    #[test]
    fn cost_and_forward_cost_sum_edges() {
        let tour = Tour::from_cities(vec![0, 1, 2, 0], 3).expect("valid tour");
        assert_eq!(tour.cost(&triangle()), 45.0);
        assert_eq!(tour.forward_cost(&triangle()), 45.0);
    }

    #[test]
    fn tour_metrics_reports_longest_and_average_edge() {
        let tour = Tour::from_cities(vec![0, 1, 2, 0], 3).expect("valid tour");
        let metrics = tour.tour_metrics(&triangle());

        assert_eq!(metrics.edges, 3);
        assert_eq!(metrics.total, 45.0);
        assert_eq!(metrics.average, 15.0);
        assert_eq!(metrics.longest, 20.0);
        assert_eq!(metrics.longest_edge, (1, 2));
    }
}
