use std::time::{Duration, Instant};

use held_karp_derive::New;

use crate::{
    ProblemInput, Result, SolverOptions, Tour, held_karp::memo::MemoTable, solve_tsp_held_karp,
};

/// What the presenter needs after a run.
#[derive(Debug, New)]
pub struct Report {
    pub min_cost: f64,
    pub tour: Tour,
    pub elapsed: Duration,
}

/// Applies the optional cost validation, solves, and logs timing and tour
/// metrics.
pub fn run(input: &ProblemInput, options: &SolverOptions) -> Result<Report> {
    let distances = input.matrix();
    let n = distances.n();

    if options.strict_costs {
        distances.validate_costs()?;
        log::debug!("input: costs validated n={n}");
    }
    let limits = options.limits()?;

    log::info!(
        "solve: n={n} states={} symmetric={} max_cities={}",
        MemoTable::slots_for(n).map_or_else(|| "overflow".to_string(), |s| s.to_string()),
        distances.is_symmetric(),
        limits.max_cities
    );

    let started = Instant::now();
    let solution = solve_tsp_held_karp(distances, &limits)
        .inspect_err(|err| log::error!("solve: failed n={n} err={err}"))?;
    let elapsed = started.elapsed();

    log::info!(
        "solve: min_cost={} time={:.3}s",
        solution.min_cost,
        elapsed.as_secs_f64()
    );

    let metrics = solution.tour.tour_metrics(distances);
    log::info!(
        "metrics: edges={} total={} longest={} longest_edge={}->{} avg={}",
        metrics.edges,
        metrics.total,
        metrics.longest,
        metrics.longest_edge.0,
        metrics.longest_edge.1,
        metrics.average
    );
    log::debug!("tour: {:?}", solution.tour.cities());

    Ok(Report::new(solution.min_cost, solution.tour, elapsed))
}
