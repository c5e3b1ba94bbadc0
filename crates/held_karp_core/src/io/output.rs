use std::{fmt::Write as _, fs, io::Write as _};

use crate::{DistanceMatrix, Result, Tour, options::SolverOptions};

/// Renders the tour line, one line per edge with its running subtotal, and the
/// optimal total.
pub fn render_tour(distances: &DistanceMatrix, tour: &Tour, min_cost: f64) -> String {
    let mut cost_buf = ryu::Buffer::new();
    let mut subtotal_buf = ryu::Buffer::new();
    let mut out = String::new();

    let order: Vec<String> = tour.cities().iter().map(usize::to_string).collect();
    let _ = writeln!(out, "tour: {}", order.join(" -> "));

    let mut subtotal = 0.0;
    for (from, to) in tour.edges() {
        let cost = distances.cost(from, to);
        subtotal += cost;
        let _ = writeln!(
            out,
            "{from} -> {to}: {} (subtotal {})",
            cost_buf.format(cost),
            subtotal_buf.format(subtotal)
        );
    }

    let _ = writeln!(out, "total: {}", cost_buf.format(min_cost));
    out
}

/// Writes the rendered tour to `--output`, or stdout when unset.
pub fn write_tour(
    options: &SolverOptions,
    distances: &DistanceMatrix,
    tour: &Tour,
    min_cost: f64,
) -> Result<()> {
    let rendered = render_tour(distances, tour, min_cost);
    match options.output_path() {
        Some(path) => fs::write(path, rendered)?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
