use log::info;

use held_karp_core::{ProblemInput, Result, SolverOptions, logging, runner, write_tour};

fn main() -> Result<()> {
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;
    let input = ProblemInput::from_options(&options)?;

    info!("input: {input}");
    info!("options: {options}");

    let report = runner::run(&input, &options)?;
    write_tour(&options, input.matrix(), &report.tour, report.min_cost)?;

    info!(
        "output: n={} min_cost={} time={:.3}s",
        input.n(),
        report.min_cost,
        report.elapsed.as_secs_f64()
    );

    Ok(())
}
