use std::{env, path::Path, time::Duration};

use held_karp_derive::{CliOptions, CliValue, KvDisplay};
use log::LevelFilter;

use crate::{
    Error, Result,
    generate::{DEFAULT_COORD_MAX, DEFAULT_SEED},
    held_karp::{DEFAULT_MAX_CITIES, SolverLimits, state::MAX_BITMASK_CITIES},
};

/// Runtime options for acquiring a matrix, solving it and reporting the result.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct SolverOptions {
    /// Optional input file with a matrix or points. Empty means stdin.
    #[cli(long = "input", value_name = "path")]
    #[kv(fmt = "debug")]
    pub input: String,
    /// How the input text is read.
    #[cli(
        long = "input-format",
        parse_with = "InputFormat::parse",
        value_name = "matrix|points"
    )]
    pub input_format: InputFormat,
    /// Generate this many random cities instead of reading input. 0 disables.
    #[cli(long = "random-cities")]
    pub random_cities: usize,
    /// Seed for random city generation.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Upper bound (exclusive) of generated coordinates on both axes.
    #[cli(long = "coord-max")]
    pub coord_max: f64,
    /// Largest city count the solver accepts before reporting resource exhaustion.
    #[cli(long = "max-cities")]
    pub max_cities: usize,
    /// Wall-clock budget in seconds for the solve. 0 means no limit.
    #[cli(long = "time-limit", value_name = "seconds")]
    pub time_limit: f64,
    /// Reject NaN, infinite and negative costs before solving.
    #[cli(long = "strict-costs", flag)]
    pub strict_costs: bool,
    /// Optional output file for the rendered tour. Empty means stdout.
    #[cli(long = "output", value_name = "path")]
    #[kv(fmt = "debug")]
    pub output: String,
    /// Structured logging level.
    #[cli(
        long = "log-level",
        parse_with = "LogLevel::parse",
        value_name = "error|warn|info|debug|trace|off"
    )]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(
        long = "log-format",
        parse_with = "LogFormat::parse",
        value_name = "compact|pretty"
    )]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output", value_name = "path")]
    #[kv(fmt = "debug")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "input-format")]
pub enum InputFormat {
    /// One matrix row per line.
    Matrix,
    /// Whitespace-separated `x,y` tokens, costs are Euclidean distances.
    #[cli(alias = "coords")]
    Points,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            input_format: InputFormat::Matrix,
            random_cities: 0,
            seed: DEFAULT_SEED,
            coord_max: DEFAULT_COORD_MAX,
            max_cities: DEFAULT_MAX_CITIES,
            time_limit: 0.0,
            strict_costs: false,
            output: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl SolverOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.limits()?;
        Ok(options)
    }

    pub fn usage() -> String {
        format!(
            concat!(
                "Usage:\n",
                "  held-karp [options] [--input matrix.txt]\n",
                "  held-karp [options] < matrix.txt\n",
                "  held-karp --random-cities <n> [--seed <u64>]\n\n",
                "Options:\n",
                "{}",
                "  --help\n",
                "\n",
                "Examples:\n",
                "  held-karp --input matrix.txt --output tour.txt\n",
                "  held-karp --input-format points --log-level info < points.txt\n",
                "  held-karp --random-cities 12 --seed 7 --time-limit 30\n",
                "  held-karp --strict-costs --log-level=debug --log-format=pretty < matrix.txt\n",
            ),
            Self::usage_options()
        )
    }

    /// Core-facing resource guards derived from these options.
    pub fn limits(&self) -> Result<SolverLimits> {
        if self.max_cities == 0 || self.max_cities > MAX_BITMASK_CITIES {
            return Err(Error::invalid_input(format!(
                "Invalid value for --max-cities: {} (expected 1..={MAX_BITMASK_CITIES})",
                self.max_cities
            )));
        }

        let limits = SolverLimits::new(self.max_cities);
        if self.time_limit == 0.0 {
            return Ok(limits);
        }
        let time_limit = Duration::try_from_secs_f64(self.time_limit).map_err(|e| {
            Error::invalid_input(format!(
                "Invalid value for --time-limit: {} ({e})",
                self.time_limit
            ))
        })?;
        Ok(limits.with_time_limit(time_limit))
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_stdio_path(&self.output)
    }

    pub fn input_path(&self) -> Option<&Path> {
        non_stdio_path(&self.input)
    }
}

fn non_stdio_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

#[cfg(test)]
mod tests {
    use std::{path::Path, time::Duration};

    use log::LevelFilter;

    use super::{InputFormat, LogFormat, LogLevel, SolverOptions};
    use crate::held_karp::DEFAULT_MAX_CITIES;

    #[test]
    fn log_level_maps_to_expected_filter() {
        assert_eq!(LogLevel::Error.to_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Warn.to_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Info.to_filter(), LevelFilter::Info);
        assert_eq!(LogLevel::Debug.to_filter(), LevelFilter::Debug);
        assert_eq!(LogLevel::Trace.to_filter(), LevelFilter::Trace);
        assert_eq!(LogLevel::Off.to_filter(), LevelFilter::Off);
    }

    #[test]
    fn cli_values_parse_aliases_and_display_canonically() {
        assert_eq!(LogLevel::parse("WARNING").expect("alias"), LogLevel::Warn);
        assert_eq!(
            "coords".parse::<InputFormat>().expect("alias"),
            InputFormat::Points
        );
        assert_eq!(InputFormat::Points.to_string(), "points");
        assert_eq!(InputFormat::VALUES, &["matrix", "points"]);

        let err = LogFormat::parse("fancy").expect_err("unknown format");
        assert!(
            err.to_string()
                .contains("Invalid value for --log-format: fancy (expected compact|pretty)")
        );
    }

    #[test]
    fn parse_from_iter_applies_known_cli_options() {
        let options = SolverOptions::parse_from_iter([
            "--input=matrix.txt",
            "--input-format=points",
            "--random-cities=9",
            "--seed=77",
            "--coord-max=250.5",
            "--max-cities=16",
            "--time-limit=2.5",
            "--strict-costs",
            "--output=tour.txt",
            "--log-level=debug",
            "--log-format=pretty",
            "--log-timestamp=false",
            "--log-output=run.log",
        ])
        .expect("parse options");

        assert_eq!(options.input, "matrix.txt");
        assert_eq!(options.input_format, InputFormat::Points);
        assert_eq!(options.random_cities, 9);
        assert_eq!(options.seed, 77);
        assert_eq!(options.coord_max, 250.5);
        assert_eq!(options.max_cities, 16);
        assert_eq!(options.time_limit, 2.5);
        assert!(options.strict_costs);
        assert_eq!(options.output, "tour.txt");
        assert_eq!(options.log_level, LogLevel::Debug);
        assert_eq!(options.log_format, LogFormat::Pretty);
        assert!(!options.log_timestamp);
        assert_eq!(options.log_output, "run.log");
    }

    #[test]
    fn parse_from_iter_accepts_space_separated_values() {
        let options = SolverOptions::parse_from_iter(["--random-cities", "5", "--seed", "3"])
            .expect("parse options");
        assert_eq!(options.random_cities, 5);
        assert_eq!(options.seed, 3);
    }

    #[test]
    fn parse_from_iter_accepts_negated_flags() {
        let options =
            SolverOptions::parse_from_iter(["--no-log-timestamp", "--no-strict-costs"])
                .expect("parse options");
        assert!(!options.log_timestamp);
        assert!(!options.strict_costs);
    }

    #[test]
    fn parse_from_iter_rejects_negated_flag_with_value() {
        let err = SolverOptions::parse_from_iter(["--no-log-timestamp=true"])
            .expect_err("expected flag value rejection");
        assert!(err.to_string().contains("does not take a value"));
    }

    #[test]
    fn parse_from_iter_rejects_bad_boolean() {
        let err = SolverOptions::parse_from_iter(["--strict-costs=maybe"])
            .expect_err("invalid bool should fail");
        assert!(
            err.to_string()
                .contains("Invalid boolean for --strict-costs: maybe")
        );
    }

    #[test]
    fn parse_from_iter_rejects_unknown_option() {
        let err = SolverOptions::parse_from_iter(["--lkh-exe=/bin/lkh"])
            .expect_err("expected unknown option error");
        assert!(err.to_string().contains("Unknown option: --lkh-exe"));
    }

    #[test]
    fn parse_from_iter_rejects_unexpected_positional_argument() {
        let err =
            SolverOptions::parse_from_iter(["matrix.txt"]).expect_err("expected positional error");
        assert!(err.to_string().contains("Unexpected argument: matrix.txt"));
    }

    #[test]
    fn parse_from_iter_requires_value_for_seed() {
        let err = SolverOptions::parse_from_iter(["--seed"]).expect_err("missing value");
        assert!(err.to_string().contains("Missing value for --seed"));
    }

    #[test]
    fn parse_from_iter_rejects_non_numeric_values() {
        let err =
            SolverOptions::parse_from_iter(["--max-cities=many"]).expect_err("not a number");
        assert!(err.to_string().contains("Invalid value for --max-cities: many"));
    }

    #[test]
    fn parse_from_iter_help_returns_usage_error() {
        let err =
            SolverOptions::parse_from_iter(["--help"]).expect_err("help should short-circuit");
        let message = err.to_string();
        assert!(message.contains("Usage:"));
        assert!(message.contains("  --random-cities <usize>\n"));
        assert!(message.contains("  --strict-costs[=<bool>]\n  --no-strict-costs\n"));
        assert!(message.contains("  --input-format <matrix|points>\n"));
    }

    #[test]
    fn limits_follow_max_cities_and_time_limit() {
        let limits = SolverOptions::default().limits().expect("defaults");
        assert_eq!(limits.max_cities, DEFAULT_MAX_CITIES);
        assert_eq!(limits.time_limit, None);

        let options = SolverOptions {
            max_cities: 12,
            time_limit: 1.5,
            ..SolverOptions::default()
        };
        let limits = options.limits().expect("custom limits");
        assert_eq!(limits.max_cities, 12);
        assert_eq!(limits.time_limit, Some(Duration::from_millis(1500)));
    }

    #[test]
    fn limits_reject_out_of_range_values() {
        for max_cities in [0, 33] {
            let options = SolverOptions {
                max_cities,
                ..SolverOptions::default()
            };
            let err = options.limits().expect_err("bad ceiling");
            assert!(err.to_string().contains("--max-cities"));
        }

        for time_limit in [-1.0, f64::NAN] {
            let options = SolverOptions {
                time_limit,
                ..SolverOptions::default()
            };
            let err = options.limits().expect_err("bad time limit");
            assert!(err.to_string().contains("--time-limit"));
        }
    }

    #[test]
    fn stdio_paths_treat_empty_and_dash_as_streams() {
        let options = SolverOptions::default();
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert!(options.log_output_path().is_none());

        let options = SolverOptions {
            input: "-".to_string(),
            output: " - ".to_string(),
            log_output: "logs/run.log".to_string(),
            ..SolverOptions::default()
        };
        assert!(options.input_path().is_none());
        assert!(options.output_path().is_none());
        assert_eq!(
            options.log_output_path().expect("path should exist"),
            Path::new("logs/run.log")
        );
    }

    #[test]
    fn display_lists_every_option() {
        let rendered = SolverOptions::default().to_string();
        assert!(rendered.contains("input_format  = matrix"));
        assert!(rendered.contains("max_cities    = 20"));
        assert!(rendered.contains("output        = \"\""));
    }
}
