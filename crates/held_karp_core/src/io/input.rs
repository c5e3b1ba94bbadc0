use std::{fs, io::Read};

use held_karp_derive::KvDisplay;

use crate::{
    DistanceMatrix, Error, Point, Result, generate,
    options::{InputFormat, SolverOptions},
};

/// A distance matrix and a short description of where it came from.
#[derive(Clone, Debug, KvDisplay)]
pub struct ProblemInput {
    pub(crate) source: String,
    #[kv(name = "cities", fmt = "len")]
    pub(crate) matrix: DistanceMatrix,
}

impl ProblemInput {
    pub fn new(source: impl Into<String>, matrix: DistanceMatrix) -> Self {
        Self {
            source: source.into(),
            matrix,
        }
    }

    /// Generates random cities when `--random-cities` is set, otherwise reads
    /// `--input` (or stdin) in the configured format.
    pub fn from_options(options: &SolverOptions) -> Result<Self> {
        if options.random_cities > 0 {
            let matrix = generate::random_euclidean_matrix(
                options.random_cities,
                options.seed,
                options.coord_max,
            )?;
            return Ok(Self::new(
                format!("random(seed={}, coord_max={})", options.seed, options.coord_max),
                matrix,
            ));
        }

        let (source, text) = match options.input_path() {
            Some(path) => (path.display().to_string(), fs::read_to_string(path)?),
            None => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                ("stdin".to_string(), text)
            }
        };

        Ok(Self::new(source, parse_input(&text, options.input_format)?))
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn n(&self) -> usize {
        self.matrix.n()
    }
}

pub(crate) fn parse_input(text: &str, format: InputFormat) -> Result<DistanceMatrix> {
    match format {
        InputFormat::Matrix => parse_matrix(text),
        InputFormat::Points => DistanceMatrix::from_points(&parse_points(text)?),
    }
}

/// One row per non-blank line, values separated by whitespace and/or commas.
/// Lines starting with `#` are ignored.
fn parse_matrix(text: &str) -> Result<DistanceMatrix> {
    let mut rows = Vec::new();
    for (line_idx, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|tok| !tok.is_empty())
            .enumerate()
            .map(|(col_idx, tok)| {
                tok.parse::<f64>().map_err(|_| {
                    Error::invalid_input(format!(
                        "Line {}, column {}: invalid cost: {tok}",
                        line_idx + 1,
                        col_idx + 1
                    ))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(Error::invalid_input("No matrix rows provided."));
    }

    DistanceMatrix::from_rows(rows)
}

fn parse_points(text: &str) -> Result<Vec<Point>> {
    let mut points = Vec::new();
    for (idx, tok) in text.split_whitespace().enumerate() {
        let mut it = tok.split(',');
        let x_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing x", idx + 1)))?;
        let y_s = it
            .next()
            .ok_or_else(|| Error::invalid_input(format!("Token {}: missing y", idx + 1)))?;

        if it.next().is_some() {
            return Err(Error::invalid_input(format!(
                "Token {}: expected 'x,y' but got extra comma fields: {tok}",
                idx + 1
            )));
        }

        let x: f64 = x_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid x: {x_s}", idx + 1))
        })?;
        let y: f64 = y_s.parse().map_err(|_| {
            Error::invalid_input(format!("Token {}: invalid y: {y_s}", idx + 1))
        })?;

        let point = Point::new(x, y);
        if !point.is_valid() {
            return Err(Error::invalid_input(format!(
                "Token {}: coordinates must be finite: {tok}",
                idx + 1
            )));
        }
        points.push(point);
    }

    if points.is_empty() {
        return Err(Error::invalid_input("No points provided."));
    }

    Ok(points)
}
