//! Dataset acquisition strategies.
//!
//! Four ways to fill a [`Dataset`]: typed in by hand, random, arithmetic
//! ranges, or loaded from a table file. Each strategy re-prompts on bad input
//! and only returns once it holds a valid dataset.

use super::dataset::{auto_label, Dataset, Series};
use super::loader::{Table, TableLoader};
use crate::error::{PlotError, Result};
use crate::prompt::{ask_until, retry, Prompter};
use rand::Rng;
use std::path::Path;
use tracing::debug;

/// Lower bound of generated X values.
pub const RANDOM_X_START: f64 = 0.0;
/// Upper bound of generated X values (inclusive).
pub const RANDOM_X_STOP: f64 = 10.0;
/// Random Y values are drawn from `[0, RANDOM_Y_SCALE)`.
pub const RANDOM_Y_SCALE: f64 = 10.0;
/// Most values a single generated dataset may hold, X included.
pub const MAX_GENERATED_VALUES: usize = 10_000_000;

/// How the operator wants to obtain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionMethod {
    /// Type X and Y values.
    Manual,
    /// Uniform random Y values over evenly spaced X.
    Random,
    /// Arithmetic sequences.
    Range,
    /// Columns of a CSV file.
    Table,
}

impl AcquisitionMethod {
    /// Every method, in menu order.
    pub const ALL: [AcquisitionMethod; 4] = [Self::Manual, Self::Random, Self::Range, Self::Table];

    /// Menu text.
    pub fn name(self) -> &'static str {
        match self {
            Self::Manual => "Fill Data Manually",
            Self::Random => "Generate Random Data",
            Self::Range => "Generate Data in a Range",
            Self::Table => "Load Data from CSV",
        }
    }

    /// Menu lines, `<index>. <name>`.
    pub fn menu() -> Vec<String> {
        Self::ALL
            .iter()
            .enumerate()
            .map(|(i, method)| format!("{}. {}", i + 1, method.name()))
            .collect()
    }

    /// Resolve a menu response.
    pub fn select(input: &str) -> Result<Self> {
        input
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|choice| choice.checked_sub(1))
            .and_then(|index| Self::ALL.get(index).copied())
            .ok_or_else(|| PlotError::invalid_selection("data input method", input.trim()))
    }
}

/// Parse a whitespace-separated list of numbers.
pub fn parse_values(input: &str) -> Result<Vec<f64>> {
    input.split_whitespace().map(parse_number).collect()
}

/// Parse one number.
pub fn parse_number(input: &str) -> Result<f64> {
    input
        .trim()
        .parse::<f64>()
        .map_err(|_| PlotError::validation(format!("could not convert {:?} to a number", input.trim())))
}

/// Parse a strictly positive count; `what` names it in the error.
pub fn parse_count(input: &str, what: &str) -> Result<usize> {
    let count = input
        .trim()
        .parse::<i64>()
        .map_err(|_| PlotError::validation(format!("{:?} is not a whole number", input.trim())))?;
    if count <= 0 {
        return Err(PlotError::validation(format!(
            "{} must be greater than zero",
            what
        )));
    }
    usize::try_from(count).map_err(|_| PlotError::validation(format!("{} is too large", what)))
}

/// Reject generated shapes of `series` series by `len` points that would
/// not fit in [`MAX_GENERATED_VALUES`].
pub fn check_generated_size(series: usize, len: usize) -> Result<()> {
    series
        .checked_add(1)
        .and_then(|columns| columns.checked_mul(len))
        .filter(|&total| total <= MAX_GENERATED_VALUES)
        .map(drop)
        .ok_or_else(|| {
            PlotError::validation(format!(
                "{} series of length {} exceed the limit of {} generated values",
                series, len, MAX_GENERATED_VALUES
            ))
        })
}

/// `len` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, len: usize) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (len - 1) as f64;
            let mut values: Vec<f64> = (0..len).map(|i| start + i as f64 * step).collect();
            values[len - 1] = stop;
            values
        }
    }
}

/// `start, start + step, ...` computed as `start + i * step` so long
/// sequences do not accumulate rounding error.
pub fn arithmetic(start: f64, step: f64, len: usize) -> Vec<f64> {
    (0..len).map(|i| start + i as f64 * step).collect()
}

/// `len` uniform values in `[0, RANDOM_Y_SCALE)`.
pub fn random_values<R: Rng>(rng: &mut R, len: usize) -> Vec<f64> {
    (0..len)
        .map(|_| rng.random::<f64>() * RANDOM_Y_SCALE)
        .collect()
}

/// Column 0 becomes X, every other column a series labelled `Y1`, `Y2`, ...
pub fn dataset_from_table(table: Table) -> Result<Dataset> {
    let mut columns = table.into_columns().into_iter();
    let x_values = columns
        .next()
        .ok_or_else(|| PlotError::validation("table has no columns"))?;
    let series = columns
        .enumerate()
        .map(|(i, values)| Series::new(auto_label(i), values))
        .collect();
    Dataset::new(x_values, series)
}

/// Produces datasets with the four acquisition strategies.
#[derive(Debug)]
pub struct DataSource<L, R> {
    loader: L,
    rng: R,
}

impl<L: TableLoader, R: Rng> DataSource<L, R> {
    /// Create a data source using `loader` for files and `rng` for random data.
    pub fn new(loader: L, rng: R) -> Self {
        Self { loader, rng }
    }

    /// Run the strategy for `method`.
    pub fn acquire<P: Prompter + ?Sized>(
        &mut self,
        method: AcquisitionMethod,
        prompter: &mut P,
    ) -> Result<Dataset> {
        let dataset = match method {
            AcquisitionMethod::Manual => self.manual(prompter)?,
            AcquisitionMethod::Random => self.random(prompter)?,
            AcquisitionMethod::Range => self.range(prompter)?,
            AcquisitionMethod::Table => self.table(prompter)?,
        };
        debug!(
            ?method,
            points = dataset.len(),
            series = dataset.series_count(),
            "dataset acquired"
        );
        Ok(dataset)
    }

    /// Typed X values, then per-series labels and values.
    pub fn manual<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<Dataset> {
        let x_values = ask_until(prompter, "Enter X values (space-separated): ", |s| {
            let values = parse_values(s)?;
            if values.is_empty() {
                return Err(PlotError::validation("X values cannot be empty"));
            }
            Ok(values)
        })?;

        let count = ask_until(prompter, "How many Y datasets do you want to enter? ", |s| {
            parse_count(s, "Number of Y datasets")
        })?;

        // Grows as series are entered; `count` is operator input.
        let mut series = Vec::new();
        for i in 0..count {
            // A bad value list asks for this series' label again too.
            let entry = retry(prompter, |p| {
                let label = p.ask(&format!("Enter label for {}: ", auto_label(i)))?;
                let values = parse_values(&p.ask(&format!(
                    "Enter values for {} (space-separated): ",
                    label
                ))?)?;
                if values.len() != x_values.len() {
                    return Err(PlotError::validation(format!(
                        "Length of {} must be equal to the length of X",
                        label
                    )));
                }
                Ok(Series::new(label, values))
            })?;
            series.push(entry);
        }

        Dataset::new(x_values, series)
    }

    /// Evenly spaced X over `[0, 10]` and uniform random series.
    pub fn random<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<Dataset> {
        let count = ask_until(prompter, "How many Y datasets do you want to generate? ", |s| {
            let count = parse_count(s, "Number of Y datasets")?;
            check_generated_size(count, 1)?;
            Ok(count)
        })?;
        let len = ask_until(prompter, "Enter the length of X data: ", |s| {
            let len = parse_count(s, "Length")?;
            check_generated_size(count, len)?;
            Ok(len)
        })?;

        self.generate_random(count, len)
    }

    /// The non-interactive part of [`DataSource::random`].
    pub fn generate_random(&mut self, count: usize, len: usize) -> Result<Dataset> {
        check_generated_size(count, len)?;
        let x_values = linspace(RANDOM_X_START, RANDOM_X_STOP, len);
        let series = (0..count)
            .map(|i| Series::new(auto_label(i), random_values(&mut self.rng, len)))
            .collect();
        Dataset::new(x_values, series)
    }

    /// Arithmetic X and per-series arithmetic Y sequences.
    pub fn range<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<Dataset> {
        let start = ask_until(prompter, "Enter the start for X: ", parse_number)?;
        let step = ask_until(prompter, "Enter the distance between two X values: ", parse_number)?;
        let len = ask_until(prompter, "Enter the length of X data: ", |s| {
            let len = parse_count(s, "Length")?;
            check_generated_size(1, len)?;
            Ok(len)
        })?;
        let x_values = arithmetic(start, step, len);

        let count = ask_until(prompter, "How many Y datasets do you want to enter? ", |s| {
            parse_count(s, "Number of Y datasets")
        })?;

        let mut series = Vec::new();
        for i in 0..count {
            let label = prompter.ask(&format!("Enter label for {}: ", auto_label(i)))?;
            let y_start = ask_until(
                prompter,
                &format!("Enter the start for {}: ", label),
                parse_number,
            )?;
            let y_step = ask_until(
                prompter,
                &format!("Enter the distance between two {} values: ", label),
                parse_number,
            )?;
            series.push(Series::new(label, arithmetic(y_start, y_step, len)));
        }

        Dataset::new(x_values, series)
    }

    /// Columns of a table file; a failed load asks for another path.
    pub fn table<P: Prompter + ?Sized>(&mut self, prompter: &mut P) -> Result<Dataset> {
        let loader = &self.loader;
        ask_until(prompter, "Enter CSV file path: ", |s| {
            let table = loader.load(Path::new(s.trim()))?;
            dataset_from_table(table)
        })
    }
}
