//! Dataset and series types.

use crate::error::{PlotError, Result};

/// One labelled Y sequence paired positionally with the shared X values.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    /// Legend label.
    pub label: String,
    /// Y values, one per X value.
    pub values: Vec<f64>,
}

impl Series {
    /// Create a new series.
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
        }
    }
}

/// Validated X values plus one or more equal-length series.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x_values: Vec<f64>,
    series: Vec<Series>,
}

impl Dataset {
    /// Create a dataset, checking that X is non-empty, there is at least one
    /// series and every series matches the X length.
    pub fn new(x_values: Vec<f64>, series: Vec<Series>) -> Result<Self> {
        if x_values.is_empty() {
            return Err(PlotError::validation("X values cannot be empty"));
        }
        if series.is_empty() {
            return Err(PlotError::validation("A dataset needs at least one Y series"));
        }
        if let Some(bad) = series.iter().find(|s| s.values.len() != x_values.len()) {
            return Err(PlotError::validation(format!(
                "Length of {} must be equal to the length of X ({} != {})",
                bad.label,
                bad.values.len(),
                x_values.len()
            )));
        }

        Ok(Self { x_values, series })
    }

    /// Shared X values.
    pub fn x_values(&self) -> &[f64] {
        &self.x_values
    }

    /// Series in entry order.
    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of series.
    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Number of X values (and values per series).
    pub fn len(&self) -> usize {
        self.x_values.len()
    }

    /// Always false for a constructed dataset.
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }

    /// Series labels in order.
    pub fn labels(&self) -> Vec<String> {
        self.series.iter().map(|s| s.label.clone()).collect()
    }

    /// Replace every series label.
    pub(crate) fn relabel(&mut self, labels: Vec<String>) -> Result<()> {
        if labels.len() != self.series.len() {
            return Err(PlotError::validation(format!(
                "Expected {} labels, got {}",
                self.series.len(),
                labels.len()
            )));
        }
        for (series, label) in self.series.iter_mut().zip(labels) {
            series.label = label;
        }
        Ok(())
    }
}

/// Generated label for the series at `index`: `Y1`, `Y2`, ...
pub fn auto_label(index: usize) -> String {
    format!("Y{}", index + 1)
}
