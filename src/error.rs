//! Error types for Uniplot.
//!
//! This module provides a unified error handling approach using `thiserror`.
//! Input errors (`Validation`, `InvalidSelection`, `Loader`) are recovered at
//! the prompt that produced them; everything else ends the session.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Uniplot operations.
pub type Result<T> = std::result::Result<T, PlotError>;

/// Errors that can occur in Uniplot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Malformed, empty or length-mismatched numeric input.
    #[error("{0}")]
    Validation(String),

    /// A menu index outside the catalog.
    #[error("Invalid {catalog} selection: {input:?}")]
    InvalidSelection {
        /// Catalog the index was looked up in.
        catalog: &'static str,
        /// What the operator typed.
        input: String,
    },

    /// The table loader could not produce a table.
    #[error("Failed to load {path}: {reason}")]
    Loader {
        /// Path the operator supplied.
        path: PathBuf,
        /// Why loading failed.
        reason: String,
    },

    /// Per-series arguments shorter than the series list at render time.
    #[error("{what} has {available} entries but there are {required} series")]
    IndexMismatch {
        /// Which argument list was short.
        what: &'static str,
        /// Number of series to draw.
        required: usize,
        /// Number of entries available.
        available: usize,
    },

    /// A session stage was driven out of order.
    #[error("Session is in stage {actual}, expected {expected}")]
    OutOfOrder {
        /// Stage the call belongs to.
        expected: &'static str,
        /// Stage the session is in.
        actual: &'static str,
    },

    /// Operator input ended before the session completed.
    #[error("Input closed before the session completed")]
    InputClosed,

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal error.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl PlotError {
    /// Create a Validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an InvalidSelection error.
    pub fn invalid_selection(catalog: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidSelection {
            catalog,
            input: input.into(),
        }
    }

    /// Create a Loader error.
    pub fn loader(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Loader {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the prompt that produced this error should simply ask again.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::InvalidSelection { .. } | Self::Loader { .. }
        )
    }
}
