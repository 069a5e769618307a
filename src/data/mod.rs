//! Data acquisition and representation.
//!
//! This module handles building a validated [`Dataset`] from operator input,
//! generated sequences, or a table file.

mod dataset;
mod loader;
mod source;

pub use dataset::{auto_label, Dataset, Series};
pub use loader::{CsvTableLoader, Table, TableLoader};
pub use source::{
    arithmetic, check_generated_size, dataset_from_table, linspace, parse_count, parse_number,
    parse_values, random_values, AcquisitionMethod, DataSource, MAX_GENERATED_VALUES,
    RANDOM_X_START, RANDOM_X_STOP, RANDOM_Y_SCALE,
};
