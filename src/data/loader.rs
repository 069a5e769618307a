//! Table loading.
//!
//! The acquisition stage only needs "a rectangular numeric table with at
//! least two columns" from a path. [`TableLoader`] is that seam;
//! [`CsvTableLoader`] is the implementation the binary uses.

use crate::error::{PlotError, Result};
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// A rectangular table of numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<Vec<f64>>,
}

impl Table {
    /// Build a table from rows, transposing into columns.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if rows.is_empty() {
            return Err(PlotError::validation("table has no data rows"));
        }
        if width < 2 {
            return Err(PlotError::validation(format!(
                "table needs at least 2 columns, found {}",
                width
            )));
        }
        if let Some(row) = rows.iter().position(|r| r.len() != width) {
            return Err(PlotError::validation(format!(
                "row {} has {} columns, expected {}",
                row + 1,
                rows[row].len(),
                width
            )));
        }

        let mut columns = vec![Vec::with_capacity(rows.len()); width];
        for row in rows {
            for (column, value) in columns.iter_mut().zip(row) {
                column.push(value);
            }
        }
        Ok(Self { columns })
    }

    /// Columns in file order.
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    /// Consume the table, yielding its columns.
    pub fn into_columns(self) -> Vec<Vec<f64>> {
        self.columns
    }
}

/// Something that turns a path into a [`Table`].
pub trait TableLoader {
    /// Load the table at `path`, failing with [`PlotError::Loader`].
    fn load(&self, path: &Path) -> Result<Table>;
}

/// Comma-separated file loader.
///
/// A first row with any non-numeric field is treated as a header and skipped.
/// A fully numeric first row is data, so headerless files keep every row
/// instead of losing the first one to a header that is not there.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvTableLoader;

impl CsvTableLoader {
    /// Create a new CSV loader.
    pub fn new() -> Self {
        Self
    }
}

impl TableLoader for CsvTableLoader {
    fn load(&self, path: &Path) -> Result<Table> {
        let file = File::open(path).map_err(|e| PlotError::loader(path, e))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut rows = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(|e| PlotError::loader(path, e))?;
            let parsed: std::result::Result<Vec<f64>, _> =
                record.iter().map(|field| field.parse::<f64>()).collect();

            match parsed {
                Ok(row) => rows.push(row),
                Err(_) if index == 0 => {
                    debug!(path = %path.display(), "skipping header row");
                }
                Err(e) => {
                    return Err(PlotError::loader(
                        path,
                        format!("row {}: {}", index + 1, e),
                    ));
                }
            }
        }

        let table = Table::from_rows(rows).map_err(|e| PlotError::loader(path, e))?;
        debug!(
            path = %path.display(),
            columns = table.columns().len(),
            rows = table.row_count(),
            "loaded table"
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn loads_with_header() {
        let file = csv_file("t,a,b\n0,1,2\n1,3,4\n");
        let table = CsvTableLoader.load(file.path()).unwrap();
        assert_eq!(
            table.columns(),
            &[vec![0.0, 1.0], vec![1.0, 3.0], vec![2.0, 4.0]]
        );
    }

    #[test]
    fn loads_without_header() {
        let file = csv_file(" 1 , 2\n3,4\n");
        let table = CsvTableLoader.load(file.path()).unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.columns()[0], vec![1.0, 3.0]);
    }

    #[test]
    fn missing_file_is_loader_error() {
        let err = CsvTableLoader
            .load(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, PlotError::Loader { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn rejects_single_column() {
        let file = csv_file("x\n1\n2\n");
        let err = CsvTableLoader.load(file.path()).unwrap_err();
        assert!(err.to_string().contains("at least 2 columns"));
    }

    #[test]
    fn rejects_text_in_body() {
        let file = csv_file("x,y\n1,2\n3,oops\n");
        let err = CsvTableLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, PlotError::Loader { .. }));
    }

    #[test]
    fn rejects_ragged_rows() {
        let file = csv_file("1,2,3\n4,5\n");
        assert!(CsvTableLoader.load(file.path()).is_err());
    }

    #[test]
    fn rejects_header_only() {
        let file = csv_file("x,y\n");
        let err = CsvTableLoader.load(file.path()).unwrap_err();
        assert!(err.to_string().contains("no data rows"));
    }
}
