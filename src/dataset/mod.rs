//! In-memory tabular datasets and their CSV wire form.
//!
//! This module provides [`Dataset`], the unit of data transferred by a
//! [`TableLoader`](crate::loader::TableLoader), along with its CSV
//! serialization.

mod scalar;

pub use scalar::Scalar;

use eyre::{Context, Result};
use std::path::Path;

/// An in-memory tabular dataset: ordered column names plus ordered rows.
///
/// Every row has exactly one [`Scalar`] per column, in column declaration
/// order. The dataset is read-only after construction — loaders only read
/// it, never mutate it.
///
/// # Example
/// ```
/// use rdb_loader::Dataset;
///
/// # fn example() -> eyre::Result<()> {
/// let dataset = Dataset::try_new(
///     vec!["name".into(), "region".into()],
///     vec![
///         vec!["AMP".into(), "APAC".into()],
///         vec!["ANZ".into(), "APAC".into()],
///     ],
/// )?;
///
/// assert_eq!(dataset.row_count(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Scalar>>,
}

impl Dataset {
    /// Create a dataset from column names and rows.
    ///
    /// # Errors
    /// Returns an error if any row's width differs from the column count —
    /// all rows share the same fixed, ordered set of columns.
    pub fn try_new(columns: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self> {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                eyre::bail!(
                    "Row {} has {} value(s) but the dataset has {} column(s)",
                    index,
                    row.len(),
                    columns.len()
                );
            }
        }
        Ok(Self { columns, rows })
    }

    /// Read a dataset from a CSV file.
    ///
    /// The first line is taken as the header of column names; every
    /// following line is one data row. All fields are read as
    /// [`Scalar::Str`] — CSV carries no type information, so this is
    /// lossless for the load path.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let columns = reader
            .headers()
            .with_context(|| format!("Failed to read CSV header from {}", path.display()))?
            .iter()
            .map(|field| field.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record
                .with_context(|| format!("Failed to read CSV record from {}", path.display()))?;
            rows.push(record.iter().map(Scalar::from).collect());
        }

        Self::try_new(columns, rows)
            .with_context(|| format!("Malformed CSV file: {}", path.display()))
    }

    /// The ordered column names shared by all rows.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The data rows, in order.
    pub fn rows(&self) -> &[Vec<Scalar>] {
        &self.rows
    }

    /// Number of data rows (the header is not counted).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True if the dataset has no data rows. An empty dataset still has
    /// its column header and still gets uploaded.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Serialize to CSV text: one header line of column names, then one
    /// line per row, values in column declaration order.
    ///
    /// Quoting follows the csv crate default: fields are quoted only when
    /// they contain a comma, quote, or line break, with quotes doubled.
    /// Every record ends with `\n`, including the last.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(&self.columns)
            .with_context(|| "Failed to write CSV header")?;
        for row in &self.rows {
            let record = row.iter().map(ToString::to_string).collect::<Vec<_>>();
            writer
                .write_record(&record)
                .with_context(|| "Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .with_context(|| "Failed to flush CSV writer")?;
        String::from_utf8(bytes).with_context(|| "Serialized CSV was not valid UTF-8")
    }
}
