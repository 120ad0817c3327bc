//! Dataset and uploaded-table types

use serde::{Deserialize, Serialize};

/// Where the active dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Selected from a host-supplied uploaded table.
    Uploaded,
    /// Freshly synthesized Gaussian blobs.
    Generated,
    /// Recalled from the session cache.
    Cached,
}

/// An ordered sequence of fixed-length numeric samples.
///
/// Every sample shares the same feature count; the constructors enforce
/// this, so downstream code can index features without bounds anxiety.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    samples: Vec<Vec<f64>>,
    feature_count: usize,
    provenance: Provenance,
}

impl Dataset {
    /// Build a dataset from row-major samples.
    ///
    /// Rows that do not match the first row's length are dropped; callers
    /// constructing from rectangular sources never trigger this.
    pub fn from_rows(rows: Vec<Vec<f64>>, provenance: Provenance) -> Self {
        let feature_count = rows.first().map(Vec::len).unwrap_or(0);
        let samples = rows
            .into_iter()
            .filter(|r| r.len() == feature_count)
            .collect();
        Self {
            samples,
            feature_count,
            provenance,
        }
    }

    /// Build a dataset from equal-length feature columns.
    ///
    /// The sample count is the shortest column's length.
    pub fn from_columns(columns: &[&[f64]], provenance: Provenance) -> Self {
        let sample_count = columns.iter().map(|c| c.len()).min().unwrap_or(0);
        let samples = (0..sample_count)
            .map(|i| columns.iter().map(|c| c[i]).collect())
            .collect();
        Self {
            samples,
            feature_count: columns.len(),
            provenance,
        }
    }

    /// Number of samples.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of features per sample.
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Row-major sample data.
    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    /// Provenance tag.
    pub fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Same data, different provenance tag. Used when a generated dataset
    /// is recalled from the session cache.
    pub(crate) fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.provenance = provenance;
        self
    }
}

/// Values of one uploaded column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnValues {
    /// Numeric column, consumable by the core.
    Numeric(Vec<f64>),
    /// Non-numeric column, carried for completeness but never consumed.
    Text(Vec<String>),
}

/// A named column of an uploaded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: ColumnValues,
}

/// A host-supplied tabular dataset, as parsed by the (external) upload
/// layer. Column order is the table's original order; the resolver selects
/// numeric columns in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedTable {
    columns: Vec<Column>,
}

impl UploadedTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a numeric column.
    pub fn with_numeric(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            values: ColumnValues::Numeric(values),
        });
        self
    }

    /// Append a non-numeric column.
    pub fn with_text(mut self, name: impl Into<String>, values: Vec<String>) -> Self {
        self.columns.push(Column {
            name: name.into(),
            values: ColumnValues::Text(values),
        });
        self
    }

    /// All columns in table order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Numeric columns in table order.
    pub fn numeric_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.columns.iter().filter_map(|c| match &c.values {
            ColumnValues::Numeric(values) => Some((c.name.as_str(), values.as_slice())),
            ColumnValues::Text(_) => None,
        })
    }

    /// Number of numeric columns.
    pub fn numeric_column_count(&self) -> usize {
        self.numeric_columns().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn from_rows_drops_ragged_rows() {
        let d = Dataset::from_rows(
            vec![vec![1.0, 2.0], vec![3.0], vec![4.0, 5.0]],
            Provenance::Generated,
        );
        assert_eq!(d.sample_count(), 2);
        assert_eq!(d.feature_count(), 2);
    }

    #[test]
    fn from_columns_builds_row_major_samples() {
        let a: &[f64] = &[1.0, 2.0, 3.0];
        let b: &[f64] = &[4.0, 5.0, 6.0];
        let d = Dataset::from_columns(&[a, b], Provenance::Uploaded);
        assert_eq!(d.sample_count(), 3);
        assert_eq!(d.samples()[1], vec![2.0, 5.0]);
    }

    #[test]
    fn numeric_columns_skip_text_and_keep_order() {
        let table = UploadedTable::new()
            .with_text("label", vec!["a".into(), "b".into()])
            .with_numeric("x", vec![1.0, 2.0])
            .with_numeric("y", vec![3.0, 4.0]);
        let names: Vec<&str> = table.numeric_columns().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["x", "y"]);
        assert_eq!(table.numeric_column_count(), 2);
    }
}
