//! Tabular survey data loaded from CSV files.
//!
//! A [`Dataset`] keeps the header row and every record as raw text. Columns are looked up by
//! name and converted on demand, so a dataset can be filtered for missing values on the
//! columns an analysis needs and then sliced into numeric samples or grouped by a categorical
//! label.

use crate::testing::utils::{extract_unique_labels, get_group_indices};
use anyhow::{Context, anyhow};
use std::path::Path;
use tracing::debug;

/// Cell values treated as missing, in addition to the empty field.
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Returns `true` if a raw CSV cell represents a missing value.
pub fn is_null(cell: &str) -> bool {
    NULL_MARKERS.contains(&cell)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> anyhow::Result<Self> {
        if let Some((i, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(anyhow!(
                "Row {} has {} fields, expected {}",
                i,
                row.len(),
                headers.len()
            ));
        }
        Ok(Dataset { headers, rows })
    }

    /// Load a CSV file with a header row.
    ///
    /// Every record must have as many fields as the header. Cells are stored verbatim.
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let reader = csv::Reader::from_path(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let dataset = Self::from_csv_reader(reader)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        debug!(
            path = %path.display(),
            rows = dataset.n_rows(),
            columns = dataset.n_columns(),
            "Loaded dataset"
        );
        Ok(dataset)
    }

    /// Load CSV text from any reader, e.g. an in-memory buffer.
    pub fn from_reader<R: std::io::Read>(reader: R) -> anyhow::Result<Self> {
        Self::from_csv_reader(csv::Reader::from_reader(reader))
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Self> {
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            rows.push(record.iter().map(|cell| cell.to_string()).collect());
        }

        Dataset::new(headers, rows)
    }

    pub fn column_names(&self) -> &[String] {
        &self.headers
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, or an error if the header does not contain it.
    pub fn column_index(&self, name: &str) -> anyhow::Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow!("Column '{}' not found in dataset", name))
    }

    /// Keep only the rows that have a non-null value in every one of `columns`.
    ///
    /// Other columns may still contain nulls in the returned dataset.
    pub fn drop_missing(&self, columns: &[&str]) -> anyhow::Result<Dataset> {
        let indices = columns
            .iter()
            .map(|c| self.column_index(c))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .filter(|row| indices.iter().all(|&i| !is_null(&row[i])))
            .cloned()
            .collect();

        debug!(
            before = self.rows.len(),
            after = rows.len(),
            ?columns,
            "Dropped rows with missing values"
        );

        Ok(Dataset {
            headers: self.headers.clone(),
            rows,
        })
    }

    /// Raw text values of a column, in row order.
    pub fn text_column(&self, name: &str) -> anyhow::Result<Vec<&str>> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Numeric values of a column, in row order.
    ///
    /// Fails on the first null or unparsable cell; call [`Dataset::drop_missing`] first.
    pub fn numeric_column(&self, name: &str) -> anyhow::Result<Vec<f64>> {
        let idx = self.column_index(name)?;
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| parse_numeric(&row[idx], name, i))
            .collect()
    }

    /// Outcome values of `value_column` split by exact match of `group_column` against
    /// `labels`. The result has one sequence per label, in the order of `labels`; rows whose
    /// label is not listed are left out.
    pub fn partition_by_label(
        &self,
        group_column: &str,
        value_column: &str,
        labels: &[&str],
    ) -> anyhow::Result<Vec<Vec<f64>>> {
        let value_idx = self.column_index(value_column)?;
        let group_labels = self.text_column(group_column)?;

        get_group_indices(&group_labels, labels)
            .into_iter()
            .map(|indices| {
                indices
                    .into_iter()
                    .map(|i| parse_numeric(&self.rows[i][value_idx], value_column, i))
                    .collect::<anyhow::Result<Vec<_>>>()
            })
            .collect()
    }

    /// Outcome values grouped by every distinct label present in `group_column`, labels sorted
    /// lexicographically.
    pub fn group_by_label(
        &self,
        group_column: &str,
        value_column: &str,
    ) -> anyhow::Result<Vec<(String, Vec<f64>)>> {
        let labels = extract_unique_labels(&self.text_column(group_column)?);
        let label_refs: Vec<&str> = labels.iter().map(|l| l.as_str()).collect();
        let groups = self.partition_by_label(group_column, value_column, &label_refs)?;
        Ok(labels.into_iter().zip(groups).collect())
    }
}

fn parse_numeric(cell: &str, column: &str, row: usize) -> anyhow::Result<f64> {
    if is_null(cell) {
        return Err(anyhow!("Missing value in column '{}' at row {}", column, row));
    }
    cell.trim()
        .parse::<f64>()
        .with_context(|| format!("Invalid number '{}' in column '{}' at row {}", cell, column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SURVEY: &str = "\
Age,Stress_Level,Physical_Activity
20,5,High
21,,Low
,3,Moderate
23,4,NA
24,8,Low
25,2,Unknown
";

    #[test]
    fn test_reads_headers_and_rows() {
        let ds = Dataset::from_reader(SURVEY.as_bytes()).unwrap();
        assert_eq!(ds.column_names(), &["Age", "Stress_Level", "Physical_Activity"]);
        assert_eq!(ds.n_rows(), 6);
    }

    #[test]
    fn test_drop_missing_only_checks_requested_columns() {
        let ds = Dataset::from_reader(SURVEY.as_bytes()).unwrap();
        let clean = ds
            .drop_missing(&["Stress_Level", "Physical_Activity"])
            .unwrap();
        // Row with missing Age is kept, rows with empty stress or NA activity are dropped
        assert_eq!(clean.n_rows(), 4);
        assert_eq!(clean.numeric_column("Stress_Level").unwrap(), vec![5.0, 3.0, 8.0, 2.0]);
    }

    #[test]
    fn test_missing_column_is_an_error() {
        let ds = Dataset::from_reader(SURVEY.as_bytes()).unwrap();
        let err = ds.drop_missing(&["Heart_Rate"]).unwrap_err();
        assert_eq!(err.to_string(), "Column 'Heart_Rate' not found in dataset");
    }

    #[test]
    fn test_numeric_column_rejects_nulls() {
        let ds = Dataset::from_reader(SURVEY.as_bytes()).unwrap();
        assert!(ds.numeric_column("Stress_Level").is_err());
    }

    #[test]
    fn test_partition_excludes_unknown_labels() {
        let ds = Dataset::from_reader(SURVEY.as_bytes())
            .unwrap()
            .drop_missing(&["Stress_Level", "Physical_Activity"])
            .unwrap();
        let groups = ds
            .partition_by_label("Physical_Activity", "Stress_Level", &["High", "Moderate", "Low"])
            .unwrap();
        assert_eq!(groups, vec![vec![5.0], vec![3.0], vec![8.0]]);
    }

    #[test]
    fn test_group_by_label_sorts_labels() {
        let ds = Dataset::from_reader(SURVEY.as_bytes())
            .unwrap()
            .drop_missing(&["Stress_Level", "Physical_Activity"])
            .unwrap();
        let grouped = ds.group_by_label("Physical_Activity", "Stress_Level").unwrap();
        let labels: Vec<&str> = grouped.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["High", "Low", "Moderate", "Unknown"]);
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let result = Dataset::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec!["1".to_string()]],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Dataset::from_path("does/not/exist.csv").is_err());
    }
}
