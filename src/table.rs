//! In-memory tabular structure for raw CSV data.
//!
//! A [`RawTable`] keeps the source column order and addresses cells by the
//! (whitespace-trimmed) source header name. It carries strings only; typed
//! parsing happens in the transformer.

use indexmap::IndexMap;

use crate::error::PipelineError;

/// A flat table of string cells addressed by header name
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    columns: IndexMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build an empty table from its header row. Headers are trimmed before
    /// indexing so `" SKU "` and `"SKU"` address the same column.
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| (name.as_ref().trim().to_string(), idx))
            .collect();

        RawTable {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a data row. The row must have one cell per header.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), PipelineError> {
        if row.len() != self.columns.len() {
            return Err(PipelineError::parse(
                format!("row {}", self.rows.len() + 1),
                format!(
                    "expected {} fields, got {}",
                    self.columns.len(),
                    row.len()
                ),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Column index for a header name (the lookup name is trimmed too)
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.get(name.trim()).copied()
    }

    /// Cell value at (row, header name)
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx).map(|s| s.as_str())
    }

    /// Header names in source order
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(|s| s.as_str())
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTable {
        let mut table = RawTable::new(["SKU", " Price ", "Availability"]);
        table
            .push_row(vec!["SKU0".into(), "69.81".into(), "55".into()])
            .unwrap();
        table
            .push_row(vec!["SKU1".into(), "14.84".into(), "95".into()])
            .unwrap();
        table
    }

    #[test]
    fn test_headers_trimmed_on_both_sides() {
        let table = sample();

        assert_eq!(table.column_index("Price"), Some(1));
        assert_eq!(table.column_index("  Price"), Some(1));
        assert_eq!(table.value(0, "Price"), Some("69.81"));
    }

    #[test]
    fn test_value_lookup() {
        let table = sample();

        assert_eq!(table.value(1, "SKU"), Some("SKU1"));
        assert_eq!(table.value(1, "Availability"), Some("95"));
        assert_eq!(table.value(2, "SKU"), None);
        assert_eq!(table.value(0, "Missing"), None);
    }

    #[test]
    fn test_ragged_row_rejected() {
        let mut table = RawTable::new(["a", "b"]);
        let err = table.push_row(vec!["only-one".into()]).unwrap_err();

        assert!(matches!(err, PipelineError::Parse { .. }));
        assert_eq!(table.len(), 0);
    }

    #[test]
    fn test_column_order_preserved() {
        let table = sample();
        let names: Vec<&str> = table.columns().collect();
        assert_eq!(names, vec!["SKU", "Price", "Availability"]);
    }
}
