//! Result-set model and converter support.
//!
//! Literal SQL runs over the simple-query protocol, so result cells arrive as
//! text. [`RowSet`] is the owned snapshot handed to a caller-supplied
//! converter (`Fn(&RowSet) -> ForgeResult<T>`); shape mismatches surface as
//! conversion errors.

use crate::error::{ForgeError, ForgeResult};

/// One result row of textual cells (`None` = SQL NULL).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowData {
    values: Vec<Option<String>>,
}

impl RowData {
    /// Create a row from its cells.
    pub fn new(values: Vec<Option<String>>) -> Self {
        Self { values }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Cell by position, `None` when out of range or SQL NULL.
    pub fn get(&self, idx: usize) -> Option<&str> {
        self.values.get(idx).and_then(|v| v.as_deref())
    }

    /// Cell by position, failing with a conversion error when out of range or
    /// SQL NULL.
    pub fn try_get(&self, idx: usize) -> ForgeResult<&str> {
        self.get(idx)
            .ok_or_else(|| ForgeError::conversion(format!("no value at column index {idx}")))
    }
}

/// An owned result set: column names plus rows of textual cells.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowSet {
    columns: Vec<String>,
    rows: Vec<RowData>,
}

impl RowSet {
    /// Create a result set from column names and row cells.
    pub fn new(
        columns: Vec<String>,
        rows: impl IntoIterator<Item = Vec<Option<String>>>,
    ) -> Self {
        Self {
            columns,
            rows: rows.into_iter().map(RowData::new).collect(),
        }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate the rows.
    pub fn rows(&self) -> impl Iterator<Item = &RowData> {
        self.rows.iter()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// The single row of the set, failing when there is not exactly one.
    pub fn single(&self) -> ForgeResult<&RowData> {
        match self.rows.len() {
            1 => Ok(&self.rows[0]),
            n => Err(ForgeError::conversion(format!(
                "expected exactly one row but found {n}"
            ))),
        }
    }

    /// The single non-null cell of the single row, failing on any other shape.
    pub fn single_value(&self) -> ForgeResult<&str> {
        let row = self.single()?;
        if row.len() != 1 {
            return Err(ForgeError::conversion(format!(
                "expected exactly one column but found {}",
                row.len()
            )));
        }
        row.try_get(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn get_by_index_and_name() {
        let set = RowSet::new(
            vec!["id".to_string(), "email".to_string()],
            [cells(&["1", "a@example.com"])],
        );
        let row = set.single().unwrap();
        assert_eq!(row.get(1), Some("a@example.com"));
        assert_eq!(set.column_index("email"), Some(1));
        assert_eq!(set.column_index("missing"), None);
    }

    #[test]
    fn single_rejects_zero_and_many_rows() {
        let empty = RowSet::new(vec!["id".to_string()], []);
        assert_eq!(
            empty.single().unwrap_err().to_string(),
            "Conversion error: expected exactly one row but found 0"
        );

        let two = RowSet::new(vec!["id".to_string()], [cells(&["1"]), cells(&["2"])]);
        assert_eq!(
            two.single().unwrap_err().to_string(),
            "Conversion error: expected exactly one row but found 2"
        );
    }

    #[test]
    fn single_value_rejects_wide_rows_and_nulls() {
        let wide = RowSet::new(
            vec!["a".to_string(), "b".to_string()],
            [cells(&["1", "2"])],
        );
        assert_eq!(
            wide.single_value().unwrap_err().to_string(),
            "Conversion error: expected exactly one column but found 2"
        );

        let null = RowSet::new(vec!["a".to_string()], [vec![None]]);
        assert!(null.single_value().is_err());
    }

    #[test]
    fn single_value_returns_the_cell() {
        let one = RowSet::new(vec!["id".to_string()], [cells(&["42"])]);
        assert_eq!(one.single_value().unwrap(), "42");
    }
}
