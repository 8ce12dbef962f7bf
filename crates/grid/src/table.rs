//! Column oriented tables of equal length arrays

// crate modules
use crate::error::{Error, Result};
use crate::{DataArrays, NumericArray};

/// Ordered columns sharing a row count
///
/// The intermediate form between row oriented text readers and grid
/// assembly. Columns are row data in the
/// [FieldAssociation](crate::FieldAssociation) sense.
///
/// ```rust
/// # use strata_grid::{NumericArray, Table};
/// let mut table = Table::new();
/// table.add_column(NumericArray::new("A", vec![1.0, 2.0]).unwrap()).unwrap();
///
/// // every column must have the same number of rows
/// let short = NumericArray::new("B", vec![1.0]).unwrap();
/// assert!(table.add_column(short).is_err());
/// assert_eq!(table.n_rows(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: DataArrays,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from columns, checking every length
    pub fn from_columns<I: IntoIterator<Item = NumericArray>>(columns: I) -> Result<Self> {
        let mut table = Self::new();
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Append a column, replacing any column of the same name
    pub fn add_column(&mut self, column: NumericArray) -> Result<Option<NumericArray>> {
        if let Some(first) = self.columns.iter().find(|c| c.name() != column.name()) {
            if first.len() != column.len() {
                return Err(Error::ColumnLengthMismatch {
                    name: column.name().to_string(),
                    expected: first.len(),
                    found: column.len(),
                });
            }
        }
        Ok(self.columns.insert(column))
    }

    pub fn n_rows(&self) -> usize {
        self.columns.iter().next().map_or(0, |c| c.len())
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&NumericArray> {
        self.columns.get(name)
    }

    /// Column by position
    pub fn column_at(&self, idx: usize) -> Option<&NumericArray> {
        self.columns.iter().nth(idx)
    }

    pub fn names(&self) -> Vec<&str> {
        self.columns.names()
    }

    pub fn columns(&self) -> &DataArrays {
        &self.columns
    }

    pub fn into_columns(self) -> Vec<NumericArray> {
        self.columns.into_iter().collect()
    }
}

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn replace_keeps_length_rule() {
        let mut table = Table::from_columns([
            NumericArray::new("a", vec![1, 2, 3]).unwrap(),
            NumericArray::new("b", vec![4.0, 5.0, 6.0]).unwrap(),
        ])
        .unwrap();

        assert_eq!(table.n_columns(), 2);
        assert_eq!(table.column_at(1).unwrap().name(), "b");

        // a lone column can be replaced with any length
        let mut single = Table::from_columns([NumericArray::new("a", vec![1]).unwrap()]).unwrap();
        assert!(single.add_column(NumericArray::new("a", vec![1, 2]).unwrap()).is_ok());

        assert!(table.add_column(NumericArray::new("a", vec![1, 2]).unwrap()).is_err());
        assert_eq!(table.names(), vec!["a", "b"]);
    }

    #[test]
    fn empty_table() {
        let table = Table::new();
        assert_eq!(table.n_rows(), 0);
        assert!(table.column("a").is_none());
    }
}
