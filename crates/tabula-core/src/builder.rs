//! Table-building context handed to build actions.

use serde_json::{Map, Value};

/// Sink a build action writes columns and rows into.
///
/// The rendering machinery behind a real host is external; this trait is the
/// whole contract a plugin sees.
pub trait TableBuilder {
    /// Declare a column. Columns are positional in declaration order.
    fn add_column(&mut self, name: &str);

    /// Append a row of cell values, one per declared column.
    fn add_row(&mut self, row: Vec<Value>);
}

/// In-memory [`TableBuilder`] that keeps every column and row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowTableBuilder {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl RowTableBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared column names.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Accumulated rows.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Rows as JSON objects keyed by column name.
    ///
    /// Cells beyond the declared columns are dropped; missing cells become
    /// `null`.
    #[must_use]
    pub fn to_records(&self) -> Vec<Value> {
        self.rows
            .iter()
            .map(|row| {
                let record: Map<String, Value> = self
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| (column.clone(), row.get(i).cloned().unwrap_or(Value::Null)))
                    .collect();
                Value::Object(record)
            })
            .collect()
    }
}

impl TableBuilder for RowTableBuilder {
    fn add_column(&mut self, name: &str) {
        self.columns.push(name.to_string());
    }

    fn add_row(&mut self, row: Vec<Value>) {
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_records_pad_and_truncate() {
        let mut builder = RowTableBuilder::new();
        builder.add_column("pid");
        builder.add_column("name");
        builder.add_row(vec![json!(1), json!("init")]);
        builder.add_row(vec![json!(2)]);
        builder.add_row(vec![json!(3), json!("sh"), json!("extra")]);

        let records = builder.to_records();
        assert_eq!(records[0], json!({"pid": 1, "name": "init"}));
        assert_eq!(records[1], json!({"pid": 2, "name": null}));
        assert_eq!(records[2], json!({"pid": 3, "name": "sh"}));
    }
}
