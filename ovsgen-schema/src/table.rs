use std::collections::HashMap;

use serde::Deserialize;

use crate::ColumnSchema;

/// Schema of a single table.
///
/// Columns are keyed by name with no guaranteed iteration order; consumers
/// that need stable output must sort the names themselves.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSchema {
    pub columns: HashMap<String, ColumnSchema>,
    #[serde(default)]
    pub max_rows: Option<u64>,
    #[serde(default)]
    pub is_root: bool,
    #[serde(default)]
    pub indexes: Vec<Vec<String>>,
}

impl TableSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column (builder style).
    pub fn column(mut self, name: impl Into<String>, schema: impl Into<ColumnSchema>) -> Self {
        self.columns.insert(name.into(), schema.into());
        self
    }

    /// Look up a column by name.
    pub fn get(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.get(name)
    }

    /// Column names in lexicographic order.
    pub fn sorted_column_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.columns.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{AtomicType, ColumnType};

    #[test]
    fn test_parse_table() {
        let table: TableSchema = serde_json::from_value(json!({
            "columns": {
                "name": { "type": "string", "mutable": false },
                "ports": { "type": { "key": { "type": "uuid", "refTable": "Port" }, "min": 0, "max": "unlimited" } }
            },
            "isRoot": true,
            "indexes": [["name"]]
        }))
        .unwrap();

        assert!(table.is_root);
        assert_eq!(table.max_rows, None);
        assert_eq!(table.indexes, vec![vec!["name".to_string()]]);
        assert!(!table.get("name").unwrap().mutable);
    }

    #[test]
    fn test_sorted_column_names() {
        let table = TableSchema::new()
            .column("ports", ColumnType::set(AtomicType::Uuid))
            .column("name", ColumnType::scalar(AtomicType::String))
            .column("fail_mode", ColumnType::scalar(AtomicType::String));

        assert_eq!(table.sorted_column_names(), vec!["fail_mode", "name", "ports"]);
    }
}
