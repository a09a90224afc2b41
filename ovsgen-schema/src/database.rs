//! Database schema document and parsing.

use std::{collections::HashMap, path::Path, str::FromStr};

use serde::Deserialize;

use crate::{
    BaseType, Error, Result, TableSchema,
    error::SourceContext,
    validate::{ValidateContext, is_schema_version},
};

/// Root of an OVSDB schema document (`*.ovsschema`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatabaseSchema {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub cksum: Option<String>,
    pub tables: HashMap<String, TableSchema>,
}

impl DatabaseSchema {
    /// Parse a schema file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_schema(&content, &path.display().to_string())
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.get(name)
    }

    /// Table names in lexicographic order.
    pub fn sorted_table_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromStr for DatabaseSchema {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_schema(s, "schema.ovsschema")
    }
}

/// Parse a schema from content with the given filename for error reporting.
pub fn parse_schema(content: &str, filename: &str) -> Result<DatabaseSchema> {
    let source_ctx = SourceContext::new(content, filename);
    let schema: DatabaseSchema =
        serde_json::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_schema(&schema, &ValidateContext::new(source_ctx))?;
    Ok(schema)
}

/// Validate the schema after parsing.
///
/// Tables and columns are visited in sorted order so the reported error is
/// the same on every run.
fn validate_schema(schema: &DatabaseSchema, ctx: &ValidateContext) -> Result<()> {
    if !is_schema_version(&schema.version) {
        return Err(ctx.source().validation_error(format!(
            "invalid schema version '{}', expected 'X.Y.Z'",
            schema.version
        )));
    }

    for table_name in schema.sorted_table_names() {
        let table = &schema.tables[table_name];
        for column_name in table.sorted_column_names() {
            let column = &table.columns[column_name];
            ctx.validate_column_name(table_name, column_name)?;

            let bases = std::iter::once(column.key()).chain(column.value());
            for base in bases {
                validate_base(schema, ctx, table_name, column_name, base)?;
            }
        }
    }
    Ok(())
}

fn validate_base(
    schema: &DatabaseSchema,
    ctx: &ValidateContext,
    table: &str,
    column: &str,
    base: &BaseType,
) -> Result<()> {
    if let Some(values) = &base.enum_values {
        if base.atomic.is_supported() {
            ctx.validate_enum_values(table, column, values, &base.atomic)?;
        }
    }

    match &base.ref_table {
        Some(ref_table) if !schema.tables.contains_key(ref_table) => {
            Err(ctx.source().unknown_ref_table_error(
                table,
                column,
                ref_table,
                ctx.find_span(&[table, column, "refTable"]),
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Atom, AtomicType, ColumnKind};

    const SCHEMA: &str = r#"{
        "name": "Open_vSwitch",
        "version": "8.3.0",
        "tables": {
            "Bridge": {
                "columns": {
                    "name": { "type": "string", "mutable": false },
                    "ports": {
                        "type": {
                            "key": { "type": "uuid", "refTable": "Port" },
                            "min": 0,
                            "max": "unlimited"
                        }
                    },
                    "fail_mode": {
                        "type": {
                            "key": { "type": "string", "enum": ["set", ["standalone", "secure"]] },
                            "min": 0,
                            "max": 1
                        }
                    }
                },
                "isRoot": true
            },
            "Port": {
                "columns": {
                    "name": { "type": "string" }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_schema() {
        let schema: DatabaseSchema = SCHEMA.parse().unwrap();

        assert_eq!(schema.name, "Open_vSwitch");
        assert_eq!(schema.version, "8.3.0");
        assert_eq!(schema.sorted_table_names(), vec!["Bridge", "Port"]);

        let bridge = schema.table("Bridge").unwrap();
        let fail_mode = bridge.get("fail_mode").unwrap();
        assert_eq!(fail_mode.kind(), ColumnKind::Set);
        assert_eq!(
            fail_mode.key().enum_values.as_deref(),
            Some(
                &[
                    Atom::String("standalone".into()),
                    Atom::String("secure".into())
                ][..]
            )
        );
    }

    #[test]
    fn test_parse_error() {
        let err = "{ \"name\": ".parse::<DatabaseSchema>().unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_invalid_version() {
        let src = r#"{ "name": "db", "version": "1.0", "tables": {} }"#;
        let err = src.parse::<DatabaseSchema>().unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_reserved_column() {
        let src = r#"{
            "name": "db", "version": "1.0.0",
            "tables": { "T": { "columns": { "_uuid": { "type": "uuid" } } } }
        }"#;
        let err = src.parse::<DatabaseSchema>().unwrap_err();
        match *err {
            Error::ReservedColumn {
                table, column, span, ..
            } => {
                assert_eq!(table, "T");
                assert_eq!(column, "_uuid");
                assert!(span.is_some());
            }
            other => panic!("expected reserved column error, got {:?}", other),
        }
    }

    #[test]
    fn test_enum_type_mismatch() {
        let src = r#"{
            "name": "db", "version": "1.0.0",
            "tables": { "T": { "columns": {
                "level": { "type": { "key": { "type": "integer", "enum": ["set", [1, "two"]] } } }
            } } }
        }"#;
        let err = src.parse::<DatabaseSchema>().unwrap_err();
        match *err {
            Error::EnumTypeMismatch {
                column,
                value,
                expected,
                ..
            } => {
                assert_eq!(column, "level");
                assert_eq!(value, "\"two\"");
                assert_eq!(expected, "integer");
            }
            other => panic!("expected enum type mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_ref_table() {
        let src = r#"{
            "name": "db", "version": "1.0.0",
            "tables": { "T": { "columns": {
                "peer": { "type": { "key": { "type": "uuid", "refTable": "Missing" } } }
            } } }
        }"#;
        let err = src.parse::<DatabaseSchema>().unwrap_err();
        assert!(matches!(*err, Error::UnknownRefTable { .. }));
    }

    #[test]
    fn test_unsupported_type_is_kept() {
        let src = r#"{
            "name": "db", "version": "1.0.0",
            "tables": { "T": { "columns": { "blob": { "type": "bytes" } } } }
        }"#;
        let schema: DatabaseSchema = src.parse().unwrap();
        let column = schema.table("T").unwrap().get("blob").unwrap();
        assert_eq!(
            column.key().atomic,
            AtomicType::Unsupported("bytes".to_string())
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = DatabaseSchema::from_file("/nonexistent/schema.ovsschema").unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }
}
