use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while turning a table schema into a [`ModelData`](crate::ModelData).
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum MappingError {
    #[error("column '{table}.{column}' has unsupported type '{kind}'")]
    #[diagnostic(
        code(ovsgen::unsupported_type),
        help("supported types are integer, real, boolean, string and uuid")
    )]
    UnsupportedTypeKind {
        table: String,
        column: String,
        kind: String,
    },

    #[error("table '{table}' has no usable type name")]
    #[diagnostic(code(ovsgen::empty_name))]
    EmptyTypeName { table: String },

    #[error("column '{table}.{column}' normalizes to an empty field name")]
    #[diagnostic(code(ovsgen::empty_name))]
    EmptyFieldName { table: String, column: String },

    #[error("columns '{first}' and '{second}' of table '{table}' both map to field '{name}'")]
    #[diagnostic(
        code(ovsgen::duplicate_field),
        help("rename one of the columns so their normalized names differ")
    )]
    DuplicateFieldName {
        table: String,
        name: String,
        first: String,
        second: String,
    },

    #[error("columns '{first}' and '{second}' of table '{table}' both map to enum '{alias}'")]
    #[diagnostic(code(ovsgen::duplicate_enum))]
    DuplicateEnumAlias {
        table: String,
        alias: String,
        first: String,
        second: String,
    },

    #[error("enum constant '{name}' of column '{table}.{column}' is declared by both {first} and {second}")]
    #[diagnostic(
        code(ovsgen::duplicate_enum_constant),
        help("enum values must stay distinct after normalization, and none may be empty")
    )]
    DuplicateEnumConstant {
        table: String,
        column: String,
        name: String,
        first: String,
        second: String,
    },
}

impl MappingError {
    /// The table the error was raised for.
    pub fn table(&self) -> &str {
        match self {
            MappingError::UnsupportedTypeKind { table, .. }
            | MappingError::EmptyTypeName { table }
            | MappingError::EmptyFieldName { table, .. }
            | MappingError::DuplicateFieldName { table, .. }
            | MappingError::DuplicateEnumAlias { table, .. }
            | MappingError::DuplicateEnumConstant { table, .. } => table,
        }
    }
}
