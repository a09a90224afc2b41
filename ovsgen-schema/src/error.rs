use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for schema operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Encapsulates the schema document and its filename so error factories
/// don't need both passed around.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    /// Create a new source context.
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Get the source content.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a serde_json error.
    pub fn parse_error(&self, source: serde_json::Error) -> Box<Error> {
        let span = line_col_offset(&self.src, source.line(), source.column())
            .map(|offset| SourceSpan::from((offset, 1)));
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error without a span.
    pub fn validation_error(&self, message: impl Into<String>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: None,
            message: message.into(),
        })
    }

    /// Create a reserved column name error.
    pub fn reserved_column_error(
        &self,
        table: impl Into<String>,
        column: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::ReservedColumn {
            src: self.named_source(),
            span,
            table: table.into(),
            column: column.into(),
        })
    }

    /// Create an enum literal type mismatch error.
    pub fn enum_type_mismatch_error(
        &self,
        table: impl Into<String>,
        column: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::EnumTypeMismatch {
            src: self.named_source(),
            span,
            table: table.into(),
            column: column.into(),
            value: value.into(),
            expected: expected.into(),
        })
    }

    /// Create an unknown reference table error.
    pub fn unknown_ref_table_error(
        &self,
        table: impl Into<String>,
        column: impl Into<String>,
        ref_table: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::UnknownRefTable {
            src: self.named_source(),
            span,
            table: table.into(),
            column: column.into(),
            ref_table: ref_table.into(),
        })
    }
}

/// Convert a 1-based line/column pair into a byte offset.
fn line_col_offset(src: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line - 1)
        .map(str::len)
        .sum();
    let offset = line_start + column.saturating_sub(1);
    (offset <= src.len()).then_some(offset)
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("pass the path to an OVSDB schema, e.g. 'vswitch.ovsschema'"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse OVSDB schema")]
    #[diagnostic(code(ovsgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(ovsgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("column '{column}' in table '{table}' uses a reserved name")]
    #[diagnostic(
        code(ovsgen::reserved_column),
        help("column names starting with '_' are reserved by OVSDB")
    )]
    ReservedColumn {
        #[source_code]
        src: NamedSource<String>,
        #[label("reserved name")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
    },

    #[error("enum value {value} of column '{table}.{column}' is not of type {expected}")]
    #[diagnostic(code(ovsgen::enum_type_mismatch))]
    EnumTypeMismatch {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected {expected}")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
        value: String,
        expected: String,
    },

    #[error("column '{table}.{column}' references unknown table '{ref_table}'")]
    #[diagnostic(code(ovsgen::unknown_ref_table))]
    UnknownRefTable {
        #[source_code]
        src: NamedSource<String>,
        #[label("unknown table")]
        span: Option<SourceSpan>,
        table: String,
        column: String,
        ref_table: String,
    },
}
