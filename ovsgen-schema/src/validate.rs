//! Validation context and utilities for schema parsing.

use miette::SourceSpan;

use crate::{Atom, AtomicType, Result, error::SourceContext};

/// Validation context that carries the source document for error reporting.
#[derive(Debug, Clone)]
pub struct ValidateContext {
    source: SourceContext,
}

impl ValidateContext {
    pub fn new(source: SourceContext) -> Self {
        Self { source }
    }

    /// Get the source context for error creation.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Find the span of a key nested under the given path of object keys.
    pub fn find_span(&self, path: &[&str]) -> Option<SourceSpan> {
        find_key_span(self.source.src(), path)
    }

    /// Reject column names reserved by OVSDB (leading underscore).
    pub fn validate_column_name(&self, table: &str, column: &str) -> Result<()> {
        if column.starts_with('_') {
            return Err(self.source.reserved_column_error(
                table,
                column,
                self.find_span(&[table, column]),
            ));
        }
        Ok(())
    }

    /// Check that every enum literal matches the declared atomic type.
    pub fn validate_enum_values(
        &self,
        table: &str,
        column: &str,
        values: &[Atom],
        ty: &AtomicType,
    ) -> Result<()> {
        match values.iter().find(|value| !value.matches(ty)) {
            Some(value) => {
                let literal = serde_json::to_string(value).unwrap_or_else(|_| value.to_string());
                Err(self.source.enum_type_mismatch_error(
                    table,
                    column,
                    literal,
                    ty.as_str(),
                    self.find_span(&[table, column, "enum"]),
                ))
            }
            None => Ok(()),
        }
    }
}

/// Find the span of the last key in `path`, searching for each quoted key
/// after the position of the previous one.
///
/// Only a quoted string followed by `:` counts as a key, so string values
/// equal to a key name are skipped.
pub(crate) fn find_key_span(src: &str, path: &[&str]) -> Option<SourceSpan> {
    let mut offset = 0;
    let mut span = None;

    for key in path {
        let pattern = format!("\"{}\"", key);
        let pos = find_object_key(src, offset, &pattern)?;
        // Skip the opening quote
        span = Some(SourceSpan::from((pos + 1, key.len())));
        offset = pos + pattern.len();
    }

    span
}

/// Position of the first `pattern` at or after `from` that is followed by `:`.
fn find_object_key(src: &str, mut from: usize, pattern: &str) -> Option<usize> {
    loop {
        let pos = src[from..].find(pattern)? + from;
        let end = pos + pattern.len();
        if src[end..].trim_start().starts_with(':') {
            return Some(pos);
        }
        from = end;
    }
}

/// Check for an `X.Y.Z` version string.
pub(crate) fn is_schema_version(version: &str) -> bool {
    let parts: Vec<&str> = version.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_key_span() {
        let src = r#"{"tables": {"A": {"columns": {"name": {}}}, "B": {"columns": {"name": {}}}}}"#;

        let span = find_key_span(src, &["B", "name"]).unwrap();
        let start = span.offset();
        assert_eq!(&src[start..start + span.len()], "name");
        assert!(start > src.find("\"B\"").unwrap());

        assert!(find_key_span(src, &["C", "name"]).is_none());
    }

    #[test]
    fn test_find_key_span_skips_string_values() {
        let src = r#"{"tables": {
            "Bridge": {"columns": {"ports": {"type": {"key": {"type": "uuid", "refTable": "Port"}}}}},
            "Port": {"columns": {"name": {"type": "string"}}}
        }}"#;

        let span = find_key_span(src, &["Port"]).unwrap();
        let start = span.offset();
        assert_eq!(&src[start..start + span.len()], "Port");
        assert!(src[start + span.len() + 1..].starts_with(": {\"columns\""));

        // The `"string"` value is not a key
        assert!(find_key_span(src, &["Port", "string"]).is_none());
    }

    #[test]
    fn test_is_schema_version() {
        assert!(is_schema_version("8.3.0"));
        assert!(is_schema_version("10.20.30"));
        assert!(!is_schema_version("8.3"));
        assert!(!is_schema_version("8.3.x"));
        assert!(!is_schema_version("8..0"));
        assert!(!is_schema_version(""));
    }

    #[test]
    fn test_validate_enum_values() {
        let ctx = ValidateContext::new(SourceContext::new("{}", "test.ovsschema"));
        let values = [Atom::String("a".into()), Atom::String("b".into())];

        assert!(
            ctx.validate_enum_values("T", "c", &values, &AtomicType::String)
                .is_ok()
        );
        assert!(
            ctx.validate_enum_values("T", "c", &values, &AtomicType::Integer)
                .is_err()
        );
    }
}
