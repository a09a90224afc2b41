//! Go type mapper implementation.

use ovsgen_codegen::TypeMapper;
use ovsgen_core::NameNormalizer;
use ovsgen_schema::{Atom, AtomicType};

use crate::naming;

/// Go type mapper implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTypeMapper;

impl TypeMapper for GoTypeMapper {
    fn language(&self) -> &'static str {
        "go"
    }

    fn map_atomic(&self, atomic: &AtomicType) -> Option<&'static str> {
        match atomic {
            AtomicType::Integer => Some("int"),
            AtomicType::Real => Some("float64"),
            AtomicType::Boolean => Some("bool"),
            AtomicType::String => Some("string"),
            AtomicType::Uuid => Some("string"),
            AtomicType::Unsupported(_) => None,
        }
    }

    fn map_sequence(&self, element: &str) -> String {
        format!("[]{}", element)
    }

    fn map_mapping(&self, key: &str, value: &str) -> String {
        format!("map[{}]{}", key, value)
    }

    fn format_literal(&self, value: &Atom) -> String {
        match value {
            Atom::Integer(v) => v.to_string(),
            Atom::Real(v) => format!("{:.6}", v),
            Atom::Boolean(v) => v.to_string(),
            Atom::String(v) => format!("\"{}\"", v),
        }
    }

    fn constant_name(&self, naming: &NameNormalizer, alias: &str, value: &Atom) -> String {
        naming::constant_name(naming, alias, value)
    }
}
