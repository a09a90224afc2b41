//! Atomic types and literal values.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// An OVSDB atomic type.
///
/// Names the schema does not know are kept as [`AtomicType::Unsupported`]
/// instead of failing the parse, so the mapping stage can report the table
/// and column they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum AtomicType {
    Integer,
    Real,
    Boolean,
    String,
    Uuid,
    Unsupported(String),
}

impl AtomicType {
    /// Get the schema type name (as written in the .ovsschema file)
    pub fn as_str(&self) -> &str {
        match self {
            AtomicType::Integer => "integer",
            AtomicType::Real => "real",
            AtomicType::Boolean => "boolean",
            AtomicType::String => "string",
            AtomicType::Uuid => "uuid",
            AtomicType::Unsupported(name) => name.as_str(),
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, AtomicType::Unsupported(_))
    }
}

impl From<&str> for AtomicType {
    fn from(name: &str) -> Self {
        match name {
            "integer" => AtomicType::Integer,
            "real" => AtomicType::Real,
            "boolean" => AtomicType::Boolean,
            "string" => AtomicType::String,
            "uuid" => AtomicType::Uuid,
            other => AtomicType::Unsupported(other.to_string()),
        }
    }
}

impl From<String> for AtomicType {
    fn from(name: String) -> Self {
        AtomicType::from(name.as_str())
    }
}

impl fmt::Display for AtomicType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for AtomicType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

/// A literal value, as found in an enum constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Atom {
    Integer(i64),
    Real(f64),
    Boolean(bool),
    String(String),
}

impl Atom {
    /// Convert a JSON scalar into an atom.
    ///
    /// Integers are widened to reals when the declared type is `real`.
    pub(crate) fn from_json(value: &serde_json::Value, ty: &AtomicType) -> Option<Self> {
        use serde_json::Value;

        match value {
            Value::Bool(b) => Some(Atom::Boolean(*b)),
            Value::String(s) => Some(Atom::String(s.clone())),
            Value::Number(n) if *ty == AtomicType::Real => n.as_f64().map(Atom::Real),
            Value::Number(n) => n
                .as_i64()
                .map(Atom::Integer)
                .or_else(|| n.as_f64().map(Atom::Real)),
            _ => None,
        }
    }

    /// Check whether this literal is a valid value of the given atomic type.
    pub fn matches(&self, ty: &AtomicType) -> bool {
        matches!(
            (self, ty),
            (Atom::Integer(_), AtomicType::Integer)
                | (Atom::Real(_), AtomicType::Real)
                | (Atom::Boolean(_), AtomicType::Boolean)
                | (Atom::String(_), AtomicType::String)
        )
    }

    /// The atomic type this literal belongs to.
    pub fn atomic_type(&self) -> AtomicType {
        match self {
            Atom::Integer(_) => AtomicType::Integer,
            Atom::Real(_) => AtomicType::Real,
            Atom::Boolean(_) => AtomicType::Boolean,
            Atom::String(_) => AtomicType::String,
        }
    }
}

/// Plain textual form, without quotes.
impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Integer(i) => write!(f, "{}", i),
            Atom::Real(r) => write!(f, "{}", r),
            Atom::Boolean(b) => write!(f, "{}", b),
            Atom::String(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_atomic_type_from_str() {
        assert_eq!(AtomicType::from("integer"), AtomicType::Integer);
        assert_eq!(AtomicType::from("uuid"), AtomicType::Uuid);
        assert_eq!(
            AtomicType::from("bytes"),
            AtomicType::Unsupported("bytes".to_string())
        );
        assert!(!AtomicType::from("bytes").is_supported());
    }

    #[test]
    fn test_atomic_type_deserialize() {
        let ty: AtomicType = serde_json::from_value(json!("real")).unwrap();
        assert_eq!(ty, AtomicType::Real);
        assert_eq!(ty.to_string(), "real");
    }

    #[test]
    fn test_atom_from_json() {
        assert_eq!(
            Atom::from_json(&json!(7), &AtomicType::Integer),
            Some(Atom::Integer(7))
        );
        assert_eq!(
            Atom::from_json(&json!(7), &AtomicType::Real),
            Some(Atom::Real(7.0))
        );
        assert_eq!(
            Atom::from_json(&json!("linux-htb"), &AtomicType::String),
            Some(Atom::String("linux-htb".to_string()))
        );
        assert_eq!(Atom::from_json(&json!(null), &AtomicType::String), None);
    }

    #[test]
    fn test_atom_matches() {
        assert!(Atom::Integer(1).matches(&AtomicType::Integer));
        assert!(!Atom::Integer(1).matches(&AtomicType::String));
        assert!(!Atom::String("x".into()).matches(&AtomicType::Uuid));
    }

    #[test]
    fn test_atom_display() {
        assert_eq!(Atom::Integer(-3).to_string(), "-3");
        assert_eq!(Atom::Boolean(true).to_string(), "true");
        assert_eq!(Atom::String("active-backup".into()).to_string(), "active-backup");
    }
}
