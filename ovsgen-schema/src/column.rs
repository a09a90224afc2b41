//! Column schema types.
//!
//! A column's `type` is either a bare atomic type name (`"string"`) or an
//! object with a `key`, an optional `value`, and `min`/`max` cardinality.
//! Base types follow the same pattern and may carry constraints, most
//! notably an `enum` literal set.

use serde::Deserialize;

use crate::{Atom, AtomicType};

/// The declared kind of a column, derived from its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// A single atomic value
    Atomic,
    /// A single value constrained to an enum literal set
    Enum,
    /// Zero or more key values (also used for optional values)
    Set,
    /// Key/value pairs
    Map,
}

/// Strength of a reference to another table's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefType {
    #[default]
    Strong,
    Weak,
}

/// Upper bound on the number of values in a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawMax")]
pub enum Max {
    Bounded(u64),
    Unlimited,
}

impl Default for Max {
    fn default() -> Self {
        Max::Bounded(1)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMax {
    Bounded(u64),
    Text(String),
}

impl TryFrom<RawMax> for Max {
    type Error = String;

    fn try_from(raw: RawMax) -> Result<Self, Self::Error> {
        match raw {
            RawMax::Bounded(n) => Ok(Max::Bounded(n)),
            RawMax::Text(s) if s == "unlimited" => Ok(Max::Unlimited),
            RawMax::Text(s) => Err(format!(
                "invalid max '{}', expected a number or \"unlimited\"",
                s
            )),
        }
    }
}

/// A base type: an atomic type plus optional constraints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawBaseType")]
pub struct BaseType {
    pub atomic: AtomicType,
    /// Allowed literal values, in the order they appear in the schema
    pub enum_values: Option<Vec<Atom>>,
    pub ref_table: Option<String>,
    pub ref_type: Option<RefType>,
    pub min_integer: Option<i64>,
    pub max_integer: Option<i64>,
    pub min_real: Option<f64>,
    pub max_real: Option<f64>,
    pub min_length: Option<u64>,
    pub max_length: Option<u64>,
}

impl BaseType {
    /// Create an unconstrained base type.
    pub fn new(atomic: AtomicType) -> Self {
        Self {
            atomic,
            enum_values: None,
            ref_table: None,
            ref_type: None,
            min_integer: None,
            max_integer: None,
            min_real: None,
            max_real: None,
            min_length: None,
            max_length: None,
        }
    }

    /// Constrain the base type to a literal set.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = Atom>) -> Self {
        self.enum_values = Some(values.into_iter().collect());
        self
    }

    /// Make this a reference to rows of another table.
    pub fn with_ref(mut self, table: impl Into<String>, ref_type: RefType) -> Self {
        self.ref_table = Some(table.into());
        self.ref_type = Some(ref_type);
        self
    }

    pub fn is_enum(&self) -> bool {
        self.enum_values.is_some()
    }
}

impl From<AtomicType> for BaseType {
    fn from(atomic: AtomicType) -> Self {
        Self::new(atomic)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawBaseType {
    Atomic(AtomicType),
    Object(RawBaseObject),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBaseObject {
    #[serde(rename = "type")]
    atomic: AtomicType,
    #[serde(rename = "enum")]
    enum_values: Option<serde_json::Value>,
    ref_table: Option<String>,
    ref_type: Option<RefType>,
    min_integer: Option<i64>,
    max_integer: Option<i64>,
    min_real: Option<f64>,
    max_real: Option<f64>,
    min_length: Option<u64>,
    max_length: Option<u64>,
}

impl TryFrom<RawBaseType> for BaseType {
    type Error = String;

    fn try_from(raw: RawBaseType) -> Result<Self, Self::Error> {
        let raw = match raw {
            RawBaseType::Atomic(atomic) => return Ok(BaseType::new(atomic)),
            RawBaseType::Object(raw) => raw,
        };

        let enum_values = raw
            .enum_values
            .map(|value| parse_enum(&value, &raw.atomic))
            .transpose()?;

        Ok(Self {
            atomic: raw.atomic,
            enum_values,
            ref_table: raw.ref_table,
            ref_type: raw.ref_type,
            min_integer: raw.min_integer,
            max_integer: raw.max_integer,
            min_real: raw.min_real,
            max_real: raw.max_real,
            min_length: raw.min_length,
            max_length: raw.max_length,
        })
    }
}

/// Parse an enum constraint: either a single atom or `["set", [atoms...]]`.
fn parse_enum(value: &serde_json::Value, ty: &AtomicType) -> Result<Vec<Atom>, String> {
    use serde_json::Value;

    let items = match value {
        Value::Array(pair) => match pair.as_slice() {
            [Value::String(tag), Value::Array(items)] if tag == "set" => items.as_slice(),
            _ => return Err(format!("invalid enum {}, expected [\"set\", [...]]", value)),
        },
        scalar => std::slice::from_ref(scalar),
    };

    items
        .iter()
        .map(|item| {
            Atom::from_json(item, ty).ok_or_else(|| format!("invalid enum value {}", item))
        })
        .collect()
}

/// The full type of a column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawColumnType")]
pub struct ColumnType {
    pub key: BaseType,
    pub value: Option<BaseType>,
    pub min: u64,
    pub max: Max,
}

impl ColumnType {
    /// A single value of the given base type.
    pub fn scalar(key: impl Into<BaseType>) -> Self {
        Self {
            key: key.into(),
            value: None,
            min: 1,
            max: Max::Bounded(1),
        }
    }

    /// Any number of values of the given base type.
    pub fn set(key: impl Into<BaseType>) -> Self {
        Self {
            key: key.into(),
            value: None,
            min: 0,
            max: Max::Unlimited,
        }
    }

    /// Any number of key/value pairs.
    pub fn map(key: impl Into<BaseType>, value: impl Into<BaseType>) -> Self {
        Self {
            key: key.into(),
            value: Some(value.into()),
            min: 0,
            max: Max::Unlimited,
        }
    }

    /// Override the cardinality bounds.
    pub fn with_bounds(mut self, min: u64, max: Max) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    /// Derive the column kind.
    ///
    /// A value type makes a map; any cardinality other than exactly one
    /// (including optional `min: 0, max: 1`) makes a set; an enum-constrained
    /// scalar key makes an enum.
    pub fn kind(&self) -> ColumnKind {
        if self.value.is_some() {
            ColumnKind::Map
        } else if self.min != 1 || self.max != Max::Bounded(1) {
            ColumnKind::Set
        } else if self.key.is_enum() {
            ColumnKind::Enum
        } else {
            ColumnKind::Atomic
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumnType {
    Atomic(AtomicType),
    Object(RawColumnObject),
}

#[derive(Deserialize)]
struct RawColumnObject {
    key: BaseType,
    value: Option<BaseType>,
    min: Option<u64>,
    max: Option<Max>,
}

impl TryFrom<RawColumnType> for ColumnType {
    type Error = String;

    fn try_from(raw: RawColumnType) -> Result<Self, Self::Error> {
        let raw = match raw {
            RawColumnType::Atomic(atomic) => return Ok(ColumnType::scalar(atomic)),
            RawColumnType::Object(raw) => raw,
        };

        let min = raw.min.unwrap_or(1);
        let max = raw.max.unwrap_or_default();
        match max {
            Max::Bounded(0) => return Err("max must be at least 1".to_string()),
            Max::Bounded(max) if min > max => {
                return Err(format!("min {} exceeds max {}", min, max));
            }
            _ => {}
        }
        if min > 1 {
            return Err(format!("min must be 0 or 1, got {}", min));
        }

        Ok(Self {
            key: raw.key,
            value: raw.value,
            min,
            max,
        })
    }
}

fn default_mutable() -> bool {
    true
}

/// Schema of a single column.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnSchema {
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    #[serde(default)]
    pub ephemeral: bool,
    #[serde(default = "default_mutable")]
    pub mutable: bool,
}

impl ColumnSchema {
    pub fn new(column_type: ColumnType) -> Self {
        Self {
            column_type,
            ephemeral: false,
            mutable: true,
        }
    }

    /// A required column holding one atomic value.
    pub fn atomic(atomic: AtomicType) -> Self {
        Self::new(ColumnType::scalar(atomic))
    }

    /// The declared kind of this column.
    pub fn kind(&self) -> ColumnKind {
        self.column_type.kind()
    }

    /// The key (or sole) element type.
    pub fn key(&self) -> &BaseType {
        &self.column_type.key
    }

    /// The value element type of a map column.
    pub fn value(&self) -> Option<&BaseType> {
        self.column_type.value.as_ref()
    }
}

impl From<ColumnType> for ColumnSchema {
    fn from(column_type: ColumnType) -> Self {
        Self::new(column_type)
    }
}
