//! The model consumed by renderers.
//!
//! A [`ModelData`] describes one table: the record type to emit, its fields
//! in output order, and the enum aliases its columns need. Renderers outside
//! this crate should rely only on the key set in [`keys`], which is also what
//! [`ModelData::to_value`] serializes to.

use ovsgen_schema::{Atom, AtomicType};
use serde::Serialize;

/// Stable key names of the serialized model.
pub mod keys {
    pub const TABLE_NAME: &str = "TableName";
    pub const PACKAGE_NAME: &str = "PackageName";
    pub const STRUCT_NAME: &str = "StructName";
    pub const FIELDS: &str = "Fields";
    pub const ENUMS: &str = "Enums";

    /// Keys of each entry in [`FIELDS`].
    pub const FIELD_COLUMN: &str = "Column";
    pub const FIELD_NAME: &str = "Name";
    pub const FIELD_TYPE: &str = "Type";
    pub const FIELD_TAG: &str = "Tag";

    /// Keys of each entry in [`ENUMS`].
    pub const ENUM_ALIAS: &str = "Alias";
    pub const ENUM_TYPE: &str = "Type";
    pub const ENUM_SETS: &str = "Sets";
}

/// Column name of the row identity field.
pub const IDENTITY_COLUMN: &str = "_uuid";

/// Field name of the row identity field.
pub const IDENTITY_FIELD: &str = "UUID";

/// A single field of the generated record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
    /// Original column name in the schema
    #[serde(rename = "Column")]
    pub column: String,
    /// Normalized field name
    #[serde(rename = "Name")]
    pub name: String,
    /// Target type descriptor
    #[serde(rename = "Type")]
    pub ty: String,
    /// Serialization tag binding the field to its column
    #[serde(rename = "Tag")]
    pub tag: String,
}

impl FieldDescriptor {
    pub fn new(column: impl Into<String>, name: impl Into<String>, ty: impl Into<String>) -> Self {
        let column = column.into();
        Self {
            tag: tag(&column),
            column,
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// The row identity field, always first in a model.
    pub fn identity(ty: impl Into<String>) -> Self {
        Self::new(IDENTITY_COLUMN, IDENTITY_FIELD, ty)
    }
}

/// Serialization tag for a column (e.g., `ovs:"name"`).
///
/// The tag always carries the column name exactly as written in the schema.
pub fn tag(column: &str) -> String {
    format!("ovs:\"{}\"", column)
}

/// An enum alias and its allowed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDescriptor {
    /// Generated alias name (table type name + normalized column)
    #[serde(rename = "Alias")]
    pub alias: String,
    /// Underlying schema type of the values
    #[serde(skip)]
    pub atomic: AtomicType,
    /// Underlying target type
    #[serde(rename = "Type")]
    pub ty: String,
    /// Allowed values, in schema order
    #[serde(rename = "Sets")]
    pub values: Vec<Atom>,
    /// Constant identifier of each value, parallel to `values`
    #[serde(skip)]
    pub constants: Vec<String>,
}

impl EnumDescriptor {
    /// Values paired with their constant identifiers.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &Atom)> {
        self.constants.iter().map(String::as_str).zip(&self.values)
    }
}

/// Everything needed to render one table.
///
/// Built by [`SchemaMapper`](crate::SchemaMapper) and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModelData {
    table_name: String,
    package_name: String,
    struct_name: String,
    fields: Vec<FieldDescriptor>,
    enums: Vec<EnumDescriptor>,
}

impl ModelData {
    pub(crate) fn new(
        table_name: impl Into<String>,
        package_name: impl Into<String>,
        struct_name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        enums: Vec<EnumDescriptor>,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            package_name: package_name.into(),
            struct_name: struct_name.into(),
            fields,
            enums,
        }
    }

    /// Table name as written in the schema.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Package the generated code belongs to.
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Name of the generated record type.
    pub fn struct_name(&self) -> &str {
        &self.struct_name
    }

    /// Fields in output order (identity first, then by column name).
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Enum aliases in column order.
    pub fn enums(&self) -> &[EnumDescriptor] {
        &self.enums
    }

    /// Look up a field by its original column name.
    pub fn field(&self, column: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.column == column)
    }

    /// Serialize to the documented key set for external renderers.
    pub fn to_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
