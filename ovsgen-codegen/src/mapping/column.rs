//! Column type resolution.

use ovsgen_core::NameNormalizer;
use ovsgen_schema::{AtomicType, ColumnKind, ColumnSchema};

use crate::{EnumDescriptor, MappingError, TypeMapper};

/// Resolved target type of a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMapping {
    /// Target type descriptor (e.g., `[]string`)
    pub ty: String,
    /// Enum alias required by the column, if its key is enum-constrained
    pub enum_descriptor: Option<EnumDescriptor>,
}

/// Resolves column types against a [`TypeMapper`].
pub struct ColumnResolver<'a> {
    types: &'a dyn TypeMapper,
    naming: NameNormalizer,
    table: &'a str,
}

impl<'a> ColumnResolver<'a> {
    pub fn new(types: &'a dyn TypeMapper, naming: NameNormalizer, table: &'a str) -> Self {
        Self {
            types,
            naming,
            table,
        }
    }

    /// Resolve the type of one column.
    ///
    /// An enum-constrained key always yields an [`EnumDescriptor`], even when
    /// the column is a map and the descriptor ends up unused by the type.
    pub fn resolve(&self, column: &str, schema: &ColumnSchema) -> Result<ColumnMapping, MappingError> {
        let enum_descriptor = self.enum_descriptor(column, schema)?;

        let ty = match schema.kind() {
            ColumnKind::Enum => match &enum_descriptor {
                Some(e) => e.alias.clone(),
                None => self.atomic(column, &schema.key().atomic)?.to_string(),
            },
            ColumnKind::Map => {
                let key = self.atomic(column, &schema.key().atomic)?;
                let value = match schema.value() {
                    Some(value) => self.atomic(column, &value.atomic)?,
                    None => key,
                };
                self.types.map_mapping(key, value)
            }
            ColumnKind::Set => match &enum_descriptor {
                Some(e) => self.types.map_sequence(&e.alias),
                None => {
                    let element = self.atomic(column, &schema.key().atomic)?;
                    self.types.map_sequence(element)
                }
            },
            ColumnKind::Atomic => self.atomic(column, &schema.key().atomic)?.to_string(),
        };

        Ok(ColumnMapping {
            ty,
            enum_descriptor,
        })
    }

    fn enum_descriptor(
        &self,
        column: &str,
        schema: &ColumnSchema,
    ) -> Result<Option<EnumDescriptor>, MappingError> {
        let key = schema.key();
        let values = match &key.enum_values {
            Some(values) => values,
            None => return Ok(None),
        };

        let alias = self.naming.enum_alias(self.table, column);
        let constants = values
            .iter()
            .map(|value| self.types.constant_name(&self.naming, &alias, value))
            .collect();

        Ok(Some(EnumDescriptor {
            atomic: key.atomic.clone(),
            ty: self.atomic(column, &key.atomic)?.to_string(),
            values: values.clone(),
            constants,
            alias,
        }))
    }

    fn atomic(&self, column: &str, atomic: &AtomicType) -> Result<&'static str, MappingError> {
        self.types
            .map_atomic(atomic)
            .ok_or_else(|| MappingError::UnsupportedTypeKind {
                table: self.table.to_string(),
                column: column.to_string(),
                kind: atomic.to_string(),
            })
    }
}
