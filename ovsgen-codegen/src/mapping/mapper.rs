//! Table to model mapping.

use std::collections::{HashMap, hash_map::Entry};

use ovsgen_core::NameNormalizer;
use ovsgen_schema::{AtomicType, DatabaseSchema, TableSchema};
use tracing::debug;

use super::ColumnResolver;
use crate::{
    FieldDescriptor, MappingError, ModelData, TypeMapper,
    model::{IDENTITY_COLUMN, IDENTITY_FIELD},
};

/// Builds [`ModelData`] for tables using a language's [`TypeMapper`].
pub struct SchemaMapper<'a> {
    types: &'a dyn TypeMapper,
    naming: NameNormalizer,
}

impl<'a> SchemaMapper<'a> {
    /// Create a mapper using the default OVSDB naming rules.
    pub fn new(types: &'a dyn TypeMapper) -> Self {
        Self::with_naming(types, NameNormalizer::default())
    }

    /// Create a mapper with a custom name normalizer.
    pub fn with_naming(types: &'a dyn TypeMapper, naming: NameNormalizer) -> Self {
        Self { types, naming }
    }

    /// Map one table.
    ///
    /// The identity field comes first, followed by one field per column in
    /// lexicographic order of the raw column names.
    pub fn map_table(
        &self,
        table_name: &str,
        package: &str,
        table: &TableSchema,
    ) -> Result<ModelData, MappingError> {
        let struct_name = self.naming.type_name(table_name);
        if struct_name.is_empty() {
            return Err(MappingError::EmptyTypeName {
                table: table_name.to_string(),
            });
        }

        let identity_ty = self.types.map_atomic(&AtomicType::Uuid).ok_or_else(|| {
            MappingError::UnsupportedTypeKind {
                table: table_name.to_string(),
                column: IDENTITY_COLUMN.to_string(),
                kind: AtomicType::Uuid.to_string(),
            }
        })?;

        let resolver = ColumnResolver::new(self.types, self.naming, table_name);
        let mut fields = vec![FieldDescriptor::identity(identity_ty)];
        let mut enums = Vec::new();
        let mut field_owners: HashMap<String, String> = HashMap::new();
        let mut alias_owners: HashMap<String, String> = HashMap::new();
        // Aliases and constants share one namespace in the generated file
        let mut declared: HashMap<String, String> = HashMap::new();
        field_owners.insert(IDENTITY_FIELD.to_string(), IDENTITY_COLUMN.to_string());

        for column_name in table.sorted_column_names() {
            let column = &table.columns[column_name];

            let name = self.naming.normalize(column_name);
            if name.is_empty() {
                return Err(MappingError::EmptyFieldName {
                    table: table_name.to_string(),
                    column: column_name.to_string(),
                });
            }

            let mapping = resolver.resolve(column_name, column)?;

            if let Some(e) = &mapping.enum_descriptor {
                if let Some(first) = alias_owners.insert(e.alias.clone(), column_name.to_string()) {
                    return Err(MappingError::DuplicateEnumAlias {
                        table: table_name.to_string(),
                        alias: e.alias.clone(),
                        first,
                        second: column_name.to_string(),
                    });
                }

                let declare = |declared: &mut HashMap<String, String>, name: &str, owner: String| {
                    match declared.entry(name.to_string()) {
                        Entry::Occupied(entry) => Err(MappingError::DuplicateEnumConstant {
                            table: table_name.to_string(),
                            column: column_name.to_string(),
                            name: name.to_string(),
                            first: entry.get().clone(),
                            second: owner,
                        }),
                        Entry::Vacant(entry) => {
                            entry.insert(owner);
                            Ok(())
                        }
                    }
                };

                declare(
                    &mut declared,
                    &e.alias,
                    format!("enum type of column '{}'", column_name),
                )?;
                for (constant, value) in e.constants() {
                    declare(
                        &mut declared,
                        constant,
                        format!(
                            "value {} of column '{}'",
                            self.types.format_literal(value),
                            column_name
                        ),
                    )?;
                }
            }

            if let Some(first) = field_owners.insert(name.clone(), column_name.to_string()) {
                return Err(MappingError::DuplicateFieldName {
                    table: table_name.to_string(),
                    name,
                    first,
                    second: column_name.to_string(),
                });
            }

            debug!(
                table = table_name,
                column = column_name,
                field = %name,
                ty = %mapping.ty,
                "mapped column"
            );

            fields.push(FieldDescriptor::new(column_name, name, mapping.ty));
            enums.extend(mapping.enum_descriptor);
        }

        debug!(
            table = table_name,
            fields = fields.len(),
            enums = enums.len(),
            "mapped table"
        );

        Ok(ModelData::new(
            table_name,
            package,
            struct_name,
            fields,
            enums,
        ))
    }

    /// Map every table of a database, in lexicographic table order.
    ///
    /// Stops at the first table that fails to map.
    pub fn map_database(
        &self,
        package: &str,
        schema: &DatabaseSchema,
    ) -> Result<Vec<ModelData>, MappingError> {
        schema
            .sorted_table_names()
            .into_iter()
            .map(|name| self.map_table(name, package, &schema.tables[name]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use ovsgen_schema::{Atom, BaseType, ColumnSchema, ColumnType};

    use super::*;
    use crate::testing::{StubTypeMapper, bridge_table, nat_table, qos_table, sample_database};

    fn field_summary(model: &ModelData) -> Vec<(&str, &str, &str)> {
        model
            .fields()
            .iter()
            .map(|f| (f.column.as_str(), f.name.as_str(), f.ty.as_str()))
            .collect()
    }

    #[test]
    fn test_bridge_without_enums() {
        let table = TableSchema::new()
            .column("name", ColumnSchema::atomic(AtomicType::String))
            .column("ports", ColumnType::set(AtomicType::Uuid));

        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("bridge", "ovsmodel", &table)
            .unwrap();

        assert_eq!(model.table_name(), "bridge");
        assert_eq!(model.package_name(), "ovsmodel");
        assert_eq!(model.struct_name(), "Bridge");
        assert_eq!(
            field_summary(&model),
            vec![
                ("_uuid", "UUID", "string"),
                ("name", "Name", "string"),
                ("ports", "Ports", "[]string"),
            ]
        );
        assert!(model.enums().is_empty());
    }

    #[test]
    fn test_fields_sorted_identity_first() {
        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("Bridge", "ovsmodel", &bridge_table())
            .unwrap();

        let columns: Vec<&str> = model.fields().iter().map(|f| f.column.as_str()).collect();
        assert_eq!(
            columns,
            vec![
                "_uuid",
                "datapath_id",
                "external_ids",
                "fail_mode",
                "name",
                "ports",
                "stp_enable",
            ]
        );
        assert_eq!(model.field("external_ids").unwrap().name, "ExternalIDs");
        assert_eq!(model.field("fail_mode").unwrap().ty, "[]BridgeFailMode");
        assert_eq!(model.field("stp_enable").unwrap().tag, "ovs:\"stp_enable\"");
    }

    #[test]
    fn test_qos_enum() {
        let table = TableSchema::new().column(
            "type",
            ColumnType::scalar(BaseType::new(AtomicType::String).with_enum([
                Atom::String("linux-htb".into()),
                Atom::String("linux-hfsc".into()),
            ])),
        );

        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("qos", "ovsmodel", &table)
            .unwrap();

        assert_eq!(model.field("type").unwrap().ty, "QosType");
        assert_eq!(model.enums().len(), 1);
        let e = &model.enums()[0];
        assert_eq!(e.alias, "QosType");
        assert_eq!(
            e.values,
            vec![
                Atom::String("linux-htb".into()),
                Atom::String("linux-hfsc".into())
            ]
        );
    }

    #[test]
    fn test_initialism_column() {
        let table =
            TableSchema::new().column("dnat_and_snat", ColumnSchema::atomic(AtomicType::Boolean));
        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("NAT", "ovsmodel", &table)
            .unwrap();
        assert_eq!(model.field("dnat_and_snat").unwrap().name, "DNATAndSNAT");
    }

    #[test]
    fn test_deterministic() {
        let mapper = SchemaMapper::new(&StubTypeMapper);
        let first = mapper.map_table("NAT", "ovsmodel", &nat_table()).unwrap();
        for _ in 0..10 {
            let again = mapper.map_table("NAT", "ovsmodel", &nat_table()).unwrap();
            assert_eq!(first, again);
            assert_eq!(
                first.to_value().unwrap().to_string(),
                again.to_value().unwrap().to_string()
            );
        }
    }

    #[test]
    fn test_empty_field_name() {
        let table = TableSchema::new().column("__", ColumnSchema::atomic(AtomicType::String));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::EmptyFieldName {
                table: "T".into(),
                column: "__".into(),
            }
        );
    }

    #[test]
    fn test_empty_type_name() {
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("_", "m", &TableSchema::new())
            .unwrap_err();
        assert!(matches!(err, MappingError::EmptyTypeName { .. }));
    }

    #[test]
    fn test_duplicate_field_name() {
        let table = TableSchema::new()
            .column("external_ids", ColumnSchema::atomic(AtomicType::String))
            .column("external-ids", ColumnSchema::atomic(AtomicType::String));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateFieldName {
                table: "T".into(),
                name: "ExternalIDs".into(),
                first: "external-ids".into(),
                second: "external_ids".into(),
            }
        );
    }

    #[test]
    fn test_collision_with_identity() {
        let table = TableSchema::new().column("uuid", ColumnSchema::atomic(AtomicType::String));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::DuplicateFieldName { first, .. } if first == "_uuid"
        ));
    }

    #[test]
    fn test_duplicate_enum_alias() {
        let level = || {
            ColumnType::scalar(
                BaseType::new(AtomicType::String).with_enum([Atom::String("a".into())]),
            )
        };
        let table = TableSchema::new()
            .column("fail_mode", level())
            .column("fail-mode", level());
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("Bridge", "m", &table)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::DuplicateEnumAlias { alias, .. } if alias == "BridgeFailMode"
        ));
    }

    fn enum_column(values: &[&str]) -> ColumnType {
        ColumnType::scalar(
            BaseType::new(AtomicType::String)
                .with_enum(values.iter().map(|v| Atom::String(v.to_string()))),
        )
    }

    #[test]
    fn test_duplicate_enum_constant() {
        let table = TableSchema::new().column("mode", enum_column(&["a-b", "a_b"]));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateEnumConstant {
                table: "T".into(),
                column: "mode".into(),
                name: "TModeAB".into(),
                first: "value \"a-b\" of column 'mode'".into(),
                second: "value \"a_b\" of column 'mode'".into(),
            }
        );
    }

    #[test]
    fn test_case_only_enum_values_collide() {
        let table = TableSchema::new().column("mode", enum_column(&["X", "x"]));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::DuplicateEnumConstant { name, .. } if name == "TModeX"
        ));
    }

    #[test]
    fn test_empty_enum_value_collides_with_alias() {
        let table = TableSchema::new().column("mode", enum_column(&["on", ""]));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert_eq!(
            err,
            MappingError::DuplicateEnumConstant {
                table: "T".into(),
                column: "mode".into(),
                name: "TMode".into(),
                first: "enum type of column 'mode'".into(),
                second: "value \"\" of column 'mode'".into(),
            }
        );
    }

    #[test]
    fn test_constant_collides_with_later_alias() {
        // TMode + "type" and the alias of column mode_type are both TModeType
        let table = TableSchema::new()
            .column("mode", enum_column(&["type"]))
            .column("mode_type", enum_column(&["a"]));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert!(matches!(
            err,
            MappingError::DuplicateEnumConstant { column, name, .. }
                if column == "mode_type" && name == "TModeType"
        ));
    }

    #[test]
    fn test_distinct_enum_constants() {
        let table = TableSchema::new().column("mode", enum_column(&["a-b", "c"]));
        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap();
        let constants: Vec<&str> = model.enums()[0].constants().map(|(name, _)| name).collect();
        assert_eq!(constants, vec!["TModeAB", "TModeC"]);
    }

    #[test]
    fn test_unsupported_type_aborts_table() {
        let table = TableSchema::new()
            .column("name", ColumnSchema::atomic(AtomicType::String))
            .column("blob", ColumnSchema::atomic(AtomicType::from("bytes")));
        let err = SchemaMapper::new(&StubTypeMapper)
            .map_table("T", "m", &table)
            .unwrap_err();
        assert!(matches!(err, MappingError::UnsupportedTypeKind { .. }));
    }

    #[test]
    fn test_map_database_sorted() {
        let models = SchemaMapper::new(&StubTypeMapper)
            .map_database("ovsmodel", &sample_database())
            .unwrap();
        let names: Vec<&str> = models.iter().map(|m| m.table_name()).collect();
        assert_eq!(names, vec!["Bridge", "Meter", "NAT", "Port", "QoS", "Queue"]);
        assert!(models.iter().all(|m| m.package_name() == "ovsmodel"));
    }

    #[test]
    fn test_qos_fixture() {
        let model = SchemaMapper::new(&StubTypeMapper)
            .map_table("QoS", "ovsmodel", &qos_table())
            .unwrap();
        assert_eq!(model.struct_name(), "QoS");
        assert_eq!(model.field("queues").unwrap().ty, "map[int]string");
        assert_eq!(model.enums()[0].alias, "QoSType");
    }
}
