use std::path::Path;

use eyre::{Result, eyre};
use ovsgen_codegen::{GenerateResult, LanguageCodegen, ModelData, PreviewFile, SchemaMapper};
use ovsgen_core::{File, Overwrite, WriteResult};
use ovsgen_schema::DatabaseSchema;
use tracing::{debug, info};

use crate::{GO_NAMING, GoRenderer, GoTypeMapper, OverrideTemplate};

/// Go code generator that produces one model file per OVSDB table
pub struct Generator<'a> {
    schema: &'a DatabaseSchema,
    package: String,
    tables: Option<Vec<String>>,
    template: OverrideTemplate,
    overwrite: Overwrite,
}

impl LanguageCodegen for Generator<'_> {
    fn language(&self) -> &'static str {
        "go"
    }

    fn file_extension(&self) -> &'static str {
        "go"
    }

    fn preview(&self) -> Result<Vec<PreviewFile>> {
        self.preview_files()
    }

    fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_files(output_dir)
    }
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a DatabaseSchema, package: impl Into<String>) -> Self {
        Self {
            schema,
            package: package.into(),
            tables: None,
            template: OverrideTemplate::default(),
            overwrite: Overwrite::Always,
        }
    }

    /// Only generate the given tables.
    pub fn with_tables<I, S>(mut self, tables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables = Some(tables.into_iter().map(Into::into).collect());
        self
    }

    /// Replace template blocks.
    pub fn with_template(mut self, template: OverrideTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the overwrite policy for written files.
    pub fn with_overwrite(mut self, overwrite: Overwrite) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Map the selected tables, in lexicographic order.
    pub fn models(&self) -> Result<Vec<ModelData>> {
        let mapper = SchemaMapper::with_naming(&GoTypeMapper, GO_NAMING);

        let names: Vec<&str> = match &self.tables {
            None => self.schema.sorted_table_names(),
            Some(selected) => {
                let mut names = Vec::with_capacity(selected.len());
                for name in selected {
                    if self.schema.table(name).is_none() {
                        return Err(eyre!(
                            "table '{}' not found in schema '{}'",
                            name,
                            self.schema.name
                        ));
                    }
                    names.push(name.as_str());
                }
                names.sort_unstable();
                names.dedup();
                names
            }
        };

        let mut models = Vec::with_capacity(names.len());
        for name in names {
            models.push(mapper.map_table(name, &self.package, &self.schema.tables[name])?);
        }
        Ok(models)
    }

    /// Render a single model with this generator's template.
    pub fn render(&self, model: &ModelData) -> String {
        GoRenderer::new(&self.template).render(model)
    }

    /// Preview generated files without writing to disk
    fn preview_files(&self) -> Result<Vec<PreviewFile>> {
        let files = self
            .models()?
            .iter()
            .map(|model| {
                debug!(table = model.table_name(), "rendering table");
                PreviewFile {
                    path: GO_NAMING.file_name(model.table_name(), self.file_extension()),
                    content: self.render(model),
                }
            })
            .collect();
        Ok(files)
    }

    /// Generate all files into the specified output directory
    fn generate_files(&self, output_dir: &Path) -> Result<GenerateResult> {
        let mut result = GenerateResult::default();

        for preview in self.preview_files()? {
            let file = File::new(output_dir.join(&preview.path), preview.content)
                .overwrite(self.overwrite);
            match file.write()? {
                WriteResult::Written => {
                    info!(path = %file.path().display(), "wrote file");
                    result.written.push(preview.path);
                }
                WriteResult::Unchanged => {
                    debug!(path = %file.path().display(), "file unchanged");
                    result.unchanged.push(preview.path);
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use ovsgen_codegen::{MappingError, testing::sample_database};

    use super::*;
    use crate::Block;

    #[test]
    fn test_preview_paths_sorted() {
        let schema = sample_database();
        let files = Generator::new(&schema, "ovsmodel").preview().unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "bridge.go",
                "meter.go",
                "nat.go",
                "port.go",
                "qos.go",
                "queue.go"
            ]
        );
        assert!(files.iter().all(|f| f.content.contains("package ovsmodel\n")));
    }

    #[test]
    fn test_selected_tables() {
        let schema = sample_database();
        let files = Generator::new(&schema, "ovsmodel")
            .with_tables(["QoS", "Bridge", "QoS"])
            .preview()
            .unwrap();
        let paths: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, vec!["bridge.go", "qos.go"]);
    }

    #[test]
    fn test_unknown_table() {
        let schema = sample_database();
        let err = Generator::new(&schema, "ovsmodel")
            .with_tables(["Missing"])
            .preview()
            .unwrap_err();
        assert!(err.to_string().contains("'Missing'"));
    }

    #[test]
    fn test_colliding_enum_constants_fail() {
        let schema: DatabaseSchema = r#"{
            "name": "Test",
            "version": "1.0.0",
            "tables": {
                "T": {
                    "columns": {
                        "mode": {
                            "type": { "key": { "type": "string", "enum": ["set", ["a-b", "a_b", ""]] } }
                        }
                    }
                }
            }
        }"#
        .parse()
        .unwrap();

        let err = Generator::new(&schema, "ovsmodel").preview().unwrap_err();
        let err = err.downcast_ref::<MappingError>().unwrap();
        assert!(matches!(
            err,
            MappingError::DuplicateEnumConstant { name, .. } if name == "TModeAB"
        ));
    }

    #[test]
    fn test_template_applies_to_every_file() {
        let schema = sample_database();
        let files = Generator::new(&schema, "ovsmodel")
            .with_template(OverrideTemplate::new().with_block(Block::Header, "// custom"))
            .preview()
            .unwrap();
        assert!(files.iter().all(|f| f.content.starts_with("// custom\n\npackage")));
    }

    #[test]
    fn test_generate_writes_files() {
        let schema = sample_database();
        let dir = tempfile::TempDir::new().unwrap();
        let generator = Generator::new(&schema, "ovsmodel").with_tables(["Port"]);

        let result = generator.generate(dir.path()).unwrap();
        assert_eq!(result.written, vec!["port.go"]);
        assert!(result.unchanged.is_empty());

        let content = std::fs::read_to_string(dir.path().join("port.go")).unwrap();
        assert!(content.contains("type Port struct {"));
    }

    #[test]
    fn test_generate_if_changed() {
        let schema = sample_database();
        let dir = tempfile::TempDir::new().unwrap();
        let generator = Generator::new(&schema, "ovsmodel")
            .with_tables(["Port"])
            .with_overwrite(Overwrite::IfChanged);

        generator.generate(dir.path()).unwrap();
        let result = generator.generate(dir.path()).unwrap();
        assert!(result.written.is_empty());
        assert_eq!(result.unchanged, vec!["port.go"]);
    }
}
