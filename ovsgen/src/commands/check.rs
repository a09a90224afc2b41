use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use ovsgen_codegen::SchemaMapper;
use ovsgen_codegen_go::{GO_NAMING, GoTypeMapper};
use ovsgen_schema::DatabaseSchema;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct CheckCommand {
    /// Path to the OVSDB schema (e.g., vswitch.ovsschema)
    pub schema: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let schema = DatabaseSchema::from_file(&self.schema).unwrap_or_exit();

        let mapper = SchemaMapper::with_naming(&GoTypeMapper, GO_NAMING);
        let models = mapper.map_database("check", &schema).unwrap_or_exit();

        println!("✓ {} is valid\n", self.schema.display());
        println!("  {} v{}", schema.name, schema.version);

        let enum_count: usize = models.iter().map(|m| m.enums().len()).sum();
        println!(
            "  {} table{}, {} enum{}",
            models.len(),
            if models.len() == 1 { "" } else { "s" },
            enum_count,
            if enum_count == 1 { "" } else { "s" }
        );

        Ok(())
    }
}
