use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use ovsgen_codegen_go::GO_NAMING;
use ovsgen_schema::DatabaseSchema;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct ListCommand {
    /// Path to the OVSDB schema (e.g., vswitch.ovsschema)
    pub schema: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let schema = DatabaseSchema::from_file(&self.schema).unwrap_or_exit();

        if schema.tables.is_empty() {
            println!("No tables defined");
            return Ok(());
        }

        let names = schema.sorted_table_names();
        let width = names.iter().map(|n| n.len()).max().unwrap_or(0);

        println!("Tables:");
        for name in names {
            let table = &schema.tables[name];
            let count = table.columns.len();
            println!(
                "  {:width$}  {} ({} column{}{})",
                name,
                GO_NAMING.type_name(name),
                count,
                if count == 1 { "" } else { "s" },
                if table.is_root { ", root" } else { "" },
                width = width
            );
        }

        Ok(())
    }
}
