use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use ovsgen_codegen_go::{Generator, LanguageCodegen};
use ovsgen_schema::DatabaseSchema;
use tracing::info;

use super::UnwrapOrExit;
use crate::config::Config;

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to the OVSDB schema (e.g., vswitch.ovsschema)
    pub schema: PathBuf,

    /// Go package name (defaults to "ovsmodel")
    #[arg(short, long)]
    pub package: Option<String>,

    /// Output directory (defaults to current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Path to ovsgen.toml (defaults to ./ovsgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Only generate the given table (repeatable)
    #[arg(short, long = "table", value_name = "TABLE")]
    pub tables: Vec<String>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = Config::load(self.config.as_deref())?;
        let schema = DatabaseSchema::from_file(&self.schema).unwrap_or_exit();

        let package = config.package(self.package.as_deref());
        let output = config.output(self.output.as_deref());
        info!(schema = %schema.name, package = %package, "generating models");

        let mut generator = Generator::new(&schema, &package).with_template(config.template()?);
        if !self.tables.is_empty() {
            generator = generator.with_tables(self.tables.iter().cloned());
        }

        if self.dry_run {
            self.run_preview(&generator)
        } else {
            self.run_generation(&generator, &output)
        }
    }

    fn run_generation(&self, generator: &Generator<'_>, output: &std::path::Path) -> Result<()> {
        let result = generator
            .generate(output)
            .wrap_err("Failed to generate code")?;

        println!(
            "Generated {} file{} in {}",
            result.written.len(),
            if result.written.len() == 1 { "" } else { "s" },
            output.display()
        );
        for path in &result.written {
            println!("  {}", path);
        }

        Ok(())
    }

    fn run_preview<G: LanguageCodegen>(&self, generator: &G) -> Result<()> {
        let files = generator.preview().wrap_err("Failed to generate code")?;

        for file in &files {
            println!("── {} ──", file.path);
            println!("{}", file.content);
        }

        println!("── Summary ──");
        println!("{} files would be generated", files.len());

        Ok(())
    }
}
