//! Optional `ovsgen.toml` configuration.
//!
//! ```toml
//! package = "ovsmodel"
//! output = "model"
//!
//! [templates]
//! extraTags = ' json:"{Column}"'
//! ```

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use eyre::{Result, WrapErr};
use ovsgen_codegen_go::OverrideTemplate;
use serde::Deserialize;

/// Configuration file looked up in the working directory.
pub const DEFAULT_CONFIG: &str = "ovsgen.toml";

/// Package name used when neither the CLI nor the config sets one.
pub const DEFAULT_PACKAGE: &str = "ovsmodel";

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Go package name of the generated files
    pub package: Option<String>,
    /// Output directory
    pub output: Option<PathBuf>,
    /// Template block overrides, keyed by block name
    #[serde(default)]
    pub templates: BTreeMap<String, String>,
}

impl Config {
    /// Read a config file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read '{}'", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("failed to parse '{}'", path.display()))
    }

    /// Read the given config file, or `ovsgen.toml` if it exists.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::open(path),
            None if Path::new(DEFAULT_CONFIG).is_file() => Self::open(DEFAULT_CONFIG),
            None => Ok(Self::default()),
        }
    }

    /// Package name, preferring the CLI value.
    pub fn package(&self, cli: Option<&str>) -> String {
        cli.or(self.package.as_deref())
            .unwrap_or(DEFAULT_PACKAGE)
            .to_string()
    }

    /// Output directory, preferring the CLI value.
    pub fn output(&self, cli: Option<&Path>) -> PathBuf {
        cli.or(self.output.as_deref())
            .unwrap_or(Path::new("."))
            .to_path_buf()
    }

    /// Template built from the `[templates]` table.
    pub fn template(&self) -> Result<OverrideTemplate> {
        OverrideTemplate::from_named(&self.templates).wrap_err("invalid [templates] entry")
    }
}
