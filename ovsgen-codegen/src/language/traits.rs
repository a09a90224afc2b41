//! Language-agnostic code generation traits.

use std::path::Path;

use eyre::Result;
use ovsgen_core::NameNormalizer;
use ovsgen_schema::{Atom, AtomicType};

/// Trait for language-specific code generators.
///
/// Implement this trait to add support for generating model code in a new language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "go")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "go")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Result<Vec<PreviewFile>>;

    /// Generate all files into the specified output directory
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files that were written, relative to the output directory
    pub written: Vec<String>,
    /// Files whose content was already up to date
    pub unchanged: Vec<String>,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}

/// Trait for mapping schema types to language-specific type strings.
///
/// Implement this trait for each target language to provide type mappings.
pub trait TypeMapper {
    /// The target language name
    fn language(&self) -> &'static str;

    /// Map an atomic type, or `None` if the language has no mapping for it
    fn map_atomic(&self, atomic: &AtomicType) -> Option<&'static str>;

    /// Map a sequence of elements (e.g., `[]string` in Go)
    fn map_sequence(&self, element: &str) -> String;

    /// Map a key/value mapping (e.g., `map[string]int` in Go)
    fn map_mapping(&self, key: &str, value: &str) -> String;

    /// Format a literal value as source text
    fn format_literal(&self, value: &Atom) -> String;

    /// Identifier of the named constant for one enum value (e.g., `QosTypeLinuxHtb`)
    fn constant_name(&self, naming: &NameNormalizer, alias: &str, value: &Atom) -> String;
}
