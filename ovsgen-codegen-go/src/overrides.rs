//! Template blocks replaced by user-provided text.

use std::collections::BTreeMap;

use ovsgen_codegen::{FieldDescriptor, ModelData, builder::CodeFragment};

use crate::template::{Block, DefaultTemplate, TableTemplate, UnknownBlock};

/// A [`TableTemplate`] whose blocks can be replaced by text snippets.
///
/// Snippets may use the `{TableName}`, `{PackageName}` and `{StructName}`
/// placeholders. The `extraTags` snippet additionally sees the current field
/// as `{Column}`, `{Name}` and `{Type}`. Blocks without a snippet keep the
/// stock behavior.
///
/// # Example
///
/// ```
/// use ovsgen_codegen_go::{Block, OverrideTemplate};
///
/// let template = OverrideTemplate::new()
///     .with_block(Block::ExtraTags, " json:\"{Column}\"")
///     .with_block(Block::StructComment, "// {StructName} is generated");
/// assert_eq!(template.get(Block::ExtraTags), Some(" json:\"{Column}\""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTemplate {
    blocks: BTreeMap<Block, String>,
}

impl OverrideTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a block (builder style).
    pub fn with_block(mut self, block: Block, text: impl Into<String>) -> Self {
        self.blocks.insert(block, text.into());
        self
    }

    /// Build from block names, as found in a configuration file.
    ///
    /// Fails on the first name that is not a known block.
    pub fn from_named<I, K, V>(entries: I) -> Result<Self, UnknownBlock>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut template = Self::new();
        for (name, text) in entries {
            let block: Block = name.as_ref().parse()?;
            template.blocks.insert(block, text.into());
        }
        Ok(template)
    }

    /// The snippet replacing a block, if any.
    pub fn get(&self, block: Block) -> Option<&str> {
        self.blocks.get(&block).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn render(&self, block: Block, model: &ModelData) -> Option<Vec<CodeFragment>> {
        self.get(block)
            .map(|text| CodeFragment::lines(&substitute(text, model)))
    }
}

impl TableTemplate for OverrideTemplate {
    fn header(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::Header, model)
            .unwrap_or_else(|| DefaultTemplate.header(model))
    }

    fn pre_struct_definitions(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::PreStructDefinitions, model)
            .unwrap_or_else(|| DefaultTemplate.pre_struct_definitions(model))
    }

    fn struct_comment(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::StructComment, model)
            .unwrap_or_else(|| DefaultTemplate.struct_comment(model))
    }

    fn enums(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::Enums, model)
            .unwrap_or_else(|| DefaultTemplate.enums(model))
    }

    fn extra_tags(&self, model: &ModelData, field: &FieldDescriptor) -> String {
        match self.get(Block::ExtraTags) {
            Some(text) => substitute(text, model)
                .replace("{Column}", &field.column)
                .replace("{Name}", &field.name)
                .replace("{Type}", &field.ty),
            None => DefaultTemplate.extra_tags(model, field),
        }
    }

    fn extra_fields(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::ExtraFields, model)
            .unwrap_or_else(|| DefaultTemplate.extra_fields(model))
    }

    fn post_struct_definitions(&self, model: &ModelData) -> Vec<CodeFragment> {
        self.render(Block::PostStructDefinitions, model)
            .unwrap_or_else(|| DefaultTemplate.post_struct_definitions(model))
    }
}

fn substitute(text: &str, model: &ModelData) -> String {
    text.replace("{TableName}", model.table_name())
        .replace("{PackageName}", model.package_name())
        .replace("{StructName}", model.struct_name())
}
