//! Named template blocks for a generated table file.
//!
//! A table file is assembled by [`GoRenderer`](crate::GoRenderer) from a fixed
//! sequence of blocks. Each block is a method on [`TableTemplate`] with a
//! default body, so a custom template only overrides the blocks it cares
//! about.

use std::{fmt, str::FromStr};

use ovsgen_codegen::{
    FieldDescriptor, ModelData, TypeMapper,
    builder::{CodeFragment, align_columns},
};

use crate::GoTypeMapper;

/// Header comment written at the top of every generated file.
pub const GENERATED_HEADER: &str = "Code generated by \"ovsgen\"";

/// The overridable blocks of a table file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Block {
    Header,
    PreStructDefinitions,
    StructComment,
    Enums,
    ExtraTags,
    ExtraFields,
    PostStructDefinitions,
}

impl Block {
    /// All blocks, in the order they appear in a file.
    pub const ALL: [Block; 7] = [
        Block::Header,
        Block::PreStructDefinitions,
        Block::StructComment,
        Block::Enums,
        Block::ExtraTags,
        Block::ExtraFields,
        Block::PostStructDefinitions,
    ];

    /// The block name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Block::Header => "header",
            Block::PreStructDefinitions => "preStructDefinitions",
            Block::StructComment => "structComment",
            Block::Enums => "enums",
            Block::ExtraTags => "extraTags",
            Block::ExtraFields => "extraFields",
            Block::PostStructDefinitions => "postStructDefinitions",
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown block name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
#[error("unknown template block '{name}'")]
#[diagnostic(
    code(ovsgen::unknown_block),
    help(
        "valid blocks are header, preStructDefinitions, structComment, enums, extraTags, extraFields and postStructDefinitions"
    )
)]
pub struct UnknownBlock {
    pub name: String,
}

impl FromStr for Block {
    type Err = UnknownBlock;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Block::ALL
            .into_iter()
            .find(|block| block.as_str() == s)
            .ok_or_else(|| UnknownBlock {
                name: s.to_string(),
            })
    }
}

/// Blocks making up a generated table file.
///
/// Every method has the stock behavior as its default body.
#[allow(unused_variables)]
pub trait TableTemplate {
    /// File header comment.
    fn header(&self, model: &ModelData) -> Vec<CodeFragment> {
        vec![
            CodeFragment::comment(GENERATED_HEADER),
            CodeFragment::comment("DO NOT EDIT."),
        ]
    }

    /// Declarations placed right after the package clause.
    fn pre_struct_definitions(&self, model: &ModelData) -> Vec<CodeFragment> {
        Vec::new()
    }

    /// Comment placed above the record type.
    fn struct_comment(&self, model: &ModelData) -> Vec<CodeFragment> {
        vec![CodeFragment::comment(format!(
            "{} defines an object in {} table",
            model.struct_name(),
            model.table_name()
        ))]
    }

    /// Enum alias and constant declarations.
    fn enums(&self, model: &ModelData) -> Vec<CodeFragment> {
        enum_declarations(model)
    }

    /// Extra struct tags appended after a field's `ovs` tag.
    ///
    /// The returned text is placed verbatim inside the backquotes, so it
    /// should start with a space.
    fn extra_tags(&self, model: &ModelData, field: &FieldDescriptor) -> String {
        String::new()
    }

    /// Extra fields appended to the record type.
    fn extra_fields(&self, model: &ModelData) -> Vec<CodeFragment> {
        Vec::new()
    }

    /// Declarations placed after the record type.
    fn post_struct_definitions(&self, model: &ModelData) -> Vec<CodeFragment> {
        Vec::new()
    }
}

/// The stock template.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTemplate;

impl TableTemplate for DefaultTemplate {}

/// Stock `type ( ... )` and `const ( ... )` blocks for a model's enums.
///
/// Returns no fragments when the model has no enums.
pub fn enum_declarations(model: &ModelData) -> Vec<CodeFragment> {
    if model.enums().is_empty() {
        return Vec::new();
    }

    let aliases: Vec<Vec<String>> = model
        .enums()
        .iter()
        .map(|e| vec![e.alias.clone(), format!("= {}", e.ty)])
        .collect();

    let constants: Vec<Vec<String>> = model
        .enums()
        .iter()
        .flat_map(|e| {
            e.constants().map(move |(name, value)| {
                vec![
                    name.to_string(),
                    e.alias.clone(),
                    format!("= {}", GoTypeMapper.format_literal(value)),
                ]
            })
        })
        .collect();

    vec![
        CodeFragment::block(
            "type (",
            align_columns(&aliases)
                .into_iter()
                .map(CodeFragment::Line)
                .collect(),
            Some(")".to_string()),
        ),
        CodeFragment::blank(),
        CodeFragment::block(
            "const (",
            align_columns(&constants)
                .into_iter()
                .map(CodeFragment::Line)
                .collect(),
            Some(")".to_string()),
        ),
    ]
}
