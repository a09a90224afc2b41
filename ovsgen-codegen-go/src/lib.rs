//! Go model generator for OVSDB schemas.
//!
//! Each table becomes one Go file holding a struct with `ovs` tags, plus type
//! aliases and constants for enum-constrained columns. The layout is driven
//! by a [`TableTemplate`], whose blocks can be replaced with
//! [`OverrideTemplate`].

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod generator;
mod naming;
mod overrides;
mod renderer;
mod template;
mod type_mapper;

pub use generator::Generator;
pub use naming::{GO_NAMING, constant_name};
pub use overrides::OverrideTemplate;
pub use ovsgen_codegen::{GenerateResult, LanguageCodegen, PreviewFile};
pub use renderer::GoRenderer;
pub use template::{
    Block, DefaultTemplate, GENERATED_HEADER, TableTemplate, UnknownBlock, enum_declarations,
};
pub use type_mapper::GoTypeMapper;
