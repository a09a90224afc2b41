//! Shared code generation utilities for ovsgen.
//!
//! This crate turns parsed OVSDB tables into language-agnostic models and
//! provides the building blocks used by language-specific generators
//! (e.g., `ovsgen-codegen-go`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`language`] - Language-specific abstractions (LanguageCodegen, TypeMapper, etc.)
//! - [`mapping`] - Column type resolution and the SchemaMapper
//! - [`model`] - The per-table model handed to renderers
//! - [`testing`] - Test utilities (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod error;
pub mod language;
pub mod mapping;
pub mod model;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use error::MappingError;
pub use language::{GenerateResult, LanguageCodegen, PreviewFile, TypeMapper};
pub use mapping::SchemaMapper;
pub use model::{EnumDescriptor, FieldDescriptor, ModelData};
