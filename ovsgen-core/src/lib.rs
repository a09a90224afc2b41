//! Core utilities and types for the ovsgen model generator.
//!
//! This crate provides identifier normalization and generated-file writing
//! shared across the ovsgen crates.

mod file;
mod naming;

// File operations
pub use file::{File, Overwrite, WriteResult};
// Identifier normalization
pub use naming::{NameNormalizer, OVSDB_INITIALISMS, OVSDB_NAMING};
