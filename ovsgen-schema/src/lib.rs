//! OVSDB schema document parsing and validation for ovsgen.
//!
//! Parses `*.ovsschema` JSON documents (RFC 7047) into [`DatabaseSchema`],
//! reporting syntax and validation problems as [`miette`] diagnostics that
//! point into the source document.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod atom;
mod column;
mod database;
mod error;
mod table;
mod validate;

pub use atom::{Atom, AtomicType};
pub use column::{BaseType, ColumnKind, ColumnSchema, ColumnType, Max, RefType};
pub use database::{DatabaseSchema, parse_schema};
pub use error::{Error, Result, SourceContext};
pub use table::TableSchema;
