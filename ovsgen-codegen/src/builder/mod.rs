//! Code generation building blocks.
//!
//! - [`CodeBuilder`] - Indented text buffer
//! - [`CodeFragment`] - Intermediate representation for code pieces
//! - [`Renderable`] - Trait for types that can be converted to code fragments
//! - [`Indent`] - Indentation configuration
//! - [`align_columns`] - Column alignment for declaration lists

mod align;
mod code_builder;
mod indent;
mod renderable;

pub use align::align_columns;
pub use code_builder::CodeBuilder;
pub use indent::Indent;
pub use renderable::{CodeFragment, Renderable};
