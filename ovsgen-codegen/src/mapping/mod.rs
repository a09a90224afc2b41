//! Mapping from schema tables to renderable models.

mod column;
mod mapper;

pub use column::{ColumnMapping, ColumnResolver};
pub use mapper::SchemaMapper;
