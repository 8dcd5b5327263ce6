//! Convenient re-exports for downstream crates.

pub use crate::config::SchemaConfig;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::id::TableId;
pub use crate::schema::{normalize, Origin, TableMeta};
pub use crate::types::{Row, Value};
