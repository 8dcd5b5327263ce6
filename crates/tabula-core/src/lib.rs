#![forbid(unsafe_code)]
//! tabula-core: values, rows, table metadata, configuration, and errors.
//!
//! Everything here is plain data. Storage and the operation surface live in
//! `tabula-catalog`; the relational operators live in `tabula-operators`.

pub mod config;
pub mod error;
pub mod id;
pub mod prelude;
pub mod schema;
pub mod types;

pub use error::{Error, ErrorKind, Result};
