#![forbid(unsafe_code)]
//! tabula-catalog: table store, schema registry, and the operation surface.
//!
//! `Schema` owns all state. Operations return `Result<&mut Schema>` so calls
//! chain with `?` and stop at the first failure; every failure is also logged
//! through `tracing` before it is returned.

pub mod metrics;
pub mod options;
pub mod registry;
pub mod schema;
pub mod store;

pub use options::{AddOptions, FilterOptions, GroupByOptions, JoinOptions, OrderByOptions};
pub use registry::Registry;
pub use schema::{Schema, VERSION};
pub use store::TableStore;
