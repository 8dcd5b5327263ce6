#![forbid(unsafe_code)]
//! tabula: an in-memory tabular data engine.
//!
//! Register row sets as named tables, then join, sort, group, and filter them.
//! Every operation registers its output as a new derived table (named
//! `WORK.<...>` unless a name is given), so results chain like base tables.
//!
//! ```
//! use tabula::prelude::*;
//!
//! let mut schema = Schema::new();
//! schema
//!     .add(vec![Row::new().with("h", 3), Row::new().with("h", 1)], AddOptions::named("t"))?
//!     .order_by("t", OrderByOptions::by("h").order("asc"))?;
//! assert_eq!(schema.get("WORK.T_H_ASC")?[0].get("h"), Some(&Value::Int(1)));
//! schema.clean_up();
//! assert_eq!(schema.table_names(), vec!["T"]);
//! # Ok::<(), tabula::Error>(())
//! ```

pub use tabula_catalog::{
    AddOptions, FilterOptions, GroupByOptions, JoinOptions, OrderByOptions, Schema, VERSION,
};
pub use tabula_core::{Error, ErrorKind, Result};

pub mod prelude {
    pub use tabula_catalog::{
        AddOptions, FilterOptions, GroupByOptions, JoinOptions, OrderByOptions, Schema,
    };
    pub use tabula_core::prelude::*;
}
