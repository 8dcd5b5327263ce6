#![forbid(unsafe_code)]
//! tabula-operators: relational operators (join/sort/group/filter).
//!
//! Design intent:
//! - Operators are pure and synchronous: they read borrowed input tables and
//!   return freshly owned rows. Registration of the output is the caller's job.
//! - Each operator exposes a planning surface (`OpPlan`) with the default
//!   output name and primary key so every result can be registered uniformly.

pub mod plan;
pub mod traits;

pub mod aggregate;
pub mod filter;
pub mod join;
pub mod sort;

pub use aggregate::{distinct, GroupBy};
pub use filter::{filter_predicate, Filter};
pub use join::NestedLoopJoin;
pub use plan::OpPlan;
pub use sort::{OrderBy, SortOrder};
pub use traits::{OpError, Operator, TableRef};
