//! Table metadata. Pure data; storage lives in `tabula-catalog`.

use serde::{Deserialize, Serialize};

use crate::id::TableId;

/// Canonical form for table and column names.
pub fn normalize(name: &str) -> String {
    name.to_uppercase()
}

/// Whether a table was registered by a caller or produced by an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    Base,
    Derived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    pub name: String,
    pub id: TableId,
    pub primary_key: Option<String>,
    /// Row count at registration time.
    pub row_count: usize,
    /// Column names of the first row only; later rows are not checked.
    pub columns: Vec<String>,
    pub origin: Origin,
}

impl TableMeta {
    pub fn is_derived(&self) -> bool {
        self.origin == Origin::Derived
    }
}
