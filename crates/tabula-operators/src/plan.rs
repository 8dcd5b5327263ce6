//! Operator planning surface: `OpPlan`.

use serde::{Deserialize, Serialize};

/// What the caller needs to register an operator's output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpPlan {
    /// Output name used when the caller does not supply one.
    pub default_name: String,

    /// Primary key the output table is registered with.
    pub primary_key: Option<String>,
}

impl OpPlan {
    pub fn new(default_name: impl Into<String>) -> Self {
        Self {
            default_name: default_name.into(),
            primary_key: None,
        }
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }
}
