//! Per-call options for the schema operations.
//!
//! All fields are optional so they can be built with struct update syntax or
//! deserialized from partial JSON; required ones are checked when the
//! operation runs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOptions {
    /// Table name; generated (`TABLE<n>`) when absent.
    pub name: Option<String>,
    pub primary_key: Option<String>,
}

impl AddOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            primary_key: None,
        }
    }

    pub fn with_primary_key(mut self, key: impl Into<String>) -> Self {
        self.primary_key = Some(key.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinOptions {
    pub name: Option<String>,
}

impl JoinOptions {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderByOptions {
    /// Column to sort on. Required.
    pub clause: Option<String>,
    /// `"ASC"` for ascending; anything else (or nothing) sorts descending.
    pub order: Option<String>,
    pub name: Option<String>,
}

impl OrderByOptions {
    pub fn by(clause: impl Into<String>) -> Self {
        Self {
            clause: Some(clause.into()),
            ..Self::default()
        }
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupByOptions {
    /// Grouping column. Required.
    pub dim: Option<String>,
    /// Column to sum. Required.
    pub metric: Option<String>,
    pub name: Option<String>,
}

impl GroupByOptions {
    pub fn new(dim: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            dim: Some(dim.into()),
            metric: Some(metric.into()),
            name: None,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let o = OrderByOptions::by("height").order("asc").named("tall");
        assert_eq!(o.clause.as_deref(), Some("height"));
        assert_eq!(o.order.as_deref(), Some("asc"));
        assert_eq!(o.name.as_deref(), Some("tall"));

        let a = AddOptions::named("t").with_primary_key("id");
        assert_eq!(a.primary_key.as_deref(), Some("id"));
    }

    #[test]
    fn test_partial_json() {
        let g: GroupByOptions = serde_json::from_str(r#"{"dim": "city"}"#).unwrap();
        assert_eq!(g.dim.as_deref(), Some("city"));
        assert_eq!(g.metric, None);
    }
}
