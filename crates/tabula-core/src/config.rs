//! Schema configuration that embedding applications can serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaConfig {
    /// Name prefix of operator outputs. Tables added under this prefix are
    /// treated as derived and removed by `clean_up`.
    pub work_prefix: String,

    /// Prefix for generated table names (`TABLE0`, `TABLE1`, ...).
    pub auto_name_prefix: String,

    /// Optional cap on the number of rows a single join may emit.
    pub max_join_rows: Option<usize>,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            work_prefix: "WORK.".to_string(),
            auto_name_prefix: "TABLE".to_string(),
            max_join_rows: None,
        }
    }
}

impl SchemaConfig {
    /// Create a config from environment variables, falling back to defaults.
    ///
    /// Environment variables:
    /// - `TABULA_WORK_PREFIX`: prefix for derived table names
    /// - `TABULA_AUTO_NAME_PREFIX`: prefix for generated table names
    /// - `TABULA_MAX_JOIN_ROWS`: cap on join output rows
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("TABULA_WORK_PREFIX") {
            cfg.work_prefix = s;
        }

        if let Some(s) = lookup("TABULA_AUTO_NAME_PREFIX") {
            cfg.auto_name_prefix = s;
        }

        if let Some(s) = lookup("TABULA_MAX_JOIN_ROWS") {
            if let Ok(v) = s.parse::<usize>() {
                cfg.max_join_rows = Some(v);
            }
        }

        cfg
    }

    pub fn validate(&self) -> Result<()> {
        if self.work_prefix.trim().is_empty() {
            return Err(Error::Config("work_prefix must not be empty".into()));
        }
        if self.auto_name_prefix.trim().is_empty() {
            return Err(Error::Config("auto_name_prefix must not be empty".into()));
        }
        Ok(())
    }

    /// Work prefix in canonical case, as it appears in registered names.
    pub fn normalized_work_prefix(&self) -> String {
        crate::schema::normalize(&self.work_prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_are_valid() {
        let cfg = SchemaConfig::default();
        assert_eq!(cfg.work_prefix, "WORK.");
        assert_eq!(cfg.auto_name_prefix, "TABLE");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_lookup_overrides() {
        let env: HashMap<&str, &str> = [
            ("TABULA_WORK_PREFIX", "tmp."),
            ("TABULA_MAX_JOIN_ROWS", "100"),
        ]
        .into_iter()
        .collect();
        let cfg = SchemaConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(cfg.work_prefix, "tmp.");
        assert_eq!(cfg.normalized_work_prefix(), "TMP.");
        assert_eq!(cfg.auto_name_prefix, "TABLE");
        assert_eq!(cfg.max_join_rows, Some(100));
    }

    #[test]
    fn test_unparseable_limit_is_ignored() {
        let cfg = SchemaConfig::from_lookup(|k| {
            (k == "TABULA_MAX_JOIN_ROWS").then(|| "lots".to_string())
        });
        assert_eq!(cfg.max_join_rows, None);
    }

    #[test]
    fn test_validate_rejects_empty_prefix() {
        let cfg = SchemaConfig {
            work_prefix: " ".into(),
            ..SchemaConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let cfg: SchemaConfig = serde_json::from_str(r#"{"max_join_rows": 5}"#).unwrap();
        assert_eq!(cfg.max_join_rows, Some(5));
        assert_eq!(cfg.work_prefix, "WORK.");
    }
}
