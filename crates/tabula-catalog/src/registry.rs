//! Name → metadata registry.
//!
//! Names are expected in canonical case; callers normalize before lookup.

use std::collections::{BTreeMap, HashMap};

use tabula_core::prelude::{Error, Result, TableId, TableMeta};

#[derive(Debug, Default)]
pub struct Registry {
    by_name: HashMap<String, TableMeta>,
    /// Registration order, used for enumeration.
    by_id: BTreeMap<TableId, String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails if `name` is already registered.
    pub fn check_unique(&self, name: &str) -> Result<()> {
        if self.by_name.contains_key(name) {
            tracing::error!(table = name, "{name} already exists in schema");
            return Err(Error::DuplicateTable(name.to_string()));
        }
        Ok(())
    }

    /// Fails if `name` is not registered.
    pub fn check_for_table(&self, name: &str) -> Result<&TableMeta> {
        self.by_name.get(name).ok_or_else(|| {
            tracing::error!(table = name, "{name} does not exist in schema");
            Error::UnknownTable(name.to_string())
        })
    }

    pub fn insert(&mut self, meta: TableMeta) {
        self.by_id.insert(meta.id, meta.name.clone());
        self.by_name.insert(meta.name.clone(), meta);
    }

    pub fn remove(&mut self, name: &str) -> Option<TableMeta> {
        let meta = self.by_name.remove(name)?;
        self.by_id.remove(&meta.id);
        Some(meta)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Metadata in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &TableMeta> + '_ {
        self.by_id.values().filter_map(|name| self.by_name.get(name))
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
