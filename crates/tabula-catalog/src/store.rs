//! Stable-keyed row storage.
//!
//! Tables are keyed by a monotonically allocated `TableId`, so removing one
//! never touches the others. A table's slot index is its rank among the live
//! ids, which is always a contiguous `0..len`.

use std::collections::BTreeMap;

use tabula_core::prelude::{Row, TableId};

#[derive(Debug)]
pub struct TableStore {
    tables: BTreeMap<TableId, Vec<Row>>,
    next_id: TableId,
}

impl Default for TableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TableStore {
    pub fn new() -> Self {
        Self {
            tables: BTreeMap::new(),
            next_id: TableId::new(0),
        }
    }

    /// Take ownership of `rows` and return the id they are stored under.
    pub fn insert(&mut self, rows: Vec<Row>) -> TableId {
        let id = self.next_id;
        self.next_id = id.next();
        self.tables.insert(id, rows);
        id
    }

    pub fn get(&self, id: TableId) -> Option<&[Row]> {
        self.tables.get(&id).map(Vec::as_slice)
    }

    pub fn remove(&mut self, id: TableId) -> Option<Vec<Row>> {
        self.tables.remove(&id)
    }

    /// Position of `id` among live tables, in registration order.
    pub fn slot_of(&self, id: TableId) -> Option<usize> {
        if !self.tables.contains_key(&id) {
            return None;
        }
        Some(self.tables.range(..id).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(v: i64) -> Vec<Row> {
        vec![Row::new().with("V", v)]
    }

    #[test]
    fn test_insert_get_remove() {
        let mut store = TableStore::new();
        let a = store.insert(one(1));
        let b = store.insert(one(2));
        assert_ne!(a, b);
        assert_eq!(store.get(b).unwrap()[0].get("v"), Some(&2.into()));
        assert_eq!(store.remove(a).map(|r| r.len()), Some(1));
        assert!(store.get(a).is_none());
        assert_eq!(store.slot_of(b), Some(0));
    }

    #[test]
    fn test_slots_stay_contiguous_after_remove() {
        let mut store = TableStore::new();
        let ids: Vec<_> = (0..4).map(|i| store.insert(one(i))).collect();
        assert_eq!(store.slot_of(ids[2]), Some(2));

        store.remove(ids[1]);
        assert_eq!(store.slot_of(ids[0]), Some(0));
        assert_eq!(store.slot_of(ids[1]), None);
        assert_eq!(store.slot_of(ids[2]), Some(1));
        assert_eq!(store.slot_of(ids[3]), Some(2));

        // Ids are never reused.
        let e = store.insert(one(9));
        assert!(e > ids[3]);
        assert_eq!(store.slot_of(e), Some(3));
    }
}
