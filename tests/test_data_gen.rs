//! Shared fixtures for integration tests.

#![allow(dead_code)]

use serde_json::json;
use tabula::prelude::*;

pub fn customers() -> serde_json::Value {
    json!([
        {"id": 1, "name": "Ann", "city": "Oslo"},
        {"id": 2, "name": "Bob", "city": "Rome"},
        {"id": 3, "name": "Cid", "city": "Oslo"},
    ])
}

pub fn orders() -> serde_json::Value {
    json!([
        {"order_id": 10, "id": 1, "amount": 5},
        {"order_id": 11, "id": 1, "amount": 7},
        {"order_id": 12, "id": 3, "amount": 2},
        {"order_id": 13, "id": 4, "amount": 9},
    ])
}

/// Rows with a single integer column `k`.
pub fn keyed(keys: &[i64]) -> Vec<Row> {
    keys.iter().map(|k| Row::new().with("k", *k)).collect()
}

/// Schema holding `CUSTOMERS` (keyed on `id`) and `ORDERS`.
pub fn shop() -> Schema {
    let mut schema = Schema::new();
    schema
        .add_json(&customers(), AddOptions::named("customers").with_primary_key("id"))
        .expect("add customers")
        .add_json(&orders(), AddOptions::named("orders"))
        .expect("add orders");
    schema
}

pub fn column(rows: &[Row], col: &str) -> Vec<Value> {
    rows.iter()
        .map(|r| r.get(col).cloned().unwrap_or(Value::Null))
        .collect()
}
