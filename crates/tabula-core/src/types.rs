//! Dynamically typed cell values and row records.
//!
//! Cells are never validated against a declared type; a column may hold a mix
//! of numbers and strings. Comparisons used by the operators go through
//! [`Value::loose_eq`] and [`Value::to_number`], which coerce across types.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::schema::normalize;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

/// Shared Null used for lookups of missing cells.
pub static NULL: Value = Value::Null;

impl Value {
    /// Numeric coercion. Null and the empty string are 0, booleans are 0/1,
    /// strings are parsed after trimming, anything unparseable is NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Null => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Int(i) => *i as f64,
            Value::Float(f) => *f,
            Value::Str(s) => parse_number(s),
        }
    }

    /// Coercive equality.
    ///
    /// Same-typed values compare directly, Null equals only Null, and any
    /// other mix is compared numerically (so `Int(2)` equals `Str("2")` and
    /// `Bool(true)` equals `Int(1)`). NaN never equals anything.
    pub fn loose_eq(&self, other: &Value) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Null, _) | (_, Null) => false,
            (Str(a), Str(b)) => a == b,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            _ => self.to_number() == other.to_number(),
        }
    }

    /// Convert a JSON value into a cell. Arrays and objects are kept as their
    /// JSON text.
    pub fn from_json(v: &serde_json::Value) -> Value {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s.clone()),
            other => Value::Str(other.to_string()),
        }
    }

    /// Non-finite floats have no JSON form and render as null.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
        }
    }
}

fn parse_number(s: &str) -> f64 {
    let t = s.trim();
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    // `str::parse` also accepts "inf" and "nan", which are not numbers here.
    if t
        .bytes()
        .any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E')
    {
        return f64::NAN;
    }
    t.parse::<f64>().unwrap_or(f64::NAN)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) if v.is_infinite() => {
                f.write_str(if *v > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A single record: column name to value, in insertion order.
///
/// Lookups normalize the column argument, so they are case-insensitive for
/// rows held by a schema (whose column names are normalized on ingestion).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<(String, Value)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(column, value);
        self
    }

    /// Insert or replace a cell; a replaced cell keeps its position.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let column = column.into();
        let value = value.into();
        match self.cells.iter_mut().find(|(k, _)| *k == column) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.cells.push((column, value));
                None
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        let key = normalize(column);
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Lookup by a column name that is already in canonical case.
    pub fn get_exact(&self, column: &str) -> Option<&Value> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rewrite every column name into canonical case. Names that collide after
    /// normalization keep the later value.
    pub fn normalized(self) -> Row {
        let mut out = Row {
            cells: Vec::with_capacity(self.cells.len()),
        };
        for (k, v) in self.cells {
            out.insert(normalize(&k), v);
        }
        out
    }

    pub fn from_json_map(map: &serde_json::Map<String, serde_json::Value>) -> Row {
        map.iter()
            .map(|(k, v)| (k.clone(), Value::from_json(v)))
            .collect()
    }

    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .cells
            .iter()
            .map(|(k, v)| (k.clone(), v.to_json()))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (k, v) in &self.cells {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_eq_coerces_numbers_and_strings() {
        assert!(Value::Int(2).loose_eq(&Value::Str("2".into())));
        assert!(Value::Str(" 2.0 ".into()).loose_eq(&Value::Float(2.0)));
        assert!(Value::Bool(true).loose_eq(&Value::Int(1)));
        assert!(!Value::Str("a".into()).loose_eq(&Value::Str("A".into())));
        assert!(!Value::Null.loose_eq(&Value::Int(0)));
        assert!(Value::Null.loose_eq(&Value::Null));
        assert!(!Value::Str("x".into()).loose_eq(&Value::Str("x ".into())));
    }

    #[test]
    fn test_to_number() {
        assert_eq!(Value::Null.to_number(), 0.0);
        assert_eq!(Value::Str("".into()).to_number(), 0.0);
        assert_eq!(Value::Str("1e3".into()).to_number(), 1000.0);
        assert!(Value::Str("inf".into()).to_number().is_nan());
        assert!(Value::Str("abc".into()).to_number().is_nan());
        assert_eq!(Value::Str("-Infinity".into()).to_number(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(7.0).to_string(), "7");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Str("abc".into()).to_string(), "abc");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn test_row_normalized_and_case_insensitive_get() {
        let row = Row::new().with("name", "Ann").with("Age", 31).normalized();
        let cols: Vec<_> = row.columns().collect();
        assert_eq!(cols, vec!["NAME", "AGE"]);
        assert_eq!(row.get("age"), Some(&Value::Int(31)));
        assert_eq!(row.get("missing"), None);
    }

    #[test]
    fn test_row_normalized_collision_keeps_later_value() {
        let row = Row::new().with("a", 1).with("A", 2).normalized();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_row_json_round_trip_shape() {
        let json = serde_json::json!({"id": 1, "score": 1.5, "tags": ["a"], "ok": null});
        let row = Row::from_json_map(json.as_object().unwrap());
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("tags"), Some(&Value::Str("[\"a\"]".into())));
        assert_eq!(row.to_json()["score"], serde_json::json!(1.5));
        let text = serde_json::to_string(&row).unwrap();
        assert!(text.contains("\"ok\":null"));
    }
}
