//! Row records and the value ordering used for sorting.
//!
//! A [`Row`] is an ordered mapping from column key to a JSON scalar. Key order
//! is the insertion order of the source record and is what the header resolver
//! reads when deriving headers from data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;

/// One record of the displayed dataset.
///
/// # Examples
///
/// ```rust
/// use bubbletea_datatable::Row;
/// use serde_json::json;
///
/// let row = Row::from_pairs([("a", json!(1)), ("b", json!("x"))]);
/// assert_eq!(row.keys().collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(row.get("b"), Some(&json!("x")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a row from key/value pairs, keeping their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Converts a JSON object into a row. Returns `None` for any other value.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Writes `value` under `key`. A new key is appended at the end.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Keys in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Entries in record order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the row has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a copy of this row with every key looked up in `rename`.
    ///
    /// Keys without an entry are kept. Each key is renamed at most once, so a
    /// chain such as `a -> b, b -> c` turns `a` into `b`, not `c`. Values are
    /// moved across untouched.
    ///
    /// When two keys end up with the same name the later value wins and a
    /// warning is logged for the lost column.
    pub fn renamed<F>(&self, rename: F) -> Row
    where
        F: FnMut(&str) -> Option<String>,
    {
        let (row, lost) = self.rename_keys(rename);
        for key in lost {
            tracing::warn!(column = %key, "renamed column overwrote another value");
        }
        row
    }

    /// Renames keys, returning the new row and every key whose value was
    /// overwritten by a later entry with the same name.
    pub(crate) fn rename_keys<F>(&self, mut rename: F) -> (Row, Vec<String>)
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = Map::with_capacity(self.0.len());
        let mut lost = Vec::new();
        for (k, v) in &self.0 {
            let key = rename(k).unwrap_or_else(|| k.clone());
            if out.insert(key.clone(), v.clone()).is_some() {
                lost.push(key);
            }
        }
        (Row(out), lost)
    }

    /// Consumes the row, returning the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Row {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Renders a cell value for display: strings without quotes, null as empty.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

/// Total order over cell values.
///
/// Values of the same type compare natively: numbers numerically, strings
/// lexicographically, booleans `false < true`. Values of different types are
/// never coerced; they fall back to a fixed type rank
/// (null < bool < number < string < array < object). Arrays and objects
/// compare equal among themselves.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let a = a.unwrap_or(&Value::Null);
    let b = b.unwrap_or(&Value::Null);
    match (a, b) {
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Number(x), Value::Number(y)) => {
            if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
                return x.cmp(&y);
            }
            if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
                return x.cmp(&y);
            }
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
