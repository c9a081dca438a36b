//! Leaf-key flattening of nested field objects.
//!
//! Nested objects contribute their leaves under the leaf's own key, so
//! `{"customer": {"first_name": "Ada"}}` flattens to `first_name`. When two
//! branches share a leaf key, the values merge into one cell joined with
//! ", ". Nulls flatten to the empty string and never contribute to a join.

use serde_json::map::Entry;
use serde_json::{Map, Value};

/// Flatten a page's field object to a map of leaf keys.
///
/// Key encounter order is preserved, so the same payload always flattens
/// to the same map.
pub fn flatten_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    let mut flat = Map::new();
    for (key, value) in fields {
        walk(key, value, &mut flat);
    }
    flat
}

fn walk(key: &str, value: &Value, flat: &mut Map<String, Value>) {
    match value {
        Value::Object(children) if !children.is_empty() => {
            for (child_key, child) in children {
                walk(child_key, child, flat);
            }
        }
        other => insert_leaf(key, other, flat),
    }
}

fn insert_leaf(key: &str, value: &Value, flat: &mut Map<String, Value>) {
    let normalized = match value {
        Value::Null => Value::String(String::new()),
        other => other.clone(),
    };
    match flat.entry(key.to_string()) {
        Entry::Vacant(slot) => {
            slot.insert(normalized);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(normalized),
            existing => {
                let joined: Vec<String> = [cell_text(existing), cell_text(&normalized)]
                    .into_iter()
                    .filter(|s| !s.is_empty())
                    .collect();
                *existing = Value::String(joined.join(", "));
            }
        },
    }
}

/// Render one flattened value as cell text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => {
            let parts: Vec<String> = items
                .iter()
                .map(cell_text)
                .filter(|s| !s.is_empty())
                .collect();
            parts.join(", ")
        }
        Value::Object(_) => String::new(),
    }
}
