//! JSON ingestion: any `serde_json::Value` maps onto the render model.
//!
//! Objects become keyed containers (key order preserved, see the
//! `preserve_order` feature in Cargo.toml), arrays become lists, scalars
//! become leaves. This is the path the binary uses to render a JSON file.

use crate::value::{Leaf, Value};

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Leaf(Leaf::Null),
            serde_json::Value::Bool(b) => Value::Leaf(Leaf::Bool(b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Leaf(Leaf::Int(i)),
                // u64 overflow or a true float; f64 covers both for display
                None => Value::Leaf(Leaf::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            serde_json::Value::String(s) => Value::Leaf(Leaf::Str(s)),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}
