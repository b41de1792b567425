//! Layer merging
//!
//! - Objects: merged by key (recursive)
//! - Null in the overlay: ignored, the base value is kept
//! - Everything else: overlay wins

use serde_json::Value;

/// Lay `top` over `base`.
///
/// Unset CLI flags arrive as `null`, so a null never clears a lower layer.
pub fn overlay(base: Value, top: Value) -> Value {
    match (base, top) {
        (base, Value::Null) => base,
        (Value::Object(mut base_map), Value::Object(top_map)) => {
            for (key, top_value) in top_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => overlay(base_value, top_value),
                    None if top_value.is_null() => continue,
                    None => top_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        (_, top) => top,
    }
}

/// Merge layers in order; the last has highest precedence
pub fn merge_layers(layers: Vec<Value>) -> Value {
    layers.into_iter().fold(Value::Null, overlay)
}
