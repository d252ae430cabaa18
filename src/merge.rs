use serde_json::{Map, Value};

/// Shallow-merge `overlay` on top of `base`.
/// Top-level keys from `overlay` replace those in `base` wholesale; nested
/// objects are not merged.
pub fn shallow_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        base.insert(key, value);
    }
    base
}
