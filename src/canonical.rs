use serde::Serialize;
use serde_json::Value;

use crate::error::{DomainError, Result};

/// Deterministic, order-independent serialization of a JSON value.
///
/// Object keys are emitted in sorted order and `null` members are dropped,
/// so an absent optional field and an explicit `null` produce identical
/// output. Array order is preserved. The same logical value always yields
/// the same bytes regardless of which code path constructed it, which is
/// what makes derived idempotency keys stable.
pub fn canonical_string(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

/// Canonicalize any serializable value.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_value(value).map_err(|e| {
        DomainError::validation("payload", format!("not canonically serializable: {}", e))
    })?;
    Ok(canonical_string(&json))
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, _)| k)
                .collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                // Display on Value produces compact JSON with proper escaping.
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
