use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::canonical::canonical_string;

/// Derive an idempotency key from an intent type and the identifying subset
/// of its payload.
///
/// Only identifying fields (entity ids, period keys) go into the key —
/// never computed amounts — so re-submitting the same logical action with
/// recomputed figures still dedupes against the original. Same type and
/// same identifying fields always produce the same key.
pub fn derive_idempotency_key(intent_type: &str, identity: &Value) -> String {
    let mut hasher = Sha256::new();
    hasher.update(intent_type.as_bytes());
    hasher.update(b"|");
    hasher.update(canonical_string(identity).as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_is_stable_across_field_order() {
        let a = derive_idempotency_key(
            "inventory.write-down",
            &json!({ "item_id": "i-1", "period_key": "2025-03" }),
        );
        let b = derive_idempotency_key(
            "inventory.write-down",
            &json!({ "period_key": "2025-03", "item_id": "i-1" }),
        );
        assert_eq!(a, b);
    }

    #[test]
    fn key_ignores_null_optional_fields() {
        let a = derive_idempotency_key(
            "impairment.recognize-loss",
            &json!({ "asset_id": "a-1", "cgu": null }),
        );
        let b = derive_idempotency_key("impairment.recognize-loss", &json!({ "asset_id": "a-1" }));
        assert_eq!(a, b);
    }

    #[test]
    fn key_differs_on_identifying_fields() {
        let a = derive_idempotency_key("deferred-tax.calculate", &json!({ "period_key": "2025-03" }));
        let b = derive_idempotency_key("deferred-tax.calculate", &json!({ "period_key": "2025-04" }));
        assert_ne!(a, b);
    }

    #[test]
    fn key_differs_on_intent_type() {
        let identity = json!({ "entity_id": "e-1" });
        let a = derive_idempotency_key("deferred-tax.calculate", &identity);
        let b = derive_idempotency_key("deferred-tax.reverse", &identity);
        assert_ne!(a, b);
    }

    #[test]
    fn key_is_hex_sha256() {
        let key = derive_idempotency_key("inventory.write-down", &json!({ "item_id": "i-1" }));
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
