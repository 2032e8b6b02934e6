use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::idempotency::derive_idempotency_key;

/// A typed, idempotent mutation request. Produced by a service, consumed by
/// the downstream posting executor; never executed by this core.
///
/// `intent_type` is a stable, versioned `capability.action` identifier
/// (e.g. `"deferred-tax.calculate"`). Renaming one is a breaking change for
/// any consumer matching on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainIntent {
    #[serde(rename = "type")]
    pub intent_type: String,
    pub payload: Value,
    pub idempotency_key: String,
}

impl DomainIntent {
    /// Wrap a payload with a caller-supplied idempotency key. No validation
    /// happens here — that is the calculator's job, run before this point.
    pub fn new(
        intent_type: impl Into<String>,
        payload: Value,
        idempotency_key: impl Into<String>,
    ) -> Self {
        Self {
            intent_type: intent_type.into(),
            payload,
            idempotency_key: idempotency_key.into(),
        }
    }

    /// Wrap a payload, deriving the idempotency key from the identifying
    /// subset of its fields. Pass ids and period keys, never computed
    /// amounts, so the key stays stable across recomputation.
    pub fn derived(intent_type: impl Into<String>, payload: Value, identity: &Value) -> Self {
        let intent_type = intent_type.into();
        let idempotency_key = derive_idempotency_key(&intent_type, identity);
        Self {
            intent_type,
            payload,
            idempotency_key,
        }
    }
}
