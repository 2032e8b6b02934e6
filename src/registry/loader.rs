use std::collections::HashSet;
use std::path::Path;

use jsonschema::JSONSchema;
use once_cell::sync::Lazy;
use tracing::info;

use crate::error::{DomainError, Result};
use crate::observability;
use crate::registry::FinanceAuditRegistry;

/// JSON Schema the registry document is checked against before
/// deserialization. Hand-maintained literals become load-time failures
/// instead of silent gaps.
pub const REGISTRY_SCHEMA: &str = include_str!("../../schemas/finance_audit_registry.v1.json");

/// The registry data file ratified with this crate version.
pub const RATIFIED_REGISTRY: &str = include_str!("../../registry/finance_audit.v1.json");

static COMPILED_SCHEMA: Lazy<JSONSchema> = Lazy::new(|| {
    let schema: &'static serde_json::Value = Box::leak(Box::new(
        serde_json::from_str(REGISTRY_SCHEMA).expect("embedded registry schema is valid JSON"),
    ));
    JSONSchema::options()
        .compile(schema)
        .expect("embedded registry schema compiles")
});

impl FinanceAuditRegistry {
    /// Load and validate a registry document: JSON parse, schema check,
    /// then the catalog checks the schema cannot express (id uniqueness,
    /// supersession targets). Any violation is `RegistryInvalid`.
    pub fn from_json(text: &str) -> Result<Self> {
        let loaded = Self::from_json_inner(text);
        match &loaded {
            Ok(registry) => {
                observability::registry::load_success();
                info!(
                    version = %registry.version,
                    sections = registry.sections.len(),
                    "compliance registry loaded"
                );
            }
            Err(_) => observability::registry::load_error(),
        }
        loaded
    }

    fn from_json_inner(text: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| DomainError::registry_invalid(format!("not valid JSON: {}", e)))?;

        if let Err(errors) = COMPILED_SCHEMA.validate(&value) {
            let details: Vec<String> = errors
                .map(|e| format!("{} at {}", e, e.instance_path))
                .collect();
            return Err(DomainError::registry_invalid(format!(
                "schema violation: {}",
                details.join("; ")
            )));
        }

        let registry: FinanceAuditRegistry = serde_json::from_value(value)
            .map_err(|e| DomainError::registry_invalid(format!("deserialization failed: {}", e)))?;
        registry.check_catalog()?;
        Ok(registry)
    }

    /// Load a registry from a file on disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            DomainError::registry_invalid(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    /// The registry ratified with this crate version.
    pub fn ratified() -> Result<Self> {
        Self::from_json(RATIFIED_REGISTRY)
    }

    // Append-only catalog discipline: ids are immutable keys, never reused,
    // and supersession always points at a ratified id.
    fn check_catalog(&self) -> Result<()> {
        let mut section_keys = HashSet::new();
        for section in &self.sections {
            if !section_keys.insert(section.key.as_str()) {
                return Err(DomainError::registry_invalid(format!(
                    "duplicate section key {}",
                    section.key
                )));
            }
        }

        let mut ids = HashSet::new();
        for requirement in self.requirements() {
            if !ids.insert(requirement.id.as_str()) {
                return Err(DomainError::registry_invalid(format!(
                    "duplicate requirement id {}",
                    requirement.id
                )));
            }
        }

        for requirement in self.requirements() {
            if let Some(successor) = &requirement.superseded_by {
                if successor == &requirement.id {
                    return Err(DomainError::registry_invalid(format!(
                        "{} cannot supersede itself",
                        requirement.id
                    )));
                }
                if !ids.contains(successor.as_str()) {
                    return Err(DomainError::registry_invalid(format!(
                        "{} superseded by unknown requirement {}",
                        requirement.id, successor
                    )));
                }
            }
        }

        Ok(())
    }
}
