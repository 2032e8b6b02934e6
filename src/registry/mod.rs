//! Compliance registry: static, versioned data describing the artifacts a
//! correct capability implementation must exhibit. Pure data, no behavior —
//! an external CI checker queries it and scans the repository for the named
//! artifacts.

pub mod loader;

use serde::{Deserialize, Serialize};

/// Severity of a requirement, ordered from most to least blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Blocker,
    Critical,
    Major,
    Minor,
}

/// One auditable requirement. `id` is a globally unique, load-bearing key
/// referenced by checker rules and audit trails: never reused, never
/// renumbered, never deleted — only marked superseded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Requirement {
    pub id: String,
    pub severity: Severity,
    pub weight: u32,
    pub rationale: String,
    #[serde(default)]
    pub must_have_entities: Vec<String>,
    #[serde(default)]
    pub must_have_apis: Vec<String>,
    #[serde(default)]
    pub must_have_reports: Vec<String>,
    #[serde(default)]
    pub must_have_tests: Vec<String>,
    #[serde(default)]
    pub must_have_evidence: Vec<String>,
    /// Cross-cutting policies this requirement feeds into,
    /// e.g. `gate.idempotency`.
    pub gates: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded_by: Option<String>,
}

impl Requirement {
    pub fn is_active(&self) -> bool {
        self.superseded_by.is_none()
    }
}

/// Requirements grouped per business capability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilitySection {
    pub key: String,
    pub scope: String,
    pub requirements: Vec<Requirement>,
}

/// The ratified registry. Immutable at runtime; edited out-of-band and
/// re-ratified, tracked by `last_ratified_at`/`ratified_by`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceAuditRegistry {
    pub version: String,
    pub last_ratified_at: chrono::DateTime<chrono::Utc>,
    pub ratified_by: String,
    pub sections: Vec<CapabilitySection>,
}

impl FinanceAuditRegistry {
    pub fn requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.sections.iter().flat_map(|s| s.requirements.iter())
    }

    /// Look up a requirement by its immutable id.
    pub fn requirement(&self, id: &str) -> Option<&Requirement> {
        self.requirements().find(|r| r.id == id)
    }

    pub fn section(&self, key: &str) -> Option<&CapabilitySection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// Requirements that have not been superseded.
    pub fn active_requirements(&self) -> impl Iterator<Item = &Requirement> {
        self.requirements().filter(|r| r.is_active())
    }

    /// All requirements feeding into a cross-cutting gate.
    pub fn requirements_for_gate<'a>(&'a self, gate: &'a str) -> Vec<&'a Requirement> {
        self.requirements()
            .filter(|r| r.gates.iter().any(|g| g == gate))
            .collect()
    }
}
