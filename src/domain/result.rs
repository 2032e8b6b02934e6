use serde::Serialize;

use crate::domain::intent::DomainIntent;
use crate::error::{DomainError, Result};

/// The three-way envelope every service call returns.
///
/// Invariant: `intents` is never empty. The constructors enforce it, so a
/// caller can rely on `Intent`/`IntentWithRead` carrying at least one
/// mutation request; a no-op comes back as `Read`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum DomainResult<T> {
    /// No mutation requested.
    #[serde(rename = "read")]
    Read { data: T },

    /// One or more mutation requests, no inline data.
    #[serde(rename = "intent")]
    Intent { intents: Vec<DomainIntent> },

    /// Both: inline data plus mutation requests.
    #[serde(rename = "intent+read")]
    IntentWithRead { data: T, intents: Vec<DomainIntent> },
}

impl<T> DomainResult<T> {
    pub fn read(data: T) -> Self {
        DomainResult::Read { data }
    }

    /// Build an `Intent` result; rejects an empty intent list.
    pub fn intent(intents: Vec<DomainIntent>) -> Result<Self> {
        if intents.is_empty() {
            return Err(DomainError::validation(
                "intents",
                "must not be empty, return a read result for a no-op",
            ));
        }
        Ok(DomainResult::Intent { intents })
    }

    /// Build an `IntentWithRead` result; rejects an empty intent list.
    pub fn intent_with_read(data: T, intents: Vec<DomainIntent>) -> Result<Self> {
        if intents.is_empty() {
            return Err(DomainError::validation(
                "intents",
                "must not be empty, return a read result for a no-op",
            ));
        }
        Ok(DomainResult::IntentWithRead { data, intents })
    }

    /// Collapse data plus a possibly-empty intent list into the right
    /// variant: empty intents signal a no-op and come back as `Read`.
    pub fn from_outcome(data: T, intents: Vec<DomainIntent>, inline_data: bool) -> Self {
        if intents.is_empty() {
            DomainResult::Read { data }
        } else if inline_data {
            DomainResult::IntentWithRead { data, intents }
        } else {
            DomainResult::Intent { intents }
        }
    }

    pub fn is_mutation(&self) -> bool {
        !matches!(self, DomainResult::Read { .. })
    }

    pub fn intents(&self) -> &[DomainIntent] {
        match self {
            DomainResult::Read { .. } => &[],
            DomainResult::Intent { intents } | DomainResult::IntentWithRead { intents, .. } => {
                intents
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            DomainResult::Read { data } | DomainResult::IntentWithRead { data, .. } => Some(data),
            DomainResult::Intent { .. } => None,
        }
    }
}
