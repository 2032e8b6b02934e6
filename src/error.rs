use serde_json::Value;
use thiserror::Error;

/// Closed set of error kinds surfaced by this core.
///
/// `ValidationFailed` is always caller-fixable and never retried
/// automatically; `NotFound` leaves create-then-retry to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ValidationFailed,
    NotFound,
    Conflict,
    RegistryInvalid,
}

/// Structured error raised synchronously by calculators, queries, and the
/// registry loader. Services never catch-and-swallow: every variant crosses
/// the service boundary unchanged so the caller has full context.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("validation failed: {message}")]
    ValidationFailed {
        message: String,
        context: Option<Value>,
    },

    #[error("not found: {message}")]
    NotFound {
        message: String,
        context: Option<Value>,
    },

    #[error("conflict: {message}")]
    Conflict {
        message: String,
        context: Option<Value>,
    },

    #[error("registry invalid: {message}")]
    RegistryInvalid {
        message: String,
        context: Option<Value>,
    },
}

impl DomainError {
    /// Validation failure naming the offending field.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        DomainError::ValidationFailed {
            message: format!("{}: {}", field, message.into()),
            context: Some(serde_json::json!({ "field": field })),
        }
    }

    /// Referenced entity is absent.
    pub fn not_found(entity: &str, key: impl std::fmt::Display) -> Self {
        DomainError::NotFound {
            message: format!("{} {}", entity, key),
            context: Some(serde_json::json!({ "entity": entity, "key": key.to_string() })),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict {
            message: message.into(),
            context: None,
        }
    }

    pub fn registry_invalid(message: impl Into<String>) -> Self {
        DomainError::RegistryInvalid {
            message: message.into(),
            context: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::ValidationFailed { .. } => ErrorKind::ValidationFailed,
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Conflict { .. } => ErrorKind::Conflict,
            DomainError::RegistryInvalid { .. } => ErrorKind::RegistryInvalid,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::ValidationFailed { message, .. }
            | DomainError::NotFound { message, .. }
            | DomainError::Conflict { message, .. }
            | DomainError::RegistryInvalid { message, .. } => message,
        }
    }

    pub fn context(&self) -> Option<&Value> {
        match self {
            DomainError::ValidationFailed { context, .. }
            | DomainError::NotFound { context, .. }
            | DomainError::Conflict { context, .. }
            | DomainError::RegistryInvalid { context, .. } => context.as_ref(),
        }
    }

    /// Attach structured context, replacing any existing context.
    pub fn with_context(mut self, ctx: Value) -> Self {
        match &mut self {
            DomainError::ValidationFailed { context, .. }
            | DomainError::NotFound { context, .. }
            | DomainError::Conflict { context, .. }
            | DomainError::RegistryInvalid { context, .. } => *context = Some(ctx),
        }
        self
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_field() {
        let err = DomainError::validation("unit_cost", "must not be negative");
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.message().starts_with("unit_cost"));
        assert_eq!(err.context().unwrap()["field"], "unit_cost");
    }

    #[test]
    fn not_found_carries_entity_and_key() {
        let err = DomainError::not_found("inventory item", "abc-123");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "not found: inventory item abc-123");
    }

    #[test]
    fn with_context_replaces_context() {
        let err = DomainError::conflict("period closed")
            .with_context(serde_json::json!({ "period": "2025-03" }));
        assert_eq!(err.context().unwrap()["period"], "2025-03");
    }
}
