use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ambient caller identity and scope, passed into every service and query
/// call. Read-only; supplied by the caller (a request handler or job
/// runner), never persisted by this layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainContext {
    pub tenant_id: Uuid,
    pub company_id: Uuid,
    pub user_id: Uuid,
    /// Reporting date the call is evaluated against.
    pub as_of: NaiveDate,
}

impl DomainContext {
    pub fn new(tenant_id: Uuid, company_id: Uuid, user_id: Uuid, as_of: NaiveDate) -> Self {
        Self {
            tenant_id,
            company_id,
            user_id,
            as_of,
        }
    }
}
