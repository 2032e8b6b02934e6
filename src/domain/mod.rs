//! Domain data shapes shared across layers: caller context, mutation
//! intents, and the result envelope every service returns.

pub mod context;
pub mod intent;
pub mod result;

pub use context::DomainContext;
pub use intent::DomainIntent;
pub use result::DomainResult;
