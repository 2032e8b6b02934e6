//! Financial pipeline core: pure domain calculators, idempotent mutation
//! intents, and the compliance registry the CI gate consumes.
//!
//! Every business domain is the same three-stage pipeline: a calculator
//! derives a result from validated inputs, an intent builder turns it into
//! an idempotent mutation request, and a service composes reads,
//! calculators, and intents into one `DomainResult` envelope. This crate
//! produces requests for a posting executor; it never executes them.

pub mod calculator;
pub mod canonical;
pub mod error;
pub mod idempotency;
pub mod logging;
pub mod money;

pub mod domain;
pub mod registry;

// Layered boundaries: application orchestration and the domain triads.
pub mod app;
pub mod domains;

// Pipeline counters.
pub mod observability;

pub use calculator::{Calculator, CalculatorResult};
pub use domain::{DomainContext, DomainIntent, DomainResult};
pub use error::{DomainError, ErrorKind, Result};
pub use registry::FinanceAuditRegistry;
