//! Application layer: query ports services read through, and the shared
//! read → calculate → branch → build-intent orchestration.

pub mod orchestration;
pub mod ports;

pub use orchestration::{decide, Emit};
