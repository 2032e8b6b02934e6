//! Business domains wired through the shared pipeline. Each module is the
//! same triad: validated input, pure calculator, and a service that reads
//! state, runs the calculator, and emits mutation intents.

pub mod deferred_tax;
pub mod impairment;
pub mod inventory;
pub mod revenue;
