use tracing::{debug, info};

use crate::calculator::{Calculator, CalculatorResult};
use crate::domain::{DomainIntent, DomainResult};
use crate::error::Result;
use crate::observability;

/// Whether a mutation result carries the computed data inline
/// (`intent+read`) or only the intents (`intent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    IntentsOnly,
    WithData,
}

/// The compute → compare → emit-intent-or-not step shared by every domain
/// service. Each domain supplies its own threshold predicate and intent
/// builder; the wiring is written once here instead of per domain.
///
/// When the predicate does not fire, or the builder returns no intents, the
/// full calculator result comes back as `Read` — an explanatory no-op. The
/// returned envelope therefore never carries an empty intent list.
pub fn decide<C, P, B>(
    capability: &str,
    calculator: &C,
    input: &C::Input,
    triggers: P,
    build_intents: B,
    emit: Emit,
) -> Result<DomainResult<CalculatorResult<C::Input, C::Output>>>
where
    C: Calculator,
    P: FnOnce(&C::Output) -> bool,
    B: FnOnce(&CalculatorResult<C::Input, C::Output>) -> Result<Vec<DomainIntent>>,
{
    observability::pipeline::service_call(capability);

    let computed = match calculator.calculate(input) {
        Ok(computed) => computed,
        Err(err) => {
            observability::pipeline::calculator_error(capability);
            return Err(err);
        }
    };

    if !triggers(&computed.result) {
        debug!(capability, "no triggering condition, returning read result");
        observability::pipeline::service_noop(capability);
        return Ok(DomainResult::read(computed));
    }

    let intents = build_intents(&computed)?;
    if intents.is_empty() {
        debug!(capability, "intent builder produced nothing, returning read result");
        observability::pipeline::service_noop(capability);
        return Ok(DomainResult::read(computed));
    }

    info!(capability, count = intents.len(), "mutation intents emitted");
    observability::pipeline::intents_emitted(capability, intents.len() as u64);
    Ok(DomainResult::from_outcome(
        computed,
        intents,
        emit == Emit::WithData,
    ))
}
