use serde::Serialize;

use crate::error::Result;

/// What every calculator invocation produces: the computed value, an
/// immutable echo of the validated inputs (for audit trails), and a
/// human-readable derivation summary.
///
/// `explanation` restates the key derived numbers for audit review; it is
/// descriptive only and must never be parsed for control flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorResult<I, T> {
    pub result: T,
    pub inputs: I,
    pub explanation: String,
}

/// A pure financial calculator: a mathematical function of its inputs.
///
/// Implementations must uphold the contract shared by every domain:
/// - validation runs first and is exhaustive; the first violated
///   precondition raises `ValidationFailed` naming the offending field,
///   before any arithmetic
/// - no I/O, no clock reads, no randomness, no hidden global state;
///   identical inputs yield a byte-identical result, explanation included
/// - monetary outputs are integers in minor units, rounded exactly once at
///   the point of division (`money::round_div` / `money::allocate`)
pub trait Calculator {
    type Input: Clone + Serialize;
    type Output: Serialize;

    fn calculate(&self, input: &Self::Input) -> Result<CalculatorResult<Self::Input, Self::Output>>;
}
