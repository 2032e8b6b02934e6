use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::app::orchestration::{decide, Emit};
use crate::calculator::{Calculator, CalculatorResult};
use crate::domain::{DomainContext, DomainIntent, DomainResult};
use crate::error::{DomainError, Result};
use crate::money::{allocate, MinorUnits};

pub const ALLOCATE_INTENT: &str = "revenue.allocate-transaction-price";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObligationInput {
    pub obligation_id: String,
    pub standalone_price: MinorUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationInput {
    pub contract_id: Uuid,
    pub period_key: String,
    pub transaction_price: MinorUnits,
    pub obligations: Vec<ObligationInput>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationLine {
    pub obligation_id: String,
    pub allocated: MinorUnits,
}

/// Allocates a contract's transaction price across performance obligations
/// in proportion to standalone selling price. The allocated parts always
/// sum exactly to the transaction price; the rounding remainder lands on
/// the last obligation.
pub struct AllocationCalculator;

impl Calculator for AllocationCalculator {
    type Input = AllocationInput;
    type Output = Vec<AllocationLine>;

    fn calculate(
        &self,
        input: &AllocationInput,
    ) -> Result<CalculatorResult<AllocationInput, Vec<AllocationLine>>> {
        if input.period_key.trim().is_empty() {
            return Err(DomainError::validation("period_key", "must not be empty"));
        }
        if input.transaction_price < 0 {
            return Err(DomainError::validation(
                "transaction_price",
                "must not be negative",
            ));
        }
        if input.obligations.is_empty() {
            return Err(DomainError::validation("obligations", "must not be empty"));
        }
        for obligation in &input.obligations {
            if obligation.obligation_id.trim().is_empty() {
                return Err(DomainError::validation(
                    "obligations.obligation_id",
                    "must not be empty",
                ));
            }
            if obligation.standalone_price < 0 {
                return Err(DomainError::validation(
                    "obligations.standalone_price",
                    format!(
                        "must not be negative for obligation {}",
                        obligation.obligation_id
                    ),
                ));
            }
        }
        let standalone_total: i64 = input.obligations.iter().map(|o| o.standalone_price).sum();
        if standalone_total == 0 {
            return Err(DomainError::validation(
                "obligations.standalone_price",
                "must sum to a positive amount",
            ));
        }

        let weights: Vec<MinorUnits> =
            input.obligations.iter().map(|o| o.standalone_price).collect();
        let parts = allocate(input.transaction_price, &weights)?;

        let lines: Vec<AllocationLine> = input
            .obligations
            .iter()
            .zip(parts)
            .map(|(obligation, allocated)| AllocationLine {
                obligation_id: obligation.obligation_id.clone(),
                allocated,
            })
            .collect();

        let explanation = format!(
            "allocated transaction price {} across {} obligations by standalone price (total {}): [{}]",
            input.transaction_price,
            lines.len(),
            standalone_total,
            lines
                .iter()
                .map(|l| format!("{}={}", l.obligation_id, l.allocated))
                .collect::<Vec<_>>()
                .join(", ")
        );

        Ok(CalculatorResult {
            result: lines,
            inputs: input.clone(),
            explanation,
        })
    }
}

/// Revenue allocation service. No read collaborator: the contract terms
/// arrive in the request, so this is compute → intent only. Returns
/// `intent+read` so callers get the allocation lines inline alongside the
/// posting request.
pub struct RevenueService;

impl RevenueService {
    pub fn allocate_transaction_price(
        &self,
        ctx: &DomainContext,
        input: &AllocationInput,
    ) -> Result<DomainResult<CalculatorResult<AllocationInput, Vec<AllocationLine>>>> {
        decide(
            ALLOCATE_INTENT,
            &AllocationCalculator,
            input,
            |_| input.transaction_price > 0,
            |computed| {
                let identity = json!({
                    "tenant_id": ctx.tenant_id,
                    "company_id": ctx.company_id,
                    "contract_id": computed.inputs.contract_id,
                    "period_key": computed.inputs.period_key,
                });
                let payload = json!({
                    "contract_id": computed.inputs.contract_id,
                    "period_key": computed.inputs.period_key,
                    "transaction_price": computed.inputs.transaction_price,
                    "lines": computed.result,
                });
                Ok(vec![DomainIntent::derived(ALLOCATE_INTENT, payload, &identity)])
            },
            Emit::WithData,
        )
    }
}
