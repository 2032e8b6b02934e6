use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::app::orchestration::{decide, Emit};
use crate::app::ports::ImpairmentQuery;
use crate::calculator::{Calculator, CalculatorResult};
use crate::domain::{DomainContext, DomainIntent, DomainResult};
use crate::error::{DomainError, Result};
use crate::money::MinorUnits;

pub const RECOGNIZE_LOSS_INTENT: &str = "impairment.recognize-loss";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpairmentInput {
    pub asset_id: Uuid,
    pub period_key: String,
    pub carrying_amount: MinorUnits,
    pub recoverable_amount: MinorUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImpairmentAssessment {
    /// Carrying amount exactly equal to the recoverable amount is not
    /// impaired; only a strict shortfall recognizes a loss.
    pub impaired: bool,
    pub impairment_loss: MinorUnits,
}

/// Recoverable-amount test for one asset.
pub struct ImpairmentCalculator;

impl Calculator for ImpairmentCalculator {
    type Input = ImpairmentInput;
    type Output = ImpairmentAssessment;

    fn calculate(
        &self,
        input: &ImpairmentInput,
    ) -> Result<CalculatorResult<ImpairmentInput, ImpairmentAssessment>> {
        if input.period_key.trim().is_empty() {
            return Err(DomainError::validation("period_key", "must not be empty"));
        }
        if input.carrying_amount < 0 {
            return Err(DomainError::validation(
                "carrying_amount",
                "must not be negative",
            ));
        }
        if input.recoverable_amount < 0 {
            return Err(DomainError::validation(
                "recoverable_amount",
                "must not be negative",
            ));
        }

        let impaired = input.recoverable_amount < input.carrying_amount;
        let impairment_loss = if impaired {
            input.carrying_amount - input.recoverable_amount
        } else {
            0
        };

        let explanation = format!(
            "carrying amount {} vs recoverable amount {}: impairment loss {}",
            input.carrying_amount, input.recoverable_amount, impairment_loss
        );

        Ok(CalculatorResult {
            result: ImpairmentAssessment {
                impaired,
                impairment_loss,
            },
            inputs: input.clone(),
            explanation,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImpairmentRequest {
    pub asset_id: Uuid,
    pub period_key: String,
    pub recoverable_amount: MinorUnits,
}

/// Impairment service: reads the asset's carrying amount and emits a
/// recognize-loss intent when the recoverable amount falls short.
pub struct ImpairmentService<Q> {
    query: Q,
}

impl<Q: ImpairmentQuery> ImpairmentService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    pub async fn assess(
        &self,
        ctx: &DomainContext,
        request: &ImpairmentRequest,
    ) -> Result<DomainResult<CalculatorResult<ImpairmentInput, ImpairmentAssessment>>> {
        let carrying = self.query.asset_carrying(ctx, request.asset_id).await?;

        let input = ImpairmentInput {
            asset_id: request.asset_id,
            period_key: request.period_key.clone(),
            carrying_amount: carrying.carrying_amount,
            recoverable_amount: request.recoverable_amount,
        };

        decide(
            RECOGNIZE_LOSS_INTENT,
            &ImpairmentCalculator,
            &input,
            |assessment| assessment.impaired,
            |computed| {
                let identity = json!({
                    "tenant_id": ctx.tenant_id,
                    "company_id": ctx.company_id,
                    "asset_id": computed.inputs.asset_id,
                    "period_key": computed.inputs.period_key,
                });
                let payload = json!({
                    "asset_id": computed.inputs.asset_id,
                    "period_key": computed.inputs.period_key,
                    "impairment_loss": computed.result.impairment_loss,
                    "carrying_amount": computed.inputs.carrying_amount,
                    "recoverable_amount": computed.inputs.recoverable_amount,
                });
                Ok(vec![DomainIntent::derived(
                    RECOGNIZE_LOSS_INTENT,
                    payload,
                    &identity,
                )])
            },
            Emit::IntentsOnly,
        )
    }
}
