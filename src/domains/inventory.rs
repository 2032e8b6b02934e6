use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::app::orchestration::{decide, Emit};
use crate::app::ports::InventoryQuery;
use crate::calculator::{Calculator, CalculatorResult};
use crate::domain::{DomainContext, DomainIntent, DomainResult};
use crate::error::{DomainError, Result};
use crate::money::MinorUnits;

/// Stable capability.action identifier consumed by the posting executor.
pub const WRITE_DOWN_INTENT: &str = "inventory.write-down";

/// Validated inputs for a net-realizable-value assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NrvInput {
    pub item_id: Uuid,
    pub period_key: String,
    pub quantity: i64,
    pub unit_cost: MinorUnits,
    pub unit_nrv: MinorUnits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NrvAssessment {
    pub cost: MinorUnits,
    pub net_realizable_value: MinorUnits,
    /// Zero when NRV covers cost; inventory is carried at the lower of the
    /// two, so equality is the no-action branch.
    pub write_down: MinorUnits,
}

/// Lower-of-cost-and-NRV assessment for one inventory item.
pub struct NrvCalculator;

impl Calculator for NrvCalculator {
    type Input = NrvInput;
    type Output = NrvAssessment;

    fn calculate(&self, input: &NrvInput) -> Result<CalculatorResult<NrvInput, NrvAssessment>> {
        if input.period_key.trim().is_empty() {
            return Err(DomainError::validation("period_key", "must not be empty"));
        }
        if input.quantity <= 0 {
            return Err(DomainError::validation("quantity", "must be positive"));
        }
        if input.unit_cost < 0 {
            return Err(DomainError::validation("unit_cost", "must not be negative"));
        }
        if input.unit_nrv < 0 {
            return Err(DomainError::validation("unit_nrv", "must not be negative"));
        }

        let cost = input
            .quantity
            .checked_mul(input.unit_cost)
            .ok_or_else(|| DomainError::validation("unit_cost", "cost exceeds minor-unit range"))?;
        let net_realizable_value = input
            .quantity
            .checked_mul(input.unit_nrv)
            .ok_or_else(|| DomainError::validation("unit_nrv", "value exceeds minor-unit range"))?;
        let write_down = (cost - net_realizable_value).max(0);

        let explanation = format!(
            "cost {} x {} = {}, net realizable value {} x {} = {}, write-down {}",
            input.quantity,
            input.unit_cost,
            cost,
            input.quantity,
            input.unit_nrv,
            net_realizable_value,
            write_down
        );

        Ok(CalculatorResult {
            result: NrvAssessment {
                cost,
                net_realizable_value,
                write_down,
            },
            inputs: input.clone(),
            explanation,
        })
    }
}

/// A request to assess one item against a newly observed unit NRV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteDownRequest {
    pub item_id: Uuid,
    pub period_key: String,
    pub unit_nrv: MinorUnits,
}

/// Inventory valuation service: reads the item's carried valuation, runs
/// the NRV calculator, and emits a write-down intent when cost exceeds NRV.
pub struct InventoryService<Q> {
    query: Q,
}

impl<Q: InventoryQuery> InventoryService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }

    /// New NRV at or above cost is a no-op `Read`; below cost emits one
    /// `inventory.write-down` intent keyed on tenant/company/item/period.
    pub async fn assess_write_down(
        &self,
        ctx: &DomainContext,
        request: &WriteDownRequest,
    ) -> Result<DomainResult<CalculatorResult<NrvInput, NrvAssessment>>> {
        let valuation = self
            .query
            .item_valuation(ctx, request.item_id, &request.period_key)
            .await?;

        let input = NrvInput {
            item_id: request.item_id,
            period_key: request.period_key.clone(),
            quantity: valuation.quantity,
            unit_cost: valuation.unit_cost,
            unit_nrv: request.unit_nrv,
        };

        decide(
            WRITE_DOWN_INTENT,
            &NrvCalculator,
            &input,
            |assessment| assessment.write_down > 0,
            |computed| {
                let identity = json!({
                    "tenant_id": ctx.tenant_id,
                    "company_id": ctx.company_id,
                    "item_id": computed.inputs.item_id,
                    "period_key": computed.inputs.period_key,
                });
                let payload = json!({
                    "item_id": computed.inputs.item_id,
                    "period_key": computed.inputs.period_key,
                    "write_down": computed.result.write_down,
                    "cost": computed.result.cost,
                    "net_realizable_value": computed.result.net_realizable_value,
                });
                Ok(vec![DomainIntent::derived(WRITE_DOWN_INTENT, payload, &identity)])
            },
            Emit::IntentsOnly,
        )
    }
}
