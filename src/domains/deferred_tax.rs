use serde::Serialize;
use serde_json::json;

use crate::app::orchestration::{decide, Emit};
use crate::calculator::{Calculator, CalculatorResult};
use crate::domain::{DomainContext, DomainIntent, DomainResult};
use crate::error::{DomainError, Result};
use crate::money::{apply_basis_points, MinorUnits, BPS_SCALE};

pub const CALCULATE_INTENT: &str = "deferred-tax.calculate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredTaxInput {
    pub period_key: String,
    /// Signed: positive for a taxable temporary difference, negative for a
    /// deductible one.
    pub temporary_difference: MinorUnits,
    pub tax_rate_bps: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxPosition {
    DeferredTaxLiability,
    DeferredTaxAsset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeferredTaxMeasure {
    /// Tax on the temporary difference, in minor units, always non-negative.
    pub deferred_tax: MinorUnits,
    /// Absent when the measured tax is zero.
    pub position: Option<TaxPosition>,
}

/// Deferred tax on a temporary difference at a flat rate.
pub struct DeferredTaxCalculator;

impl Calculator for DeferredTaxCalculator {
    type Input = DeferredTaxInput;
    type Output = DeferredTaxMeasure;

    fn calculate(
        &self,
        input: &DeferredTaxInput,
    ) -> Result<CalculatorResult<DeferredTaxInput, DeferredTaxMeasure>> {
        if input.period_key.trim().is_empty() {
            return Err(DomainError::validation("period_key", "must not be empty"));
        }
        if !(0..=BPS_SCALE).contains(&input.tax_rate_bps) {
            return Err(DomainError::validation(
                "tax_rate_bps",
                format!("must be between 0 and {}", BPS_SCALE),
            ));
        }

        let signed_tax = apply_basis_points(input.temporary_difference, input.tax_rate_bps)?;
        let deferred_tax = signed_tax.abs();
        let position = if signed_tax > 0 {
            Some(TaxPosition::DeferredTaxLiability)
        } else if signed_tax < 0 {
            Some(TaxPosition::DeferredTaxAsset)
        } else {
            None
        };

        let explanation = format!(
            "temporary difference {} at {} bps: deferred tax {} ({})",
            input.temporary_difference,
            input.tax_rate_bps,
            deferred_tax,
            match position {
                Some(TaxPosition::DeferredTaxLiability) => "liability",
                Some(TaxPosition::DeferredTaxAsset) => "asset",
                None => "none",
            }
        );

        Ok(CalculatorResult {
            result: DeferredTaxMeasure {
                deferred_tax,
                position,
            },
            inputs: input.clone(),
            explanation,
        })
    }
}

/// Deferred tax service. Input-only: the temporary difference arrives in
/// the request; the company being measured comes from the ambient context.
pub struct DeferredTaxService;

impl DeferredTaxService {
    pub fn measure(
        &self,
        ctx: &DomainContext,
        input: &DeferredTaxInput,
    ) -> Result<DomainResult<CalculatorResult<DeferredTaxInput, DeferredTaxMeasure>>> {
        decide(
            CALCULATE_INTENT,
            &DeferredTaxCalculator,
            input,
            |measure| measure.deferred_tax > 0,
            |computed| {
                let identity = json!({
                    "tenant_id": ctx.tenant_id,
                    "company_id": ctx.company_id,
                    "period_key": computed.inputs.period_key,
                });
                let payload = json!({
                    "company_id": ctx.company_id,
                    "period_key": computed.inputs.period_key,
                    "deferred_tax": computed.result.deferred_tax,
                    "position": computed.result.position,
                    "temporary_difference": computed.inputs.temporary_difference,
                    "tax_rate_bps": computed.inputs.tax_rate_bps,
                });
                Ok(vec![DomainIntent::derived(CALCULATE_INTENT, payload, &identity)])
            },
            Emit::IntentsOnly,
        )
    }
}
