use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;
use uuid::Uuid;

use fin_core::app::ports::{AssetCarrying, ImpairmentQuery, InventoryQuery, ItemValuation};
use fin_core::domains::deferred_tax::{DeferredTaxInput, DeferredTaxService, CALCULATE_INTENT};
use fin_core::domains::impairment::{ImpairmentRequest, ImpairmentService, RECOGNIZE_LOSS_INTENT};
use fin_core::domains::inventory::{InventoryService, WriteDownRequest, WRITE_DOWN_INTENT};
use fin_core::domains::revenue::{
    AllocationInput, ObligationInput, RevenueService, ALLOCATE_INTENT,
};
use fin_core::idempotency::derive_idempotency_key;
use fin_core::{DomainContext, DomainError, DomainResult, ErrorKind};

fn context() -> DomainContext {
    DomainContext::new(
        Uuid::from_u128(1),
        Uuid::from_u128(2),
        Uuid::from_u128(3),
        NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
    )
}

struct FixedInventory {
    valuation: Option<ItemValuation>,
}

#[async_trait]
impl InventoryQuery for FixedInventory {
    async fn item_valuation(
        &self,
        _ctx: &DomainContext,
        item_id: Uuid,
        _period_key: &str,
    ) -> fin_core::Result<ItemValuation> {
        self.valuation
            .clone()
            .ok_or_else(|| DomainError::not_found("inventory item", item_id))
    }
}

struct FixedAssets {
    carrying_amount: i64,
}

#[async_trait]
impl ImpairmentQuery for FixedAssets {
    async fn asset_carrying(
        &self,
        _ctx: &DomainContext,
        _asset_id: Uuid,
    ) -> fin_core::Result<AssetCarrying> {
        Ok(AssetCarrying {
            carrying_amount: self.carrying_amount,
        })
    }
}

#[tokio::test]
async fn nrv_at_or_above_cost_is_an_explanatory_no_op() {
    let service = InventoryService::new(FixedInventory {
        valuation: Some(ItemValuation {
            quantity: 10,
            unit_cost: 1_000,
        }),
    });

    let outcome = service
        .assess_write_down(
            &context(),
            &WriteDownRequest {
                item_id: Uuid::from_u128(42),
                period_key: "2025-03".to_string(),
                unit_nrv: 1_000,
            },
        )
        .await
        .unwrap();

    assert!(!outcome.is_mutation());
    assert!(outcome.intents().is_empty());
    let data = outcome.data().unwrap();
    assert_eq!(data.result.write_down, 0);
    assert!(data.explanation.contains("write-down 0"));
}

#[tokio::test]
async fn nrv_below_cost_emits_one_write_down_intent_with_reproducible_key() {
    let item_id = Uuid::from_u128(42);
    let ctx = context();
    let service = InventoryService::new(FixedInventory {
        valuation: Some(ItemValuation {
            quantity: 10,
            unit_cost: 1_000,
        }),
    });

    let outcome = service
        .assess_write_down(
            &ctx,
            &WriteDownRequest {
                item_id,
                period_key: "2025-03".to_string(),
                unit_nrv: 800,
            },
        )
        .await
        .unwrap();

    let intents = outcome.intents();
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].intent_type, WRITE_DOWN_INTENT);
    assert_eq!(intents[0].payload["write_down"], 2_000);

    // The key is derivable from identifying fields alone.
    let expected = derive_idempotency_key(
        WRITE_DOWN_INTENT,
        &json!({
            "tenant_id": ctx.tenant_id,
            "company_id": ctx.company_id,
            "item_id": item_id,
            "period_key": "2025-03",
        }),
    );
    assert_eq!(intents[0].idempotency_key, expected);
}

#[tokio::test]
async fn write_down_key_is_reproducible_from_identity() {
    // Same item and period with a different observed NRV: recomputed
    // amounts change, the idempotency key does not.
    let ctx = context();
    let request = |nrv| WriteDownRequest {
        item_id: Uuid::from_u128(42),
        period_key: "2025-03".to_string(),
        unit_nrv: nrv,
    };
    let service = InventoryService::new(FixedInventory {
        valuation: Some(ItemValuation {
            quantity: 10,
            unit_cost: 1_000,
        }),
    });

    let first = service.assess_write_down(&ctx, &request(800)).await.unwrap();
    let second = service.assess_write_down(&ctx, &request(700)).await.unwrap();

    assert_ne!(
        first.intents()[0].payload["write_down"],
        second.intents()[0].payload["write_down"]
    );
    assert_eq!(
        first.intents()[0].idempotency_key,
        second.intents()[0].idempotency_key
    );
}

#[tokio::test]
async fn missing_item_propagates_not_found_unchanged() {
    let service = InventoryService::new(FixedInventory { valuation: None });
    let err = service
        .assess_write_down(
            &context(),
            &WriteDownRequest {
                item_id: Uuid::from_u128(42),
                period_key: "2025-03".to_string(),
                unit_nrv: 800,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn identical_service_calls_yield_identical_outcomes() {
    let ctx = context();
    let request = WriteDownRequest {
        item_id: Uuid::from_u128(42),
        period_key: "2025-03".to_string(),
        unit_nrv: 800,
    };
    let service = InventoryService::new(FixedInventory {
        valuation: Some(ItemValuation {
            quantity: 10,
            unit_cost: 1_000,
        }),
    });

    let first = service.assess_write_down(&ctx, &request).await.unwrap();
    let second = service.assess_write_down(&ctx, &request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn carrying_amount_equal_to_recoverable_is_not_impaired() {
    let service = ImpairmentService::new(FixedAssets {
        carrying_amount: 50_000,
    });
    let outcome = service
        .assess(
            &context(),
            &ImpairmentRequest {
                asset_id: Uuid::from_u128(7),
                period_key: "2025-Q1".to_string(),
                recoverable_amount: 50_000,
            },
        )
        .await
        .unwrap();
    assert!(!outcome.is_mutation());
    assert!(!outcome.data().unwrap().result.impaired);
}

#[tokio::test]
async fn recoverable_shortfall_emits_a_loss_intent() {
    let service = ImpairmentService::new(FixedAssets {
        carrying_amount: 50_000,
    });
    let outcome = service
        .assess(
            &context(),
            &ImpairmentRequest {
                asset_id: Uuid::from_u128(7),
                period_key: "2025-Q1".to_string(),
                recoverable_amount: 42_500,
            },
        )
        .await
        .unwrap();
    let intents = outcome.intents();
    assert_eq!(intents.len(), 1);
    assert_eq!(intents[0].intent_type, RECOGNIZE_LOSS_INTENT);
    assert_eq!(intents[0].payload["impairment_loss"], 7_500);
}

#[test]
fn revenue_allocation_returns_intent_with_read() {
    let ctx = context();
    let input = AllocationInput {
        contract_id: Uuid::from_u128(9),
        period_key: "2025-03".to_string(),
        transaction_price: 100_000,
        obligations: vec![
            ObligationInput {
                obligation_id: "license".to_string(),
                standalone_price: 60_000,
            },
            ObligationInput {
                obligation_id: "support".to_string(),
                standalone_price: 40_000,
            },
        ],
    };

    let outcome = RevenueService.allocate_transaction_price(&ctx, &input).unwrap();

    match &outcome {
        DomainResult::IntentWithRead { data, intents } => {
            assert_eq!(data.result.iter().map(|l| l.allocated).sum::<i64>(), 100_000);
            assert_eq!(intents.len(), 1);
            assert_eq!(intents[0].intent_type, ALLOCATE_INTENT);
        }
        other => panic!("expected intent+read, got {:?}", other),
    }

    let expected = derive_idempotency_key(
        ALLOCATE_INTENT,
        &json!({
            "tenant_id": ctx.tenant_id,
            "company_id": ctx.company_id,
            "contract_id": input.contract_id,
            "period_key": "2025-03",
        }),
    );
    assert_eq!(outcome.intents()[0].idempotency_key, expected);
}

#[test]
fn deferred_tax_on_zero_difference_is_a_no_op() {
    let outcome = DeferredTaxService
        .measure(
            &context(),
            &DeferredTaxInput {
                period_key: "2025".to_string(),
                temporary_difference: 0,
                tax_rate_bps: 2_500,
            },
        )
        .unwrap();
    assert!(!outcome.is_mutation());
}

#[test]
fn deferred_tax_key_ignores_the_measured_amounts() {
    let ctx = context();
    let measure = |difference| {
        DeferredTaxService
            .measure(
                &ctx,
                &DeferredTaxInput {
                    period_key: "2025".to_string(),
                    temporary_difference: difference,
                    tax_rate_bps: 2_500,
                },
            )
            .unwrap()
    };

    let a = measure(100_000);
    let b = measure(-200_000);
    assert_eq!(a.intents()[0].intent_type, CALCULATE_INTENT);
    assert_eq!(
        a.intents()[0].idempotency_key,
        b.intents()[0].idempotency_key
    );
    assert_ne!(a.intents()[0].payload, b.intents()[0].payload);
}
