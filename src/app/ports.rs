use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::DomainContext;
use crate::error::Result;
use crate::money::MinorUnits;

/// Current valuation of an inventory item, as read from stock records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemValuation {
    pub quantity: i64,
    pub unit_cost: MinorUnits,
}

/// Read side for inventory services. Implementations are injected by the
/// embedding application; reads must be consistent within a single service
/// call and scoped by the ambient context (tenant/company).
#[async_trait]
pub trait InventoryQuery: Send + Sync {
    /// Raises `NotFound` when the item has no valuation for the period.
    async fn item_valuation(
        &self,
        ctx: &DomainContext,
        item_id: Uuid,
        period_key: &str,
    ) -> Result<ItemValuation>;
}

/// Carrying state of a fixed asset at the reporting date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetCarrying {
    pub carrying_amount: MinorUnits,
}

/// Read side for impairment services.
#[async_trait]
pub trait ImpairmentQuery: Send + Sync {
    /// Raises `NotFound` when the asset is not on the books.
    async fn asset_carrying(&self, ctx: &DomainContext, asset_id: Uuid) -> Result<AssetCarrying>;
}
