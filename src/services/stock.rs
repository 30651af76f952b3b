use crate::{
    entities::{
        catalog_item, warehouse, warehouse_bin, work_order, CatalogItem, Warehouse, WarehouseBin,
        WorkOrder, WorkOrderStatus,
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Stock availability presented on the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    #[serde(rename = "In Stock")]
    InStock,
    #[serde(rename = "Out of Stock")]
    OutOfStock,
    #[serde(rename = "In Process")]
    InProcess,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::InStock => "In Stock",
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::InProcess => "In Process",
        }
    }
}

/// Classifies an item's availability.
///
/// Precedence: items not tracked as stock are always available; positive
/// quantity wins next; an active work order marks an otherwise empty item as
/// in process; everything else is out of stock.
pub fn resolve_status(stock_qty: f64, is_stock_item: bool, has_active_work_order: bool) -> StockStatus {
    if !is_stock_item {
        return StockStatus::InStock;
    }
    if stock_qty > 0.0 {
        return StockStatus::InStock;
    }
    if has_active_work_order {
        return StockStatus::InProcess;
    }
    StockStatus::OutOfStock
}

/// Whether a catalog item may stay visible on the web.
///
/// The single suppression rule: hidden only when the item is discontinued,
/// has no stock left, and no active work order will replenish it.
pub fn is_visible(discontinued: bool, stock_qty: f64, has_active_work_order: bool) -> bool {
    if !discontinued {
        return true;
    }
    if stock_qty > 0.0 {
        return true;
    }
    if has_active_work_order {
        return true;
    }
    false
}

/// Stock figures for one item, as returned by the stock RPC.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemStock {
    pub in_stock: bool,
    pub stock_qty: f64,
    pub is_stock_item: bool,
}

/// Read-side stock collaborator.
///
/// Batch methods issue exactly one query regardless of the number of item
/// codes; catalog assembly depends on that to avoid per-item query collapse.
#[async_trait]
pub trait StockLookup: Send + Sync {
    /// Total on-hand quantity per item code, one batched bin query.
    async fn quantities(&self, item_codes: &[String]) -> Result<HashMap<String, f64>, ServiceError>;

    /// Item codes with at least one active work order, one batched query.
    /// Active means status outside {Completed, Cancelled} and docstatus 0 or 1.
    async fn items_with_active_work_orders(
        &self,
        item_codes: &[String],
    ) -> Result<HashSet<String>, ServiceError>;

    /// Warehouse holding the most stock for the item, if any bin is positive.
    async fn best_stocked_warehouse(&self, item_code: &str) -> Result<Option<String>, ServiceError>;

    /// First enabled non-group warehouse, by name.
    async fn first_non_group_warehouse(&self) -> Result<Option<String>, ServiceError>;
}

#[derive(Clone)]
pub struct StockService {
    db: Arc<DatabaseConnection>,
}

impl StockService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Stock figures for a single item, scoped to `warehouse` when given,
    /// else the item's website warehouse, else all bins.
    #[instrument(skip(self))]
    pub async fn item_stock(
        &self,
        item_code: &str,
        warehouse: Option<&str>,
    ) -> Result<ItemStock, ServiceError> {
        let item = CatalogItem::find()
            .filter(catalog_item::Column::ItemCode.eq(item_code))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_code)))?;

        let scope = warehouse
            .map(str::to_string)
            .or_else(|| item.website_warehouse.clone());

        let mut query =
            WarehouseBin::find().filter(warehouse_bin::Column::ItemCode.eq(item_code));
        if let Some(wh) = &scope {
            query = query.filter(warehouse_bin::Column::Warehouse.eq(wh.as_str()));
        }
        let stock_qty: f64 = query.all(&*self.db).await?.iter().map(|b| b.actual_qty).sum();

        Ok(ItemStock {
            in_stock: !item.is_stock_item || stock_qty > 0.0,
            stock_qty,
            is_stock_item: item.is_stock_item,
        })
    }
}

#[async_trait]
impl StockLookup for StockService {
    async fn quantities(&self, item_codes: &[String]) -> Result<HashMap<String, f64>, ServiceError> {
        if item_codes.is_empty() {
            return Ok(HashMap::new());
        }

        let bins = WarehouseBin::find()
            .filter(warehouse_bin::Column::ItemCode.is_in(item_codes.iter().cloned()))
            .all(&*self.db)
            .await?;

        let mut totals: HashMap<String, f64> = HashMap::new();
        for bin in bins {
            *totals.entry(bin.item_code).or_insert(0.0) += bin.actual_qty;
        }
        Ok(totals)
    }

    async fn items_with_active_work_orders(
        &self,
        item_codes: &[String],
    ) -> Result<HashSet<String>, ServiceError> {
        if item_codes.is_empty() {
            return Ok(HashSet::new());
        }

        let orders = WorkOrder::find()
            .filter(work_order::Column::ProductionItem.is_in(item_codes.iter().cloned()))
            .filter(
                work_order::Column::Status
                    .is_not_in([WorkOrderStatus::Completed, WorkOrderStatus::Cancelled]),
            )
            .filter(work_order::Column::Docstatus.is_in([0i16, 1i16]))
            .all(&*self.db)
            .await?;

        Ok(orders.into_iter().map(|wo| wo.production_item).collect())
    }

    async fn best_stocked_warehouse(&self, item_code: &str) -> Result<Option<String>, ServiceError> {
        let bin = WarehouseBin::find()
            .filter(warehouse_bin::Column::ItemCode.eq(item_code))
            .filter(warehouse_bin::Column::ActualQty.gt(0.0))
            .order_by_desc(warehouse_bin::Column::ActualQty)
            .limit(1)
            .one(&*self.db)
            .await?;

        Ok(bin.map(|b| b.warehouse))
    }

    async fn first_non_group_warehouse(&self) -> Result<Option<String>, ServiceError> {
        let wh = Warehouse::find()
            .filter(warehouse::Column::IsGroup.eq(false))
            .filter(warehouse::Column::Disabled.eq(false))
            .order_by_asc(warehouse::Column::Name)
            .one(&*self.db)
            .await?;

        Ok(wh.map(|w| w.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_stock_items_are_always_in_stock() {
        assert_eq!(resolve_status(0.0, false, false), StockStatus::InStock);
        assert_eq!(resolve_status(-3.0, false, true), StockStatus::InStock);
    }

    #[test]
    fn positive_quantity_wins_over_work_orders() {
        assert_eq!(resolve_status(5.0, true, true), StockStatus::InStock);
        assert_eq!(resolve_status(0.5, true, false), StockStatus::InStock);
    }

    #[test]
    fn empty_item_with_work_order_is_in_process() {
        assert_eq!(resolve_status(0.0, true, true), StockStatus::InProcess);
        assert_eq!(resolve_status(-1.0, true, true), StockStatus::InProcess);
    }

    #[test]
    fn empty_item_without_work_order_is_out_of_stock() {
        assert_eq!(resolve_status(0.0, true, false), StockStatus::OutOfStock);
    }

    #[test]
    fn visibility_suppresses_only_the_exact_triple() {
        assert!(!is_visible(true, 0.0, false));
        assert!(!is_visible(true, -2.0, false));

        assert!(is_visible(false, 0.0, false));
        assert!(is_visible(true, 1.0, false));
        assert!(is_visible(true, 0.0, true));
    }

    #[test]
    fn discontinued_with_work_order_stays_visible_and_in_process() {
        assert!(is_visible(true, 0.0, true));
        assert_eq!(resolve_status(0.0, true, true), StockStatus::InProcess);
    }

    #[test]
    fn status_labels_match_storefront_wording() {
        assert_eq!(StockStatus::InStock.label(), "In Stock");
        assert_eq!(StockStatus::OutOfStock.label(), "Out of Stock");
        assert_eq!(StockStatus::InProcess.label(), "In Process");
    }
}
