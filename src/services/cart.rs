use crate::{
    entities::{
        docstatus, draft_order, draft_order_line, DraftOrder, DraftOrderLine,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

const WEB_SOURCE: &str = "web";

/// One cart line as sent by the storefront. Quantity defaults to 1, rate to
/// 0; totals are always recomputed server-side from these fields.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CartLineInput {
    pub item_code: String,
    #[serde(default = "default_qty")]
    pub qty: Decimal,
    #[serde(default)]
    pub rate: Decimal,
}

fn default_qty() -> Decimal {
    Decimal::ONE
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartSyncResult {
    pub quotation_id: Uuid,
    pub order_number: String,
    pub grand_total: Decimal,
    pub total_qty: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuotationLineView {
    pub item_code: String,
    pub qty: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub delivery_date: chrono::NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuotationSnapshot {
    pub quotation_id: Uuid,
    pub order_number: String,
    pub grand_total: Decimal,
    pub total_qty: Decimal,
    pub lines: Vec<QuotationLineView>,
}

/// Maintains the single draft web order per customer.
#[derive(Clone)]
pub struct CartService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    delivery_lead_days: i64,
}

impl CartService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        delivery_lead_days: i64,
    ) -> Self {
        Self {
            db,
            event_sender,
            delivery_lead_days,
        }
    }

    /// Idempotent cart upsert: the customer's draft web order is created on
    /// first sync and has its lines replaced on every later one, so two syncs
    /// never produce two drafts or accumulated lines.
    #[instrument(skip(self, lines))]
    pub async fn sync_cart_to_quotation(
        &self,
        customer_id: Uuid,
        lines: Vec<CartLineInput>,
    ) -> Result<CartSyncResult, ServiceError> {
        for line in &lines {
            if line.qty <= Decimal::ZERO {
                return Err(ServiceError::ValidationError(format!(
                    "Quantity for {} must be positive",
                    line.item_code
                )));
            }
            if line.rate < Decimal::ZERO {
                return Err(ServiceError::ValidationError(format!(
                    "Rate for {} cannot be negative",
                    line.item_code
                )));
            }
        }

        let txn = self.db.begin().await?;

        let existing = DraftOrder::find()
            .filter(draft_order::Column::CustomerId.eq(customer_id))
            .filter(draft_order::Column::Source.eq(WEB_SOURCE))
            .filter(draft_order::Column::Docstatus.eq(docstatus::DRAFT))
            .one(&txn)
            .await?;

        let (order_id, order_number) = match existing {
            Some(order) => {
                DraftOrderLine::delete_many()
                    .filter(draft_order_line::Column::DraftOrderId.eq(order.id))
                    .exec(&txn)
                    .await?;
                (order.id, order.order_number)
            }
            None => {
                let id = Uuid::new_v4();
                let number = format!("QTN-{}", id.to_string()[..8].to_uppercase());
                let shell = draft_order::ActiveModel {
                    id: Set(id),
                    order_number: Set(number.clone()),
                    customer_id: Set(customer_id),
                    source: Set(WEB_SOURCE.to_string()),
                    docstatus: Set(docstatus::DRAFT),
                    grand_total: Set(Decimal::ZERO),
                    total_qty: Set(Decimal::ZERO),
                    created_at: Set(Utc::now()),
                    updated_at: Set(Utc::now()),
                };
                shell.insert(&txn).await?;
                (id, number)
            }
        };

        let delivery_date = (Utc::now() + Duration::days(self.delivery_lead_days)).date_naive();
        let mut grand_total = Decimal::ZERO;
        let mut total_qty = Decimal::ZERO;

        for line in lines {
            let amount = line.qty * line.rate;
            grand_total += amount;
            total_qty += line.qty;

            let row = draft_order_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                draft_order_id: Set(order_id),
                item_code: Set(line.item_code),
                qty: Set(line.qty),
                rate: Set(line.rate),
                amount: Set(amount),
                delivery_date: Set(delivery_date),
                created_at: Set(Utc::now()),
            };
            row.insert(&txn).await?;
        }

        let mut order: draft_order::ActiveModel = DraftOrder::find_by_id(order_id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Draft order {} not found", order_id)))?
            .into();
        order.grand_total = Set(grand_total);
        order.total_qty = Set(total_qty);
        order.updated_at = Set(Utc::now());
        order.update(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CartSynced {
                draft_order_id: order_id,
                customer_id,
            })
            .await;

        info!(%order_id, %grand_total, %total_qty, "synced cart to draft order");
        Ok(CartSyncResult {
            quotation_id: order_id,
            order_number,
            grand_total,
            total_qty,
        })
    }

    /// Snapshot of the customer's current draft web order, if one exists.
    #[instrument(skip(self))]
    pub async fn get_current_quotation(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<QuotationSnapshot>, ServiceError> {
        let order = DraftOrder::find()
            .filter(draft_order::Column::CustomerId.eq(customer_id))
            .filter(draft_order::Column::Source.eq(WEB_SOURCE))
            .filter(draft_order::Column::Docstatus.eq(docstatus::DRAFT))
            .one(&*self.db)
            .await?;

        let Some(order) = order else {
            return Ok(None);
        };

        let lines = DraftOrderLine::find()
            .filter(draft_order_line::Column::DraftOrderId.eq(order.id))
            .order_by_asc(draft_order_line::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(Some(QuotationSnapshot {
            quotation_id: order.id,
            order_number: order.order_number,
            grand_total: order.grand_total,
            total_qty: order.total_qty,
            lines: lines
                .into_iter()
                .map(|l| QuotationLineView {
                    item_code: l.item_code,
                    qty: l.qty,
                    rate: l.rate,
                    amount: l.amount,
                    delivery_date: l.delivery_date,
                })
                .collect(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn cart_line_defaults_fill_qty_and_rate() {
        let line: CartLineInput =
            serde_json::from_str(r#"{"item_code": "WIDGET-1"}"#).expect("parse line");
        assert_eq!(line.qty, Decimal::ONE);
        assert_eq!(line.rate, Decimal::ZERO);
    }

    #[test]
    fn cart_line_accepts_explicit_values() {
        let line: CartLineInput =
            serde_json::from_str(r#"{"item_code": "WIDGET-1", "qty": "2.5", "rate": "19.99"}"#)
                .expect("parse line");
        assert_eq!(line.qty, dec!(2.5));
        assert_eq!(line.rate, dec!(19.99));
    }
}
