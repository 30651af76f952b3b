use crate::{
    entities::{catalog_item, CatalogItem},
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock::{is_visible, StockLookup},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;
use tracing::{info, instrument};

/// Outcome of one discontinued-item sweep.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    pub scanned: usize,
    pub unpublished: usize,
    pub republished: usize,
}

/// Periodic job keeping discontinued items' `published` flag in line with
/// the visibility rule. Writes are idempotent, so overlapping runs are safe.
#[derive(Clone)]
pub struct PublishingService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    stock: Arc<dyn StockLookup>,
}

impl PublishingService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        stock: Arc<dyn StockLookup>,
    ) -> Self {
        Self {
            db,
            event_sender,
            stock,
        }
    }

    /// Scan all discontinued items; hide the ones with no stock and no
    /// active work order, restore the ones that regained either. Stock and
    /// work-order data come from one batched lookup each.
    #[instrument(skip(self))]
    pub async fn sweep_discontinued(&self) -> Result<SweepOutcome, ServiceError> {
        let items = CatalogItem::find()
            .filter(catalog_item::Column::Discontinued.eq(true))
            .all(&*self.db)
            .await?;

        let codes: Vec<String> = items.iter().map(|i| i.item_code.clone()).collect();
        let quantities = self.stock.quantities(&codes).await?;
        let in_production = self.stock.items_with_active_work_orders(&codes).await?;

        let mut outcome = SweepOutcome {
            scanned: items.len(),
            ..SweepOutcome::default()
        };

        for item in items {
            let stock_qty = quantities.get(&item.item_code).copied().unwrap_or(0.0);
            let has_wo = in_production.contains(&item.item_code);
            let visible = is_visible(true, stock_qty, has_wo);

            if visible == item.published {
                continue;
            }

            let item_code = item.item_code.clone();
            let mut update: catalog_item::ActiveModel = item.into();
            update.published = Set(visible);
            update.updated_at = Set(Utc::now());
            update.update(&*self.db).await?;

            if visible {
                outcome.republished += 1;
            } else {
                outcome.unpublished += 1;
            }
            self.event_sender
                .send_or_log(Event::ItemPublishedChanged {
                    item_code,
                    published: visible,
                })
                .await;
        }

        info!(
            scanned = outcome.scanned,
            unpublished = outcome.unpublished,
            republished = outcome.republished,
            "discontinued sweep finished"
        );
        Ok(outcome)
    }
}
