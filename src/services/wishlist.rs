use crate::{
    entities::{wishlist_item, WishlistItem},
    errors::ServiceError,
    services::catalog::{CatalogService, ProductQuery, ProductSummary},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Per-user wishlist; listing runs the saved item codes through catalog
/// assembly so entries carry live stock and price data.
#[derive(Clone)]
pub struct WishlistService {
    db: Arc<DatabaseConnection>,
    catalog: Arc<CatalogService>,
}

impl WishlistService {
    pub fn new(db: Arc<DatabaseConnection>, catalog: Arc<CatalogService>) -> Self {
        Self { db, catalog }
    }

    /// Add an item; adding one already present is a no-op.
    #[instrument(skip(self))]
    pub async fn add(&self, user_email: &str, item_code: &str) -> Result<(), ServiceError> {
        let existing = WishlistItem::find()
            .filter(wishlist_item::Column::UserEmail.eq(user_email))
            .filter(wishlist_item::Column::ItemCode.eq(item_code))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Ok(());
        }

        let row = wishlist_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_email: Set(user_email.to_string()),
            item_code: Set(item_code.to_string()),
            created_at: Set(Utc::now()),
        };
        row.insert(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_email: &str, item_code: &str) -> Result<(), ServiceError> {
        WishlistItem::delete_many()
            .filter(wishlist_item::Column::UserEmail.eq(user_email))
            .filter(wishlist_item::Column::ItemCode.eq(item_code))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    /// Newest-first page of wishlist products with merged stock data.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_email: &str,
        page: u64,
        per_page: u64,
    ) -> Result<Vec<ProductSummary>, ServiceError> {
        let per_page = per_page.clamp(1, 100);
        let offset = page.saturating_sub(1) * per_page;

        let codes: Vec<String> = WishlistItem::find()
            .select_only()
            .column(wishlist_item::Column::ItemCode)
            .filter(wishlist_item::Column::UserEmail.eq(user_email))
            .order_by_desc(wishlist_item::Column::CreatedAt)
            .limit(per_page)
            .offset(offset)
            .into_tuple()
            .all(&*self.db)
            .await?;

        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let query = ProductQuery {
            item_codes: codes,
            per_page,
            page: 1,
            ..ProductQuery::default()
        };
        self.catalog.get_products_with_stock(&query).await
    }
}
