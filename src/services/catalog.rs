use crate::{
    entities::{
        catalog_item, home_section, item_attribute, item_group, product_review, wishlist_item,
        CatalogItem, CatalogItemModel, HomeSection, ItemAttribute, ItemGroup, ProductReview,
        WishlistItem,
    },
    errors::ServiceError,
    services::stock::{is_visible, resolve_status, StockLookup, StockStatus},
};
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

const MAX_PAGE_SIZE: u64 = 100;

/// Catalog browse/filter arguments. Field filters narrow the candidate page;
/// price bounds are applied after stock data is merged.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub item_group: Option<String>,
    pub brand: Option<String>,
    /// Restrict to these sections (home page assembly).
    #[serde(default)]
    pub sections: Vec<String>,
    /// Restrict to these item codes (wishlist assembly).
    #[serde(default)]
    pub item_codes: Vec<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub per_page: u64,
    /// Attach section metadata and order items for the home page.
    #[serde(default)]
    pub home_page: bool,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    50
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            item_group: None,
            brand: None,
            sections: Vec::new(),
            item_codes: Vec::new(),
            price_min: None,
            price_max: None,
            page: default_page(),
            per_page: default_page_size(),
            home_page: false,
        }
    }
}

/// One storefront product row with merged stock data.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductSummary {
    pub item_code: String,
    pub item_name: String,
    pub route: Option<String>,
    pub image: Option<String>,
    pub item_group: Option<String>,
    pub brand: Option<String>,
    pub price_list_rate: Decimal,
    pub stock_qty: f64,
    pub in_stock: bool,
    pub stock_status: StockStatus,
    pub section: Option<String>,
    pub section_order: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SectionProducts {
    pub section: String,
    pub items: Vec<ProductSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductFilters {
    pub field_filters: BTreeMap<String, Vec<String>>,
    pub attribute_filters: BTreeMap<String, Vec<String>>,
    pub sub_categories: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductInfo {
    pub item_code: String,
    pub item_name: String,
    pub description: Option<String>,
    pub item_group: Option<String>,
    pub brand: Option<String>,
    pub route: Option<String>,
    pub image: Option<String>,
    pub price_list_rate: Decimal,
    pub stock_qty: f64,
    pub stock_status: StockStatus,
    pub avg_rating: Option<f64>,
    pub review_count: u64,
    pub wished: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewView {
    pub reviewer: String,
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Inclusive price window; `<` and `>` are the exclusion tests, so items on
/// either boundary stay in.
fn passes_price_filter(rate: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    if let Some(min) = min {
        if rate < min {
            return false;
        }
    }
    if let Some(max) = max {
        if rate > max {
            return false;
        }
    }
    true
}

#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
    stock: Arc<dyn StockLookup>,
}

impl CatalogService {
    pub fn new(db: Arc<DatabaseConnection>, stock: Arc<dyn StockLookup>) -> Self {
        Self { db, stock }
    }

    /// Assemble the storefront product list for one page of candidates.
    ///
    /// Stock quantities and work-order existence are fetched with one batched
    /// lookup each across the whole page, never per item. Per item the
    /// pipeline is: visibility rule, price window, status label; failing an
    /// earlier predicate drops the item without evaluating the rest.
    #[instrument(skip(self))]
    pub async fn get_products_with_stock(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<ProductSummary>, ServiceError> {
        let page = self.candidate_page(query).await?;
        if page.is_empty() {
            return Ok(Vec::new());
        }

        let codes: Vec<String> = page.iter().map(|i| i.item_code.clone()).collect();
        let quantities = self.stock.quantities(&codes).await?;
        let in_production = self.stock.items_with_active_work_orders(&codes).await?;

        let mut items: Vec<ProductSummary> = Vec::with_capacity(page.len());
        for item in page {
            let stock_qty = quantities.get(&item.item_code).copied().unwrap_or(0.0);
            let has_wo = in_production.contains(&item.item_code);

            if !is_visible(item.discontinued, stock_qty, has_wo) {
                continue;
            }
            if !passes_price_filter(item.price_list_rate, query.price_min, query.price_max) {
                continue;
            }

            let status = resolve_status(stock_qty, item.is_stock_item, has_wo);
            items.push(ProductSummary {
                in_stock: status == StockStatus::InStock,
                stock_status: status,
                stock_qty,
                item_code: item.item_code,
                item_name: item.item_name,
                route: item.route,
                image: item.image,
                item_group: item.item_group,
                brand: item.brand,
                price_list_rate: item.price_list_rate,
                section: item.section,
                section_order: item.section_order,
            });
        }

        if query.home_page {
            items.sort_by(|a, b| {
                (&a.section, a.section_order.unwrap_or(0))
                    .cmp(&(&b.section, b.section_order.unwrap_or(0)))
            });
        }

        Ok(items)
    }

    /// Home page assembly: active sections in display order, each holding its
    /// products ordered by the per-item section order.
    #[instrument(skip(self))]
    pub async fn get_products_by_section(&self) -> Result<Vec<SectionProducts>, ServiceError> {
        let sections = HomeSection::find()
            .filter(home_section::Column::IsActive.eq(true))
            .order_by_asc(home_section::Column::SortOrder)
            .all(&*self.db)
            .await?;
        if sections.is_empty() {
            return Ok(Vec::new());
        }

        let query = ProductQuery {
            sections: sections.iter().map(|s| s.section_name.clone()).collect(),
            home_page: true,
            per_page: MAX_PAGE_SIZE,
            page: 1,
            ..ProductQuery::default()
        };
        let products = self.get_products_with_stock(&query).await?;

        let mut grouped: Vec<SectionProducts> = sections
            .into_iter()
            .map(|s| SectionProducts {
                section: s.section_name,
                items: Vec::new(),
            })
            .collect();

        for product in products {
            if let Some(section) = product.section.clone() {
                if let Some(bucket) = grouped.iter_mut().find(|g| g.section == section) {
                    bucket.items.push(product);
                }
            }
        }

        for bucket in &mut grouped {
            bucket
                .items
                .sort_by_key(|item| item.section_order.unwrap_or(0));
        }

        Ok(grouped)
    }

    /// Available field and attribute filters, plus immediate web-visible
    /// sub-categories of the given group.
    #[instrument(skip(self))]
    pub async fn get_product_filters(
        &self,
        item_group_filter: Option<&str>,
    ) -> Result<ProductFilters, ServiceError> {
        let mut field_filters = BTreeMap::new();

        let groups: Vec<Option<String>> = CatalogItem::find()
            .select_only()
            .column(catalog_item::Column::ItemGroup)
            .distinct()
            .filter(catalog_item::Column::Published.eq(true))
            .into_tuple()
            .all(&*self.db)
            .await?;
        field_filters.insert(
            "item_group".to_string(),
            groups.into_iter().flatten().collect::<Vec<_>>(),
        );

        let brands: Vec<Option<String>> = CatalogItem::find()
            .select_only()
            .column(catalog_item::Column::Brand)
            .distinct()
            .filter(catalog_item::Column::Published.eq(true))
            .into_tuple()
            .all(&*self.db)
            .await?;
        field_filters.insert(
            "brand".to_string(),
            brands.into_iter().flatten().collect::<Vec<_>>(),
        );

        let pairs: Vec<(String, String)> = ItemAttribute::find()
            .select_only()
            .column(item_attribute::Column::Attribute)
            .column(item_attribute::Column::AttributeValue)
            .distinct()
            .into_tuple()
            .all(&*self.db)
            .await?;
        let mut attribute_filters: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (attribute, value) in pairs {
            attribute_filters.entry(attribute).or_default().push(value);
        }

        let sub_categories = match item_group_filter {
            Some(parent) if !parent.is_empty() => ItemGroup::find()
                .filter(item_group::Column::ParentItemGroup.eq(parent))
                .filter(item_group::Column::ShowOnWebsite.eq(true))
                .order_by_asc(item_group::Column::Name)
                .all(&*self.db)
                .await?
                .into_iter()
                .map(|g| g.name)
                .collect(),
            _ => Vec::new(),
        };

        Ok(ProductFilters {
            field_filters,
            attribute_filters,
            sub_categories,
        })
    }

    /// Full product detail, including review aggregates and whether the
    /// viewing user has wished the item.
    #[instrument(skip(self))]
    pub async fn get_product_info(
        &self,
        item_code: &str,
        viewer: Option<&str>,
    ) -> Result<ProductInfo, ServiceError> {
        let item = CatalogItem::find()
            .filter(catalog_item::Column::ItemCode.eq(item_code))
            .filter(catalog_item::Column::Published.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_code)))?;

        let codes = vec![item.item_code.clone()];
        let stock_qty = self
            .stock
            .quantities(&codes)
            .await?
            .get(&item.item_code)
            .copied()
            .unwrap_or(0.0);
        let has_wo = self
            .stock
            .items_with_active_work_orders(&codes)
            .await?
            .contains(&item.item_code);

        let ratings: Vec<i32> = ProductReview::find()
            .select_only()
            .column(product_review::Column::Rating)
            .filter(product_review::Column::ItemCode.eq(item_code))
            .into_tuple()
            .all(&*self.db)
            .await?;
        let review_count = ratings.len() as u64;
        let avg_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<i32>() as f64 / ratings.len() as f64)
        };

        let wished = match viewer {
            Some(email) => {
                WishlistItem::find()
                    .filter(wishlist_item::Column::UserEmail.eq(email))
                    .filter(wishlist_item::Column::ItemCode.eq(item_code))
                    .count(&*self.db)
                    .await?
                    > 0
            }
            None => false,
        };

        Ok(ProductInfo {
            stock_status: resolve_status(stock_qty, item.is_stock_item, has_wo),
            stock_qty,
            avg_rating,
            review_count,
            wished,
            item_code: item.item_code,
            item_name: item.item_name,
            description: item.description,
            item_group: item.item_group,
            brand: item.brand,
            route: item.route,
            image: item.image,
            price_list_rate: item.price_list_rate,
        })
    }

    /// Reviews for an item, newest first.
    pub async fn get_product_reviews(
        &self,
        item_code: &str,
    ) -> Result<Vec<ReviewView>, ServiceError> {
        let reviews = ProductReview::find()
            .filter(product_review::Column::ItemCode.eq(item_code))
            .order_by_desc(product_review::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(reviews
            .into_iter()
            .map(|r| ReviewView {
                reviewer: r.reviewer,
                rating: r.rating,
                review: r.review,
                created_at: r.created_at,
            })
            .collect())
    }

    /// One page of candidate items from the catalog, before stock merge.
    async fn candidate_page(
        &self,
        query: &ProductQuery,
    ) -> Result<Vec<CatalogItemModel>, ServiceError> {
        let per_page = query.per_page.clamp(1, MAX_PAGE_SIZE);
        let offset = query.page.saturating_sub(1) * per_page;

        let mut find = CatalogItem::find().filter(catalog_item::Column::Published.eq(true));

        if let Some(group) = &query.item_group {
            find = find.filter(catalog_item::Column::ItemGroup.eq(group.as_str()));
        }
        if let Some(brand) = &query.brand {
            find = find.filter(catalog_item::Column::Brand.eq(brand.as_str()));
        }
        if !query.sections.is_empty() {
            find = find.filter(catalog_item::Column::Section.is_in(query.sections.iter().cloned()));
        }
        if !query.item_codes.is_empty() {
            find = find
                .filter(catalog_item::Column::ItemCode.is_in(query.item_codes.iter().cloned()));
        }

        Ok(find
            .order_by_desc(catalog_item::Column::Ranking)
            .order_by_asc(catalog_item::Column::ItemCode)
            .limit(per_page)
            .offset(offset)
            .all(&*self.db)
            .await?)
    }
}
