use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Catalog item published to the storefront.
///
/// `published` is the web visibility flag maintained by the discontinued-item
/// sweep; `website_warehouse` is the default warehouse consulted for web
/// stock figures.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub item_code: String,
    pub item_name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub item_group: Option<String>,
    #[sea_orm(nullable)]
    pub brand: Option<String>,
    #[sea_orm(nullable)]
    pub route: Option<String>,
    #[sea_orm(nullable)]
    pub image: Option<String>,
    #[sea_orm(nullable)]
    pub website_warehouse: Option<String>,
    pub is_stock_item: bool,
    pub discontinued: bool,
    pub published: bool,
    #[sea_orm(nullable)]
    pub section: Option<String>,
    #[sea_orm(nullable)]
    pub section_order: Option<i32>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price_list_rate: Decimal,
    pub ranking: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_review::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::item_attribute::Entity")]
    Attributes,
}

impl Related<super::product_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::item_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
