use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Confirmed sales order, derived 1:1 from a submitted draft order by the
/// conversion saga. Created in draft state for downstream fulfillment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sales_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub order_number: String,
    pub customer_id: Uuid,
    pub draft_order_id: Uuid,
    #[sea_orm(nullable)]
    pub shipping_address_id: Option<Uuid>,
    pub docstatus: i16,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub net_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub tax_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub grand_total: Decimal,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub total_qty: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sales_order_line::Entity")]
    Lines,
    #[sea_orm(
        belongs_to = "super::draft_order::Entity",
        from = "Column::DraftOrderId",
        to = "super::draft_order::Column::Id"
    )]
    DraftOrder,
}

impl Related<super::sales_order_line::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lines.def()
    }
}

impl Related<super::draft_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DraftOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
