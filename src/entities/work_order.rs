use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Production work order for a catalog item.
///
/// A work order counts as active while `status` is neither Completed nor
/// Cancelled and `docstatus` is 0 (draft) or 1 (submitted). Cancelled
/// documents carry `docstatus` 2.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "work_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub work_order_number: String,
    pub production_item: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub qty_to_manufacture: Decimal,
    pub status: WorkOrderStatus,
    pub docstatus: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum WorkOrderStatus {
    #[sea_orm(string_value = "Draft")]
    Draft,
    #[sea_orm(string_value = "Not Started")]
    NotStarted,
    #[sea_orm(string_value = "In Process")]
    InProcess,
    #[sea_orm(string_value = "Completed")]
    Completed,
    #[sea_orm(string_value = "Stopped")]
    Stopped,
    #[sea_orm(string_value = "Cancelled")]
    Cancelled,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
