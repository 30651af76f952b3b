use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Warehouse node. Group warehouses aggregate children and never hold stock
/// directly, so fulfillment resolution skips them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub is_group: bool,
    pub disabled: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::warehouse_bin::Entity")]
    Bins,
}

impl Related<super::warehouse_bin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bins.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
