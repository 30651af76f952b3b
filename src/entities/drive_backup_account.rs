use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Google Drive backup target. Client credentials and the refresh token are
/// opaque secrets; they never appear in API responses.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "drive_backup_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[serde(skip_serializing)]
    pub client_id: String,
    #[serde(skip_serializing)]
    pub client_secret: String,
    #[sea_orm(nullable)]
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,
    pub backup_folder_name: String,
    #[sea_orm(nullable)]
    pub backup_folder_id: Option<String>,
    pub with_files: bool,
    pub enabled: bool,
    pub send_email_notification: bool,
    #[sea_orm(nullable)]
    pub notify_email: Option<String>,
    #[sea_orm(nullable)]
    pub last_backup_on: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
