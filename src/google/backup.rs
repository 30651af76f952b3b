use crate::{
    entities::{drive_backup_account, DriveBackupAccount, DriveBackupAccountModel},
    errors::ServiceError,
    events::{Event, EventSender},
    google::{DriveClient, GoogleOAuth},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Default, Serialize, ToSchema)]
pub struct BackupRunReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Ships local backup archives to each enabled Google Drive account:
/// refresh the token, make sure the account folder exists, create a dated
/// subfolder, upload every archive into it.
///
/// Fan-out is best-effort: one account's failure (or one file's) is logged
/// and does not abort the siblings.
#[derive(Clone)]
pub struct BackupService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    backup_dir: PathBuf,
}

impl BackupService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        backup_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            db,
            event_sender,
            backup_dir: backup_dir.into(),
        }
    }

    /// Run the upload for every enabled account.
    #[instrument(skip(self))]
    pub async fn run_all(&self) -> Result<BackupRunReport, ServiceError> {
        let accounts = DriveBackupAccount::find()
            .filter(drive_backup_account::Column::Enabled.eq(true))
            .all(&*self.db)
            .await?;

        let mut report = BackupRunReport {
            attempted: accounts.len(),
            ..BackupRunReport::default()
        };

        // Accounts upload concurrently; each failure is contained to its own
        // account.
        let runs = accounts.into_iter().map(|account| {
            let email = account.email.clone();
            async move { (email, self.run_for_account(account).await) }
        });
        for (email, result) in futures::future::join_all(runs).await {
            match result {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    report.failed += 1;
                    error!(account = %email, error = %e, "drive backup failed for account");
                    self.event_sender
                        .send_or_log(Event::BackupFailed {
                            account_email: email,
                            error: e.to_string(),
                        })
                        .await;
                }
            }
        }

        info!(
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "drive backup run finished"
        );
        Ok(report)
    }

    /// Run the upload for one account by id.
    pub async fn run_for_account_id(&self, account_id: Uuid) -> Result<(), ServiceError> {
        let account = DriveBackupAccount::find_by_id(account_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Backup account {} not found", account_id))
            })?;
        self.run_for_account(account).await
    }

    async fn run_for_account(&self, account: DriveBackupAccountModel) -> Result<(), ServiceError> {
        let refresh_token = account.refresh_token.clone().ok_or_else(|| {
            ServiceError::ServiceUnavailable(format!(
                "Refresh token missing for {}",
                account.email
            ))
        })?;

        let oauth = GoogleOAuth::new(account.client_id.clone(), account.client_secret.clone())?;
        let tokens = oauth.refresh_access_token(&refresh_token).await?;
        let drive = DriveClient::new(tokens.access_token);

        // The main folder id is cached on the account after first discovery.
        let folder_id = match &account.backup_folder_id {
            Some(id) => id.clone(),
            None => {
                let id = drive.ensure_folder(&account.backup_folder_name).await?;
                let mut update: drive_backup_account::ActiveModel = account.clone().into();
                update.backup_folder_id = Set(Some(id.clone()));
                update.update(&*self.db).await?;
                id
            }
        };

        let date_folder = Utc::now().format("%Y-%m-%d_%H-%M-%S").to_string();
        let date_folder_id = drive.create_folder(&date_folder, Some(&folder_id)).await?;

        let files = self.backup_files(account.with_files).await?;
        if files.is_empty() {
            warn!(account = %account.email, dir = %self.backup_dir.display(), "no backup files found");
        }
        for path in files {
            if let Err(e) = drive.upload_file(&path, &date_folder_id).await {
                error!(account = %account.email, file = %path.display(), error = %e, "backup file upload failed");
            }
        }

        let mut stamp: drive_backup_account::ActiveModel =
            DriveBackupAccount::find_by_id(account.id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Backup account {} not found", account.id))
                })?
                .into();
        stamp.last_backup_on = Set(Some(Utc::now()));
        stamp.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::BackupCompleted {
                account_email: account.email.clone(),
            })
            .await;
        info!(account = %account.email, "drive backup uploaded");
        Ok(())
    }

    /// Backup archives in the configured directory. Database dumps and
    /// config exports always ship; site-file archives only when the account
    /// asks for them.
    async fn backup_files(&self, with_files: bool) -> Result<Vec<PathBuf>, ServiceError> {
        let mut entries = match tokio::fs::read_dir(&self.backup_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                return Err(ServiceError::InternalError(format!(
                    "Cannot read backup directory {}: {}",
                    self.backup_dir.display(),
                    e
                )))
            }
        };

        let mut files = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| ServiceError::InternalError(format!("Backup dir read failed: {}", e)))?
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            let is_db_or_conf = name.ends_with(".sql.gz") || name.ends_with(".json");
            let is_site_files = name.ends_with(".tar") || name.ends_with(".tar.gz");
            if is_db_or_conf || (with_files && is_site_files) {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}
