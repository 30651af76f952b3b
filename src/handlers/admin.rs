use crate::{
    auth::AuthUser,
    entities::{drive_backup_account, DriveBackupAccount},
    errors::{ApiError, ServiceError},
    google::GoogleOAuth,
    handlers::common::success_response,
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::Deserialize;
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Operational endpoints: backup runs and Drive account wiring. These back
/// internal jobs, not the public storefront, but still require a session.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/backups/run", post(run_backups))
        .route("/backup-accounts/:id/run", post(run_account_backup))
        .route("/backup-accounts/:id/authorize-url", get(authorize_url))
        .route("/backup-accounts/:id/connect", post(connect_account))
        .route("/publishing/sweep", post(run_publishing_sweep))
}

/// Upload backups for every enabled Drive account
#[utoipa::path(
    post,
    path = "/api/v1/admin/backups/run",
    responses(
        (status = 200, description = "Per-account fan-out report", body = crate::google::backup::BackupRunReport)
    ),
    security(("Bearer" = [])),
    tag = "Admin"
)]
pub async fn run_backups(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let report = state.services.backup.run_all().await?;
    Ok(success_response(report))
}

/// Upload backups for one account
#[utoipa::path(
    post,
    path = "/api/v1/admin/backup-accounts/{id}/run",
    params(("id" = Uuid, Path, description = "Backup account id")),
    responses(
        (status = 200, description = "Backup uploaded"),
        (status = 503, description = "Account has no refresh token", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Admin"
)]
pub async fn run_account_backup(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state.services.backup.run_for_account_id(id).await?;
    Ok(success_response(json!({"status": "success"})))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AuthorizeUrlParams {
    pub redirect_uri: String,
}

/// Google consent URL for connecting a backup account
#[utoipa::path(
    get,
    path = "/api/v1/admin/backup-accounts/{id}/authorize-url",
    params(("id" = Uuid, Path, description = "Backup account id"), AuthorizeUrlParams),
    responses((status = 200, description = "Consent URL")),
    security(("Bearer" = [])),
    tag = "Admin"
)]
pub async fn authorize_url(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<AuthorizeUrlParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let account = load_account(&state, id).await?;
    let oauth = GoogleOAuth::new(account.client_id, account.client_secret)?;
    let url = oauth.authorization_url(&params.redirect_uri, &id.to_string());
    Ok(success_response(json!({ "url": url })))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConnectAccountRequest {
    pub code: String,
    pub redirect_uri: String,
}

/// Exchange an authorization code and store the refresh token
#[utoipa::path(
    post,
    path = "/api/v1/admin/backup-accounts/{id}/connect",
    params(("id" = Uuid, Path, description = "Backup account id")),
    request_body = ConnectAccountRequest,
    responses(
        (status = 200, description = "Account connected"),
        (status = 502, description = "Google rejected the exchange", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Admin"
)]
pub async fn connect_account(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConnectAccountRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let account = load_account(&state, id).await?;
    let oauth = GoogleOAuth::new(account.client_id.clone(), account.client_secret.clone())?;
    let tokens = oauth
        .authorize(&payload.code, &payload.redirect_uri)
        .await?;

    let refresh_token = tokens.refresh_token.ok_or_else(|| {
        ServiceError::ExternalServiceError(
            "Google did not return a refresh token; re-run consent with prompt=consent"
                .to_string(),
        )
    })?;

    let mut update: drive_backup_account::ActiveModel = account.into();
    update.refresh_token = Set(Some(refresh_token));
    update.update(&*state.db).await.map_err(ServiceError::from)?;

    Ok(success_response(json!({"status": "connected"})))
}

/// Trigger the discontinued-item sweep immediately
#[utoipa::path(
    post,
    path = "/api/v1/admin/publishing/sweep",
    responses((status = 200, description = "Sweep outcome")),
    security(("Bearer" = [])),
    tag = "Admin"
)]
pub async fn run_publishing_sweep(
    _user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let outcome = state.services.publishing.sweep_discontinued().await?;
    Ok(success_response(json!({
        "scanned": outcome.scanned,
        "unpublished": outcome.unpublished,
        "republished": outcome.republished,
    })))
}

pub async fn load_account(
    state: &AppState,
    id: Uuid,
) -> Result<crate::entities::DriveBackupAccountModel, ServiceError> {
    DriveBackupAccount::find_by_id(id)
        .one(&*state.db)
        .await?
        .ok_or_else(|| ServiceError::NotFound(format!("Backup account {} not found", id)))
}
