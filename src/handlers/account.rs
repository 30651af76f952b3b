use crate::{
    errors::{ApiError, ServiceError},
    handlers::common::success_response,
    services::registration::RegistrationInput,
    AppState,
};
use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;
use utoipa::ToSchema;

/// Guest-reachable account utilities: signup, password reset, newsletter.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/password-reset", post(request_password_reset))
        .route("/subscribe", post(subscribe))
}

/// Register a storefront user and its customer record
///
/// Failures the caller can act on (duplicate email, bad input) surface as
/// in-band error statuses, matching what the storefront renders; everything
/// else is logged and reported generically.
#[utoipa::path(
    post,
    path = "/api/v1/account/register",
    request_body = RegistrationInput,
    responses(
        (status = 200, description = "Registration outcome", body = crate::services::registration::RegistrationResult)
    ),
    tag = "Account"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegistrationInput>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    match state.services.registration.register(payload).await {
        Ok(result) => Ok(success_response(result)),
        Err(ServiceError::Conflict(message)) => Ok(success_response(json!({
            "status": "error",
            "message": message,
        }))),
        Err(ServiceError::ValidationError(message)) => {
            Err(ApiError::ValidationError(message))
        }
        Err(e) => {
            error!(error = %e, "registration failed");
            Ok(success_response(json!({
                "status": "error",
                "message": "Registration failed. Please try again or contact support.",
            })))
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub identifier: String,
}

/// Request a password reset by username, email, or phone
#[utoipa::path(
    post,
    path = "/api/v1/account/password-reset",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset outcome", body = crate::services::password_reset::ResetOutcome)
    ),
    tag = "Account"
)]
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(payload): Json<PasswordResetRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let outcome = state
        .services
        .password_reset
        .request_reset(&payload.identifier)
        .await?;
    Ok(success_response(outcome))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Subscribe an email address to the newsletter
#[utoipa::path(
    post,
    path = "/api/v1/account/subscribe",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Subscription outcome", body = crate::services::newsletter::SubscribeOutcome)
    ),
    tag = "Account"
)]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let outcome = state.services.newsletter.subscribe(&payload.email).await?;
    Ok(success_response(outcome))
}
