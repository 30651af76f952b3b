use crate::{
    entities::{user_account, UserAccount},
    errors::ServiceError,
    AppState,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts, State},
    http::{header, request::Parts},
    routing::post,
    Json, Router,
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use validator::Validate;

/// JWT claims carried by storefront session tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User email; the identity every service receives explicitly.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

pub fn hash_password(password: &str) -> Result<String, ServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::InternalError(format!("password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| ServiceError::InternalError(format!("stored hash unreadable: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Issues and validates session tokens and backs the login route.
#[derive(Clone)]
pub struct AuthService {
    db: Arc<DatabaseConnection>,
    jwt_secret: String,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(db: Arc<DatabaseConnection>, jwt_secret: String, token_ttl_secs: i64) -> Self {
        Self {
            db,
            jwt_secret,
            token_ttl_secs,
        }
    }

    pub fn issue_token(&self, email: &str) -> Result<String, ServiceError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: email.to_string(),
            iat: now,
            exp: now + self.token_ttl_secs,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ServiceError::InternalError(format!("token encoding failed: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthorized("Invalid or expired token".to_string()))
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ServiceError> {
        let user = UserAccount::find()
            .filter(user_account::Column::Email.eq(email))
            .filter(user_account::Column::Enabled.eq(true))
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("Invalid credentials".to_string()))?;

        if !verify_password(password, &user.password_hash)? {
            return Err(ServiceError::Unauthorized("Invalid credentials".to_string()));
        }

        Ok(LoginResponse {
            token: self.issue_token(&user.email)?,
            token_type: "Bearer".to_string(),
            expires_in: self.token_ttl_secs,
        })
    }
}

/// Authenticated caller, extracted from the Bearer token. Handlers pass the
/// resolved identity into services explicitly; there is no ambient session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = ServiceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_service = Arc::<AuthService>::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ServiceError::Unauthorized("Missing Authorization header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .map(str::trim)
            .ok_or_else(|| {
                ServiceError::Unauthorized("Authorization header must be a Bearer token".to_string())
            })?;

        let claims = auth_service.validate_token(token)?;
        Ok(AuthUser { email: claims.sub })
    }
}

/// Guest-tolerant variant: absent or invalid credentials resolve to `None`
/// instead of rejecting, for endpoints that only personalize when they can.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

#[async_trait]
impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AuthService>: FromRef<S>,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Login route, mounted outside the versioned API like the rest of the auth
/// surface.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = crate::errors::ErrorResponse)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ServiceError> {
    payload.validate()?;
    let response = state.auth.login(&payload.email, &payload.password).await?;
    Ok(Json(response))
}
