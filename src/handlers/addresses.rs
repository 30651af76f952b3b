use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{created_response, no_content_response, success_response, validate_input},
    services::addresses::AddressInput,
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    routing::{delete, get, post, put},
    Router,
};
use uuid::Uuid;

/// Address book routes; all operate on the caller's own customer.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_addresses))
        .route("/", post(create_address))
        .route("/:id", put(update_address))
        .route("/:id", delete(delete_address))
}

/// The caller's saved addresses
#[utoipa::path(
    get,
    path = "/api/v1/addresses",
    responses(
        (status = 200, description = "Address list", body = [crate::entities::CustomerAddressModel]),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Addresses"
)]
pub async fn list_addresses(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    let addresses = state.services.addresses.list(customer.id).await?;
    Ok(success_response(addresses))
}

/// Save a new address
#[utoipa::path(
    post,
    path = "/api/v1/addresses",
    request_body = AddressInput,
    responses(
        (status = 201, description = "Address created", body = crate::entities::CustomerAddressModel)
    ),
    security(("Bearer" = [])),
    tag = "Addresses"
)]
pub async fn create_address(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<AddressInput>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    let address = state.services.addresses.create(customer.id, payload).await?;
    Ok(created_response(address))
}

/// Update an owned address
#[utoipa::path(
    put,
    path = "/api/v1/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = AddressInput,
    responses(
        (status = 200, description = "Address updated", body = crate::entities::CustomerAddressModel),
        (status = 403, description = "Address owned by another customer", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Addresses"
)]
pub async fn update_address(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddressInput>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    let address = state
        .services
        .addresses
        .update(customer.id, id, payload)
        .await?;
    Ok(success_response(address))
}

/// Delete an owned address
#[utoipa::path(
    delete,
    path = "/api/v1/addresses/{id}",
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 204, description = "Address deleted"),
        (status = 403, description = "Address owned by another customer", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Addresses"
)]
pub async fn delete_address(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    state.services.addresses.delete(customer.id, id).await?;
    Ok(no_content_response())
}
