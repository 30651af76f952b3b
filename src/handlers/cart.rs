use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::success_response,
    services::cart::CartLineInput,
    AppState,
};
use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Cart and order placement routes; every one requires a session.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync_cart))
        .route("/current", get(get_current_quotation))
        .route("/place-order", post(place_order))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SyncCartRequest {
    #[serde(default)]
    pub items: Vec<CartLineInput>,
}

/// Replace the caller's draft web order with the given cart lines
#[utoipa::path(
    post,
    path = "/api/v1/cart/sync",
    request_body = SyncCartRequest,
    responses(
        (status = 200, description = "Draft order upserted", body = crate::services::cart::CartSyncResult),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse),
        (status = 404, description = "No customer linked to the session user", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Cart"
)]
pub async fn sync_cart(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<SyncCartRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    let result = state
        .services
        .cart
        .sync_cart_to_quotation(customer.id, payload.items)
        .await?;
    Ok(success_response(result))
}

/// The caller's current draft web order, or null
#[utoipa::path(
    get,
    path = "/api/v1/cart/current",
    responses(
        (status = 200, description = "Draft order snapshot, or null when there is none", body = crate::services::cart::QuotationSnapshot),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Cart"
)]
pub async fn get_current_quotation(
    user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    // Users without a linked customer have no cart; that is a null, not an
    // error.
    let Some(customer) = state.services.customers.try_resolve(&user.email).await? else {
        return Ok(success_response(serde_json::Value::Null));
    };
    let snapshot = state
        .services
        .cart
        .get_current_quotation(customer.id)
        .await?;
    Ok(success_response(snapshot))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PlaceOrderRequest {
    pub quotation_id: Uuid,
    pub address_id: Option<Uuid>,
}

/// Convert the draft order into a sales order and invoice
#[utoipa::path(
    post,
    path = "/api/v1/cart/place-order",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Conversion committed", body = crate::services::orders::PlaceOrderResult),
        (status = 400, description = "Order not in draft state", body = crate::errors::ErrorResponse),
        (status = 403, description = "Order or address owned by another customer", body = crate::errors::ErrorResponse),
        (status = 422, description = "Conversion failed and was rolled back", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Cart"
)]
pub async fn place_order(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<PlaceOrderRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let customer = state.services.customers.resolve_for_user(&user.email).await?;
    let result = state
        .services
        .orders
        .place_order(customer.id, payload.quotation_id, payload.address_id)
        .await?;
    Ok(success_response(result))
}
