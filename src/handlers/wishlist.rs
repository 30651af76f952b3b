use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::common::{no_content_response, success_response, PaginationParams},
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

pub fn wishlist_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist))
        .route("/items", post(add_to_wishlist))
        .route("/items/:item_code", delete(remove_from_wishlist))
}

/// Paginated wishlist with live stock data, newest first
#[utoipa::path(
    get,
    path = "/api/v1/wishlist",
    params(PaginationParams),
    responses(
        (status = 200, description = "Wishlist products", body = [crate::services::catalog::ProductSummary]),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Wishlist"
)]
pub async fn get_wishlist(
    user: AuthUser,
    State(state): State<AppState>,
    Query(paging): Query<PaginationParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let items = state
        .services
        .wishlist
        .list(&user.email, paging.page, paging.per_page)
        .await?;
    Ok(success_response(items))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WishlistAddRequest {
    pub item_code: String,
}

/// Add an item to the caller's wishlist (idempotent)
#[utoipa::path(
    post,
    path = "/api/v1/wishlist/items",
    request_body = WishlistAddRequest,
    responses(
        (status = 204, description = "Item added"),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Wishlist"
)]
pub async fn add_to_wishlist(
    user: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<WishlistAddRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .wishlist
        .add(&user.email, &payload.item_code)
        .await?;
    Ok(no_content_response())
}

/// Remove an item from the caller's wishlist
#[utoipa::path(
    delete,
    path = "/api/v1/wishlist/items/{item_code}",
    params(("item_code" = String, Path, description = "Catalog item code")),
    responses(
        (status = 204, description = "Item removed"),
        (status = 401, description = "No session", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Wishlist"
)]
pub async fn remove_from_wishlist(
    user: AuthUser,
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state.services.wishlist.remove(&user.email, &item_code).await?;
    Ok(no_content_response())
}
