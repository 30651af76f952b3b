use crate::{
    auth::MaybeAuthUser,
    errors::ApiError,
    handlers::common::success_response,
    services::catalog::ProductQuery,
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

/// Routes for catalog browsing. All of them allow guests.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/filters", get(get_product_filters))
        .route("/stock/:item_code", get(get_stock))
        .route("/products", post(get_products_with_stock))
        .route("/products/:item_code", get(get_product_info))
        .route("/products/:item_code/reviews", get(get_product_reviews))
        .route("/home-sections", get(get_products_by_section))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FiltersParams {
    pub item_group: Option<String>,
}

/// Available field/attribute filters and sub-categories
#[utoipa::path(
    get,
    path = "/api/v1/catalog/filters",
    params(FiltersParams),
    responses(
        (status = 200, description = "Filter values", body = crate::services::catalog::ProductFilters)
    ),
    tag = "Catalog"
)]
pub async fn get_product_filters(
    State(state): State<AppState>,
    Query(params): Query<FiltersParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let item_group = params
        .item_group
        .as_deref()
        .filter(|g| !g.trim().is_empty());
    let filters = state
        .services
        .catalog
        .get_product_filters(item_group)
        .await?;
    Ok(success_response(filters))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct StockParams {
    pub warehouse: Option<String>,
}

/// Stock figures for one item
#[utoipa::path(
    get,
    path = "/api/v1/catalog/stock/{item_code}",
    params(
        ("item_code" = String, Path, description = "Catalog item code"),
        StockParams
    ),
    responses(
        (status = 200, description = "Stock figures", body = crate::services::stock::ItemStock),
        (status = 404, description = "Unknown item", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
    Query(params): Query<StockParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let stock = state
        .services
        .stock
        .item_stock(&item_code, params.warehouse.as_deref())
        .await?;
    Ok(success_response(stock))
}

/// Filtered product page with merged stock status
#[utoipa::path(
    post,
    path = "/api/v1/catalog/products",
    request_body = ProductQuery,
    responses(
        (status = 200, description = "Product list", body = [crate::services::catalog::ProductSummary])
    ),
    tag = "Catalog"
)]
pub async fn get_products_with_stock(
    State(state): State<AppState>,
    Json(query): Json<ProductQuery>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let items = state.services.catalog.get_products_with_stock(&query).await?;
    Ok(success_response(serde_json::json!({ "items": items })))
}

/// Full product detail; personalizes the wishlist flag when authenticated
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products/{item_code}",
    params(("item_code" = String, Path, description = "Catalog item code")),
    responses(
        (status = 200, description = "Product detail", body = crate::services::catalog::ProductInfo),
        (status = 404, description = "Unknown or unpublished item", body = crate::errors::ErrorResponse)
    ),
    tag = "Catalog"
)]
pub async fn get_product_info(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let info = state
        .services
        .catalog
        .get_product_info(&item_code, viewer.as_ref().map(|u| u.email.as_str()))
        .await?;
    Ok(success_response(info))
}

/// Reviews for an item, newest first
#[utoipa::path(
    get,
    path = "/api/v1/catalog/products/{item_code}/reviews",
    params(("item_code" = String, Path, description = "Catalog item code")),
    responses(
        (status = 200, description = "Review list", body = [crate::services::catalog::ReviewView])
    ),
    tag = "Catalog"
)]
pub async fn get_product_reviews(
    State(state): State<AppState>,
    Path(item_code): Path<String>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let reviews = state.services.catalog.get_product_reviews(&item_code).await?;
    Ok(success_response(reviews))
}

/// Products grouped into active home page sections
#[utoipa::path(
    get,
    path = "/api/v1/catalog/home-sections",
    responses(
        (status = 200, description = "Sections with ordered products", body = [crate::services::catalog::SectionProducts])
    ),
    tag = "Catalog"
)]
pub async fn get_products_by_section(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let sections = state.services.catalog.get_products_by_section().await?;
    Ok(success_response(sections))
}
