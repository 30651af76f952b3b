//! Storefront API Library
//!
//! Catalog browsing with stock visibility, cart-to-order conversion, and
//! customer self-service on top of an ERP-style document store.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod google;
pub mod handlers;
pub mod migrator;
pub mod openapi;
pub mod services;

use axum::extract::FromRef;
use axum::{routing::get, Json, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub auth: Arc<auth::AuthService>,
    pub services: handlers::AppServices,
}

impl FromRef<AppState> for Arc<auth::AuthService> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}

/// The versioned API surface.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", handlers::catalog::catalog_routes())
        .nest("/cart", handlers::cart::cart_routes())
        .nest("/addresses", handlers::addresses::address_routes())
        .nest("/wishlist", handlers::wishlist::wishlist_routes())
        .nest("/account", handlers::account::account_routes())
        .nest("/admin", handlers::admin::admin_routes())
}

/// Liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Root router without middleware layers; `main` wraps it with tracing,
/// compression and CORS.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "storefront-api up" }))
        .route("/health", get(health))
        .nest("/api/v1", api_v1_routes())
        .nest("/auth", auth::auth_routes())
        .merge(openapi::swagger_ui())
}
