pub mod account;
pub mod addresses;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod common;
pub mod wishlist;

use crate::{
    config::AppConfig,
    events::EventSender,
    google::BackupService,
    services::{
        orders::StandardTotals, AddressService, CartService, CatalogService, CustomerService,
        NewsletterService, OrderConversionService, PasswordResetService, PublishingService,
        RegistrationService, StockService, WishlistService,
    },
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Service aggregate shared by the HTTP handlers through `AppState`.
#[derive(Clone)]
pub struct AppServices {
    pub stock: Arc<StockService>,
    pub catalog: Arc<CatalogService>,
    pub customers: Arc<CustomerService>,
    pub cart: Arc<CartService>,
    pub orders: Arc<OrderConversionService>,
    pub addresses: Arc<AddressService>,
    pub wishlist: Arc<WishlistService>,
    pub newsletter: Arc<NewsletterService>,
    pub registration: Arc<RegistrationService>,
    pub password_reset: Arc<PasswordResetService>,
    pub publishing: Arc<PublishingService>,
    pub backup: Arc<BackupService>,
}

impl AppServices {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        config: &AppConfig,
    ) -> Self {
        let stock = Arc::new(StockService::new(db.clone()));
        let catalog = Arc::new(CatalogService::new(db.clone(), stock.clone()));
        let totals = Arc::new(StandardTotals::new(
            Decimal::from_f64_retain(config.default_tax_rate).unwrap_or(Decimal::ZERO),
        ));

        Self {
            customers: Arc::new(CustomerService::new(db.clone())),
            cart: Arc::new(CartService::new(
                db.clone(),
                event_sender.clone(),
                config.delivery_lead_days,
            )),
            orders: Arc::new(OrderConversionService::new(
                db.clone(),
                event_sender.clone(),
                stock.clone(),
                totals,
                config.fallback_warehouse.clone(),
            )),
            addresses: Arc::new(AddressService::new(db.clone())),
            wishlist: Arc::new(WishlistService::new(db.clone(), catalog.clone())),
            newsletter: Arc::new(NewsletterService::new(
                db.clone(),
                event_sender.clone(),
                config.newsletter_enabled,
                config.newsletter_group.clone(),
            )),
            registration: Arc::new(RegistrationService::new(
                db.clone(),
                event_sender.clone(),
                config.default_customer_group.clone(),
                config.default_territory.clone(),
            )),
            password_reset: Arc::new(PasswordResetService::new(
                db.clone(),
                event_sender.clone(),
            )),
            publishing: Arc::new(PublishingService::new(
                db.clone(),
                event_sender.clone(),
                stock.clone(),
            )),
            backup: Arc::new(BackupService::new(
                db,
                event_sender,
                config.backup_dir.clone(),
            )),
            stock,
            catalog,
        }
    }
}
