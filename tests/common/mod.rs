#![allow(dead_code)]

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, Set};
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use storefront_api::{
    auth::{hash_password, AuthService},
    config::AppConfig,
    entities::{
        catalog_item, customer, home_section, portal_user, user_account, warehouse, warehouse_bin,
        work_order, WorkOrderStatus,
    },
    events::{self, EventSender},
    handlers::AppServices,
    migrator::Migrator,
    AppState,
};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Harness wiring a fresh application state to a temporary SQLite database.
pub struct TestApp {
    pub state: AppState,
    _event_task: tokio::task::JoinHandle<()>,
    _db_dir: tempfile::TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create temp dir");
        let db_path = db_dir.path().join("storefront_test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());

        let mut options = ConnectOptions::new(url);
        options.max_connections(5).sqlx_logging(false);
        let db = Arc::new(Database::connect(options).await.expect("connect sqlite"));
        Migrator::up(&*db, None).await.expect("run migrations");

        let cfg = test_config();

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let auth = Arc::new(AuthService::new(
            db.clone(),
            cfg.jwt_secret.clone(),
            cfg.jwt_expiration,
        ));
        let services = AppServices::new(db.clone(), Arc::new(event_sender.clone()), &cfg);

        let state = AppState {
            db,
            config: cfg,
            event_sender,
            auth,
            services,
        };

        Self {
            state,
            _event_task: event_task,
            _db_dir: db_dir,
        }
    }

    /// Full application router bound to this app's state.
    pub fn router(&self) -> axum::Router {
        storefront_api::app_router().with_state(self.state.clone())
    }

    /// Bearer token for a seeded user.
    pub fn token_for(&self, email: &str) -> String {
        self.state.auth.issue_token(email).expect("issue token")
    }

    /// A user account plus linked customer; returns (customer_id, email).
    pub async fn seed_customer_with_user(&self, email: &str) -> (Uuid, String) {
        let user = user_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            username: Set(None),
            first_name: Set("Test".to_string()),
            last_name: Set(Some("User".to_string())),
            phone: Set(Some("5550100".to_string())),
            password_hash: Set(hash_password("test-password-123").expect("hash")),
            enabled: Set(true),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        user.insert(&*self.state.db).await.expect("insert user");

        let customer_id = Uuid::new_v4();
        let customer = customer::ActiveModel {
            id: Set(customer_id),
            customer_name: Set(format!("Customer for {}", email)),
            customer_type: Set("Company".to_string()),
            email: Set(Some(email.to_string())),
            phone: Set(None),
            tax_id: Set(None),
            customer_group: Set("All Customer Groups".to_string()),
            territory: Set("All Territories".to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        customer.insert(&*self.state.db).await.expect("insert customer");

        let link = portal_user::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            user_email: Set(email.to_string()),
        };
        link.insert(&*self.state.db).await.expect("insert portal link");

        (customer_id, email.to_string())
    }

    pub async fn seed_item(&self, seed: ItemSeed<'_>) {
        let item = catalog_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_code: Set(seed.item_code.to_string()),
            item_name: Set(format!("{} name", seed.item_code)),
            description: Set(None),
            item_group: Set(seed.item_group.map(str::to_string)),
            brand: Set(None),
            route: Set(None),
            image: Set(None),
            website_warehouse: Set(None),
            is_stock_item: Set(seed.is_stock_item),
            discontinued: Set(seed.discontinued),
            published: Set(seed.published),
            section: Set(seed.section.map(str::to_string)),
            section_order: Set(seed.section_order),
            price_list_rate: Set(seed.price),
            ranking: Set(0),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        item.insert(&*self.state.db).await.expect("insert item");
    }

    pub async fn seed_warehouse(&self, name: &str, is_group: bool) {
        let wh = warehouse::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            is_group: Set(is_group),
            disabled: Set(false),
        };
        wh.insert(&*self.state.db).await.expect("insert warehouse");
    }

    pub async fn seed_bin(&self, item_code: &str, warehouse: &str, qty: f64) {
        let bin = warehouse_bin::ActiveModel {
            id: Set(Uuid::new_v4()),
            item_code: Set(item_code.to_string()),
            warehouse: Set(warehouse.to_string()),
            actual_qty: Set(qty),
        };
        bin.insert(&*self.state.db).await.expect("insert bin");
    }

    pub async fn seed_work_order(&self, item_code: &str, status: WorkOrderStatus, docstatus: i16) {
        let id = Uuid::new_v4();
        let wo = work_order::ActiveModel {
            id: Set(id),
            work_order_number: Set(format!("WO-{}", id.to_string()[..8].to_uppercase())),
            production_item: Set(item_code.to_string()),
            qty_to_manufacture: Set(Decimal::from(10)),
            status: Set(status),
            docstatus: Set(docstatus),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        wo.insert(&*self.state.db).await.expect("insert work order");
    }

    pub async fn seed_home_section(&self, name: &str, sort_order: i32, is_active: bool) {
        let section = home_section::ActiveModel {
            id: Set(Uuid::new_v4()),
            section_name: Set(name.to_string()),
            is_active: Set(is_active),
            sort_order: Set(sort_order),
        };
        section.insert(&*self.state.db).await.expect("insert section");
    }
}

/// Seed descriptor for one catalog item.
pub struct ItemSeed<'a> {
    pub item_code: &'a str,
    pub price: Decimal,
    pub is_stock_item: bool,
    pub discontinued: bool,
    pub published: bool,
    pub item_group: Option<&'a str>,
    pub section: Option<&'a str>,
    pub section_order: Option<i32>,
}

impl<'a> ItemSeed<'a> {
    /// A plain published stock item at the given price.
    pub fn stock_item(item_code: &'a str, price: Decimal) -> Self {
        Self {
            item_code,
            price,
            is_stock_item: true,
            discontinued: false,
            published: true,
            item_group: None,
            section: None,
            section_order: None,
        }
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        database_url: "unused-in-tests".to_string(),
        jwt_secret: "test-secret-not-for-production".to_string(),
        jwt_expiration: 3600,
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: "test".to_string(),
        log_level: "warn".to_string(),
        log_json: false,
        auto_migrate: false,
        cors_allowed_origins: None,
        cors_allow_any_origin: false,
        db_max_connections: 5,
        db_min_connections: 1,
        db_connect_timeout_secs: 5,
        default_tax_rate: 0.0,
        delivery_lead_days: 7,
        fallback_warehouse: "Stores".to_string(),
        default_customer_group: "All Customer Groups".to_string(),
        default_territory: "All Territories".to_string(),
        newsletter_enabled: true,
        newsletter_group: Some("Website Subscribers".to_string()),
        backup_dir: "backups".to_string(),
        unpublish_sweep_interval_secs: 0,
    }
}
