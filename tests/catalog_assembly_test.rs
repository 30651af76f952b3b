mod common;

use async_trait::async_trait;
use common::{ItemSeed, TestApp};
use rust_decimal_macros::dec;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_api::{
    entities::WorkOrderStatus,
    errors::ServiceError,
    services::{
        catalog::{CatalogService, ProductQuery},
        stock::{StockLookup, StockStatus},
    },
};

/// Decorator counting how many batched lookups the assembly issues.
struct CountingStockLookup {
    inner: Arc<dyn StockLookup>,
    quantity_calls: AtomicUsize,
    work_order_calls: AtomicUsize,
}

impl CountingStockLookup {
    fn new(inner: Arc<dyn StockLookup>) -> Self {
        Self {
            inner,
            quantity_calls: AtomicUsize::new(0),
            work_order_calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl StockLookup for CountingStockLookup {
    async fn quantities(&self, item_codes: &[String]) -> Result<HashMap<String, f64>, ServiceError> {
        self.quantity_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.quantities(item_codes).await
    }

    async fn items_with_active_work_orders(
        &self,
        item_codes: &[String],
    ) -> Result<HashSet<String>, ServiceError> {
        self.work_order_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.items_with_active_work_orders(item_codes).await
    }

    async fn best_stocked_warehouse(&self, item_code: &str) -> Result<Option<String>, ServiceError> {
        self.inner.best_stocked_warehouse(item_code).await
    }

    async fn first_non_group_warehouse(&self) -> Result<Option<String>, ServiceError> {
        self.inner.first_non_group_warehouse().await
    }
}

#[tokio::test]
async fn one_batched_lookup_each_regardless_of_page_size() {
    let app = TestApp::new().await;
    app.seed_warehouse("Stores", false).await;
    for i in 0..8 {
        let code = format!("BATCH-{}", i);
        app.seed_item(ItemSeed::stock_item(&code, dec!(10))).await;
        app.seed_bin(&code, "Stores", 2.0).await;
    }
    app.seed_work_order("BATCH-3", WorkOrderStatus::InProcess, 1)
        .await;

    let counting = Arc::new(CountingStockLookup::new(app.state.services.stock.clone()));
    let catalog = CatalogService::new(app.state.db.clone(), counting.clone());

    let items = catalog
        .get_products_with_stock(&ProductQuery::default())
        .await
        .expect("assemble");

    assert_eq!(items.len(), 8);
    assert_eq!(counting.quantity_calls.load(Ordering::SeqCst), 1);
    assert_eq!(counting.work_order_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn price_window_bounds_are_inclusive() {
    let app = TestApp::new().await;
    for (code, price) in [
        ("PRICE-LOW", dec!(99.99)),
        ("PRICE-MIN", dec!(100)),
        ("PRICE-MID", dec!(150)),
        ("PRICE-MAX", dec!(200)),
        ("PRICE-HIGH", dec!(200.01)),
    ] {
        app.seed_item(ItemSeed::stock_item(code, price)).await;
        app.seed_bin(code, "Stores", 5.0).await;
    }

    let query = ProductQuery {
        price_min: Some(dec!(100)),
        price_max: Some(dec!(200)),
        ..ProductQuery::default()
    };
    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&query)
        .await
        .expect("assemble");

    let codes: Vec<&str> = items.iter().map(|i| i.item_code.as_str()).collect();
    assert_eq!(codes, vec!["PRICE-MAX", "PRICE-MID", "PRICE-MIN"]);
}

/// The end-to-end scenario: a stocked item inside the price window stays in
/// with status In Stock; a discontinued, empty, production-less one is
/// dropped entirely, price window notwithstanding.
#[tokio::test]
async fn visibility_suppression_beats_price_filter() {
    let app = TestApp::new().await;

    app.seed_item(ItemSeed::stock_item("ITEM-A", dec!(150))).await;
    app.seed_bin("ITEM-A", "Stores", 5.0).await;

    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("ITEM-B", dec!(150))
    })
    .await;

    let query = ProductQuery {
        price_min: Some(dec!(100)),
        price_max: Some(dec!(200)),
        ..ProductQuery::default()
    };
    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&query)
        .await
        .expect("assemble");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_code, "ITEM-A");
    assert_eq!(items[0].stock_status, StockStatus::InStock);
    assert!(items[0].in_stock);
}

/// A discontinued item with an active work order survives suppression and
/// reads as In Process.
#[tokio::test]
async fn discontinued_item_in_production_stays_listed() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("WO-ITEM", dec!(80))
    })
    .await;
    app.seed_work_order("WO-ITEM", WorkOrderStatus::NotStarted, 1)
        .await;

    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&ProductQuery::default())
        .await
        .expect("assemble");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].stock_status, StockStatus::InProcess);
}

/// Completed or cancelled work orders do not rescue a discontinued item.
#[tokio::test]
async fn finished_work_orders_do_not_count_as_active() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("DONE-ITEM", dec!(80))
    })
    .await;
    app.seed_work_order("DONE-ITEM", WorkOrderStatus::Completed, 1)
        .await;
    app.seed_work_order("DONE-ITEM", WorkOrderStatus::Cancelled, 2)
        .await;

    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&ProductQuery::default())
        .await
        .expect("assemble");

    assert!(items.is_empty());
}

/// No stock record defaults to quantity zero; an untracked item is still
/// always available.
#[tokio::test]
async fn missing_stock_records_use_the_defaults() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        is_stock_item: false,
        ..ItemSeed::stock_item("SERVICE-ITEM", dec!(40))
    })
    .await;
    app.seed_item(ItemSeed::stock_item("EMPTY-ITEM", dec!(40)))
        .await;

    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&ProductQuery::default())
        .await
        .expect("assemble");

    let by_code: HashMap<&str, StockStatus> = items
        .iter()
        .map(|i| (i.item_code.as_str(), i.stock_status))
        .collect();
    assert_eq!(by_code["SERVICE-ITEM"], StockStatus::InStock);
    assert_eq!(by_code["EMPTY-ITEM"], StockStatus::OutOfStock);
}

#[tokio::test]
async fn home_sections_group_and_order_products() {
    let app = TestApp::new().await;
    app.seed_home_section("Deals", 2, true).await;
    app.seed_home_section("Hero", 1, true).await;
    app.seed_home_section("Hidden", 3, false).await;

    for (code, section, order) in [
        ("HOME-1", "Hero", Some(2)),
        ("HOME-2", "Hero", Some(1)),
        ("HOME-3", "Deals", None),
        ("HOME-4", "Hidden", Some(1)),
    ] {
        app.seed_item(ItemSeed {
            section: Some(section),
            section_order: order,
            ..ItemSeed::stock_item(code, dec!(25))
        })
        .await;
        app.seed_bin(code, "Stores", 1.0).await;
    }

    let sections = app
        .state
        .services
        .catalog
        .get_products_by_section()
        .await
        .expect("sections");

    assert_eq!(sections.len(), 2);
    assert_eq!(sections[0].section, "Hero");
    let hero_codes: Vec<&str> = sections[0]
        .items
        .iter()
        .map(|i| i.item_code.as_str())
        .collect();
    assert_eq!(hero_codes, vec!["HOME-2", "HOME-1"]);
    assert_eq!(sections[1].section, "Deals");
    assert_eq!(sections[1].items.len(), 1);
}

#[tokio::test]
async fn unpublished_items_never_reach_the_page() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        published: false,
        ..ItemSeed::stock_item("UNPUB", dec!(10))
    })
    .await;

    let items = app
        .state
        .services
        .catalog
        .get_products_with_stock(&ProductQuery::default())
        .await
        .expect("assemble");
    assert!(items.is_empty());
}
