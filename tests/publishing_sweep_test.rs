mod common;

use common::{ItemSeed, TestApp};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use storefront_api::entities::{catalog_item, CatalogItem, WorkOrderStatus};

async fn published_flag(app: &TestApp, item_code: &str) -> bool {
    CatalogItem::find()
        .filter(catalog_item::Column::ItemCode.eq(item_code))
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("item exists")
        .published
}

#[tokio::test]
async fn sweep_hides_dead_items_and_restores_live_ones() {
    let app = TestApp::new().await;

    // Discontinued, no stock, no work order: must be hidden.
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("DEAD", dec!(10))
    })
    .await;

    // Discontinued but still stocked: must stay visible.
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("STOCKED", dec!(10))
    })
    .await;
    app.seed_bin("STOCKED", "Stores", 3.0).await;

    // Discontinued, empty, but in production: must stay visible.
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("PRODUCING", dec!(10))
    })
    .await;
    app.seed_work_order("PRODUCING", WorkOrderStatus::InProcess, 1)
        .await;

    // Previously hidden but restocked: must be republished.
    app.seed_item(ItemSeed {
        discontinued: true,
        published: false,
        ..ItemSeed::stock_item("RESTOCKED", dec!(10))
    })
    .await;
    app.seed_bin("RESTOCKED", "Stores", 1.0).await;

    // Live item: the sweep must not touch non-discontinued rows.
    app.seed_item(ItemSeed::stock_item("LIVE", dec!(10))).await;

    let outcome = app
        .state
        .services
        .publishing
        .sweep_discontinued()
        .await
        .expect("sweep");

    assert_eq!(outcome.scanned, 4);
    assert_eq!(outcome.unpublished, 1);
    assert_eq!(outcome.republished, 1);

    assert!(!published_flag(&app, "DEAD").await);
    assert!(published_flag(&app, "STOCKED").await);
    assert!(published_flag(&app, "PRODUCING").await);
    assert!(published_flag(&app, "RESTOCKED").await);
    assert!(published_flag(&app, "LIVE").await);
}

/// Running the sweep again over unchanged data writes nothing.
#[tokio::test]
async fn sweep_is_idempotent() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("DEAD", dec!(10))
    })
    .await;

    let first = app
        .state
        .services
        .publishing
        .sweep_discontinued()
        .await
        .expect("sweep");
    assert_eq!(first.unpublished, 1);

    let second = app
        .state
        .services
        .publishing
        .sweep_discontinued()
        .await
        .expect("sweep");
    assert_eq!(second.unpublished, 0);
    assert_eq!(second.republished, 0);
    assert!(!published_flag(&app, "DEAD").await);
}
