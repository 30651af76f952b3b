mod common;

use chrono::{Duration, Utc};
use common::{ItemSeed, TestApp};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, Set};
use storefront_api::{
    entities::product_review,
    errors::ServiceError,
    services::stock::StockStatus,
};
use uuid::Uuid;

async fn seed_review(app: &TestApp, item_code: &str, rating: i32, age_minutes: i64) {
    let review = product_review::ActiveModel {
        id: Set(Uuid::new_v4()),
        item_code: Set(item_code.to_string()),
        reviewer: Set(format!("Reviewer {}", rating)),
        reviewer_email: Set(None),
        rating: Set(rating),
        review: Set(Some(format!("{} stars", rating))),
        created_at: Set(Utc::now() - Duration::minutes(age_minutes)),
    };
    review.insert(&*app.state.db).await.expect("insert review");
}

#[tokio::test]
async fn product_info_merges_stock_reviews_and_wishlist() {
    let app = TestApp::new().await;
    let (_, email) = app.seed_customer_with_user("viewer@example.com").await;

    app.seed_item(ItemSeed::stock_item("INFO-1", dec!(120))).await;
    app.seed_bin("INFO-1", "Stores", 7.0).await;
    seed_review(&app, "INFO-1", 5, 10).await;
    seed_review(&app, "INFO-1", 3, 5).await;

    app.state
        .services
        .wishlist
        .add(&email, "INFO-1")
        .await
        .expect("wish");

    let info = app
        .state
        .services
        .catalog
        .get_product_info("INFO-1", Some(&email))
        .await
        .expect("info");

    assert_eq!(info.stock_status, StockStatus::InStock);
    assert_eq!(info.stock_qty, 7.0);
    assert_eq!(info.review_count, 2);
    assert_eq!(info.avg_rating, Some(4.0));
    assert!(info.wished);

    // Anonymous viewers see the same data without the wishlist flag.
    let anonymous = app
        .state
        .services
        .catalog
        .get_product_info("INFO-1", None)
        .await
        .expect("info");
    assert!(!anonymous.wished);
}

#[tokio::test]
async fn reviews_come_back_newest_first() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed::stock_item("REV-1", dec!(10))).await;
    seed_review(&app, "REV-1", 2, 30).await;
    seed_review(&app, "REV-1", 5, 1).await;
    seed_review(&app, "REV-1", 4, 15).await;

    let reviews = app
        .state
        .services
        .catalog
        .get_product_reviews("REV-1")
        .await
        .expect("reviews");

    let ratings: Vec<i32> = reviews.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![5, 4, 2]);
}

#[tokio::test]
async fn unpublished_items_read_as_not_found() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed {
        published: false,
        ..ItemSeed::stock_item("SECRET", dec!(10))
    })
    .await;

    let err = app
        .state
        .services
        .catalog
        .get_product_info("SECRET", None)
        .await
        .expect_err("must be hidden");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn stock_endpoint_scopes_to_a_warehouse_when_asked() {
    let app = TestApp::new().await;
    app.seed_item(ItemSeed::stock_item("SCOPED", dec!(10))).await;
    app.seed_bin("SCOPED", "WH-A", 4.0).await;
    app.seed_bin("SCOPED", "WH-B", 6.0).await;

    let stock = &app.state.services.stock;

    let all = stock.item_stock("SCOPED", None).await.expect("stock");
    assert_eq!(all.stock_qty, 10.0);
    assert!(all.in_stock);
    assert!(all.is_stock_item);

    let scoped = stock.item_stock("SCOPED", Some("WH-A")).await.expect("stock");
    assert_eq!(scoped.stock_qty, 4.0);

    let err = stock
        .item_stock("MISSING", None)
        .await
        .expect_err("unknown item");
    assert!(matches!(err, ServiceError::NotFound(_)));
}
