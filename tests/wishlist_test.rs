mod common;

use common::{ItemSeed, TestApp};
use rust_decimal_macros::dec;

#[tokio::test]
async fn wishlist_add_is_idempotent_and_listing_carries_stock() {
    let app = TestApp::new().await;
    let (_, email) = app.seed_customer_with_user("wish@example.com").await;
    let wishlist = &app.state.services.wishlist;

    app.seed_item(ItemSeed::stock_item("WISH-1", dec!(30))).await;
    app.seed_bin("WISH-1", "Stores", 4.0).await;
    app.seed_item(ItemSeed::stock_item("WISH-2", dec!(60))).await;

    wishlist.add(&email, "WISH-1").await.expect("add");
    wishlist.add(&email, "WISH-1").await.expect("add again");
    wishlist.add(&email, "WISH-2").await.expect("add");

    let listed = wishlist.list(&email, 1, 10).await.expect("list");
    assert_eq!(listed.len(), 2);

    let stocked = listed
        .iter()
        .find(|i| i.item_code == "WISH-1")
        .expect("WISH-1 listed");
    assert!(stocked.in_stock);
    assert_eq!(stocked.stock_qty, 4.0);

    wishlist.remove(&email, "WISH-1").await.expect("remove");
    let after = wishlist.list(&email, 1, 10).await.expect("list");
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].item_code, "WISH-2");
}

/// Suppressed items disappear from wishlists too; the listing reuses the
/// catalog assembly pipeline.
#[tokio::test]
async fn suppressed_items_drop_out_of_the_wishlist() {
    let app = TestApp::new().await;
    let (_, email) = app.seed_customer_with_user("gone@example.com").await;

    app.seed_item(ItemSeed {
        discontinued: true,
        ..ItemSeed::stock_item("GONE", dec!(15))
    })
    .await;
    app.state
        .services
        .wishlist
        .add(&email, "GONE")
        .await
        .expect("add");

    let listed = app
        .state
        .services
        .wishlist
        .list(&email, 1, 10)
        .await
        .expect("list");
    assert!(listed.is_empty());
}
