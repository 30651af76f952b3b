mod common;

use common::TestApp;
use rust_decimal_macros::dec;
use sea_orm::{EntityTrait, PaginatorTrait};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use storefront_api::{
    entities::{DraftOrder, SalesInvoice, SalesOrder, SalesOrderLine},
    errors::ServiceError,
    services::{
        cart::CartLineInput,
        orders::{DocTotals, LineTotals, OrderConversionService, StandardTotals, TotalsHook},
    },
};
use uuid::Uuid;

fn line(item_code: &str, qty: rust_decimal::Decimal, rate: rust_decimal::Decimal) -> CartLineInput {
    serde_json::from_value(serde_json::json!({
        "item_code": item_code,
        "qty": qty,
        "rate": rate,
    }))
    .expect("build line")
}

/// Totals hook that fails on the Nth recompute call. The invoice recompute
/// is the second call, after the sales order already exists in the
/// transaction.
struct FailingTotals {
    fail_on_call: usize,
    calls: AtomicUsize,
}

impl FailingTotals {
    fn new(fail_on_call: usize) -> Self {
        Self {
            fail_on_call,
            calls: AtomicUsize::new(0),
        }
    }
}

impl TotalsHook for FailingTotals {
    fn recompute(&self, lines: &[LineTotals]) -> Result<DocTotals, ServiceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call >= self.fail_on_call {
            return Err(ServiceError::InternalError(
                "tax engine unavailable".to_string(),
            ));
        }
        StandardTotals::new(rust_decimal::Decimal::ZERO).recompute(lines)
    }
}

async fn seed_draft(app: &TestApp, customer_id: Uuid) -> Uuid {
    app.state
        .services
        .cart
        .sync_cart_to_quotation(
            customer_id,
            vec![
                line("ITEM-1", dec!(2), dec!(100)),
                line("ITEM-2", dec!(1), dec!(50)),
            ],
        )
        .await
        .expect("sync cart")
        .quotation_id
}

#[tokio::test]
async fn conversion_produces_sales_order_and_invoice() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("buyer@example.com").await;
    app.seed_warehouse("WH-A", false).await;
    app.seed_warehouse("WH-B", false).await;
    app.seed_bin("ITEM-1", "WH-A", 10.0).await;
    app.seed_bin("ITEM-1", "WH-B", 50.0).await;

    let quotation_id = seed_draft(&app, customer_id).await;
    let result = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect("place order");

    assert_eq!(result.grand_total, dec!(250));

    let draft = DraftOrder::find_by_id(quotation_id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("draft exists");
    assert_eq!(draft.docstatus, 1);

    let so = SalesOrder::find_by_id(result.sales_order_id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("sales order exists");
    assert_eq!(so.grand_total, dec!(250));
    assert_eq!(so.total_qty, dec!(3));
    assert_eq!(so.draft_order_id, quotation_id);

    let invoice = SalesInvoice::find_by_id(result.sales_invoice_id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("invoice exists");
    assert!(invoice.update_stock);
    assert_eq!(invoice.sales_order_id, result.sales_order_id);

    // ITEM-1 ships from its best-stocked warehouse; ITEM-2 has no bins and
    // falls back to the first non-group warehouse.
    let lines = SalesOrderLine::find().all(&*app.state.db).await.expect("lines");
    let wh_for = |code: &str| {
        lines
            .iter()
            .find(|l| l.item_code == code)
            .map(|l| l.warehouse.clone())
            .expect("line present")
    };
    assert_eq!(wh_for("ITEM-1"), "WH-B");
    assert_eq!(wh_for("ITEM-2"), "WH-A");
}

#[tokio::test]
async fn conversion_without_warehouses_uses_the_configured_fallback() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("fallback@example.com").await;
    let quotation_id = seed_draft(&app, customer_id).await;

    let result = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect("place order");

    let lines = SalesOrderLine::find().all(&*app.state.db).await.expect("lines");
    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| l.warehouse == "Stores"));
    assert_eq!(result.grand_total, dec!(250));
}

#[tokio::test]
async fn failure_after_sales_order_rolls_everything_back() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("atomic@example.com").await;
    let quotation_id = seed_draft(&app, customer_id).await;

    // Fails on the second recompute: the sales order is already inserted,
    // the invoice is not yet.
    let orders = OrderConversionService::new(
        app.state.db.clone(),
        Arc::new(app.state.event_sender.clone()),
        app.state.services.stock.clone(),
        Arc::new(FailingTotals::new(2)),
        "Stores".to_string(),
    );

    let err = orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect_err("conversion must fail");
    assert!(matches!(err, ServiceError::ConversionFailed(_)));
    assert!(err.to_string().contains("tax engine unavailable"));

    // The draft is back in draft state and no partial documents survived.
    let draft = DraftOrder::find_by_id(quotation_id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("draft exists");
    assert_eq!(draft.docstatus, 0);

    let so_count = SalesOrder::find().count(&*app.state.db).await.expect("count");
    let invoice_count = SalesInvoice::find().count(&*app.state.db).await.expect("count");
    assert_eq!(so_count, 0);
    assert_eq!(invoice_count, 0);

    // The untouched draft converts cleanly on retry with a healthy hook.
    let retried = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect("retry succeeds");
    assert_eq!(retried.grand_total, dec!(250));
}

#[tokio::test]
async fn submitted_orders_cannot_be_placed_again() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("twice@example.com").await;
    let quotation_id = seed_draft(&app, customer_id).await;

    app.state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect("first placement");

    let err = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect_err("second placement must fail");
    assert!(matches!(err, ServiceError::InvalidStatus(_)));
}

#[tokio::test]
async fn another_customers_order_is_forbidden() {
    let app = TestApp::new().await;
    let (owner_id, _) = app.seed_customer_with_user("owner@example.com").await;
    let (intruder_id, _) = app.seed_customer_with_user("intruder@example.com").await;
    let quotation_id = seed_draft(&app, owner_id).await;

    let err = app
        .state
        .services
        .orders
        .place_order(intruder_id, quotation_id, None)
        .await
        .expect_err("must be forbidden");
    assert!(matches!(err, ServiceError::Forbidden(_)));

    // The owner's draft is untouched by the rejected attempt.
    let draft = DraftOrder::find_by_id(quotation_id)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("draft exists");
    assert_eq!(draft.docstatus, 0);
}

#[tokio::test]
async fn someone_elses_address_is_forbidden() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("addr-owner@example.com").await;
    let (other_id, _) = app.seed_customer_with_user("addr-other@example.com").await;
    let quotation_id = seed_draft(&app, customer_id).await;

    let foreign_address = app
        .state
        .services
        .addresses
        .create(
            other_id,
            serde_json::from_value(serde_json::json!({
                "address_title": "Office",
                "address_line1": "1 Elsewhere St",
                "city": "Nowhere",
                "country": "NL",
            }))
            .expect("address input"),
        )
        .await
        .expect("create address");

    let err = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, Some(foreign_address.id))
        .await
        .expect_err("must be forbidden");
    assert!(matches!(err, ServiceError::Forbidden(_)));
}

#[tokio::test]
async fn unknown_quotations_are_not_found() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("missing@example.com").await;

    let err = app
        .state
        .services
        .orders
        .place_order(customer_id, Uuid::new_v4(), None)
        .await
        .expect_err("must be not found");
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn empty_drafts_cannot_be_placed() {
    let app = TestApp::new().await;
    let (customer_id, _) = app.seed_customer_with_user("empty@example.com").await;

    let quotation_id = app
        .state
        .services
        .cart
        .sync_cart_to_quotation(customer_id, Vec::new())
        .await
        .expect("sync empty cart")
        .quotation_id;

    let err = app
        .state
        .services
        .orders
        .place_order(customer_id, quotation_id, None)
        .await
        .expect_err("empty draft must fail");
    assert!(matches!(err, ServiceError::InvalidStatus(_)));
}
