use crate::{
    entities::{
        docstatus, draft_order, draft_order_line, sales_invoice, sales_invoice_line, sales_order,
        sales_order_line, CustomerAddress, DraftOrder, DraftOrderLine, DraftOrderLineModel,
        DraftOrderModel,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::stock::StockLookup,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

const WEB_SOURCE: &str = "web";

/// Line figures fed to the totals recomputation hook.
#[derive(Debug, Clone)]
pub struct LineTotals {
    pub qty: Decimal,
    pub amount: Decimal,
}

/// Document-level totals produced by the recomputation hook.
#[derive(Debug, Clone)]
pub struct DocTotals {
    pub net_total: Decimal,
    pub tax_total: Decimal,
    pub grand_total: Decimal,
    pub total_qty: Decimal,
}

/// Standard totals/taxes recomputation collaborator. The conversion saga
/// calls it once per derived document; a failing hook must abort the whole
/// conversion.
pub trait TotalsHook: Send + Sync {
    fn recompute(&self, lines: &[LineTotals]) -> Result<DocTotals, ServiceError>;
}

/// Flat-rate tax recomputation used in production.
pub struct StandardTotals {
    tax_rate: Decimal,
}

impl StandardTotals {
    pub fn new(tax_rate: Decimal) -> Self {
        Self { tax_rate }
    }
}

impl TotalsHook for StandardTotals {
    fn recompute(&self, lines: &[LineTotals]) -> Result<DocTotals, ServiceError> {
        let net_total: Decimal = lines.iter().map(|l| l.amount).sum();
        let total_qty: Decimal = lines.iter().map(|l| l.qty).sum();
        let tax_total = net_total * self.tax_rate;
        Ok(DocTotals {
            net_total,
            tax_total,
            grand_total: net_total + tax_total,
            total_qty,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PlaceOrderResult {
    pub sales_order_id: Uuid,
    pub sales_order_number: String,
    pub sales_invoice_id: Uuid,
    pub sales_invoice_number: String,
    pub grand_total: Decimal,
}

/// Converts a customer's draft web order into a sales order plus invoice as
/// one all-or-nothing unit.
#[derive(Clone)]
pub struct OrderConversionService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    stock: Arc<dyn StockLookup>,
    totals: Arc<dyn TotalsHook>,
    fallback_warehouse: String,
}

impl OrderConversionService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        stock: Arc<dyn StockLookup>,
        totals: Arc<dyn TotalsHook>,
        fallback_warehouse: String,
    ) -> Self {
        Self {
            db,
            event_sender,
            stock,
            totals,
            fallback_warehouse,
        }
    }

    /// Convert the draft order into a sales order and invoice.
    ///
    /// Preconditions are checked without mutating anything: the order must
    /// exist, be a draft, be web-sourced, and belong to the calling customer;
    /// a supplied shipping address must belong to that customer too. The
    /// conversion itself runs in one transaction; any failure rolls back and
    /// leaves the draft order untouched in draft state.
    #[instrument(skip(self))]
    pub async fn place_order(
        &self,
        customer_id: Uuid,
        quotation_id: Uuid,
        address_id: Option<Uuid>,
    ) -> Result<PlaceOrderResult, ServiceError> {
        let order = DraftOrder::find_by_id(quotation_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Quotation {} not found", quotation_id))
            })?;

        if order.docstatus != docstatus::DRAFT {
            return Err(ServiceError::InvalidStatus(format!(
                "Quotation {} is not in draft state",
                order.order_number
            )));
        }
        if order.source != WEB_SOURCE {
            return Err(ServiceError::Forbidden(
                "Only web orders can be placed through the storefront".to_string(),
            ));
        }
        if order.customer_id != customer_id {
            return Err(ServiceError::Forbidden(
                "Quotation belongs to another customer".to_string(),
            ));
        }

        if let Some(address_id) = address_id {
            let address = CustomerAddress::find_by_id(address_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Address {} not found", address_id))
                })?;
            if address.customer_id != customer_id {
                return Err(ServiceError::Forbidden(
                    "Address belongs to another customer".to_string(),
                ));
            }
        }

        let lines = DraftOrderLine::find()
            .filter(draft_order_line::Column::DraftOrderId.eq(order.id))
            .order_by_asc(draft_order_line::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        if lines.is_empty() {
            return Err(ServiceError::InvalidStatus(format!(
                "Quotation {} has no items",
                order.order_number
            )));
        }

        // Warehouse resolution only reads; it happens before the transaction
        // opens.
        let resolved = self.resolve_warehouses(lines).await?;

        let txn = self.db.begin().await?;
        let result = self.convert(&txn, &order, &resolved, address_id).await;

        match result {
            Ok(placed) => {
                txn.commit().await?;
                self.event_sender
                    .send_or_log(Event::OrderPlaced {
                        draft_order_id: order.id,
                        sales_order_id: placed.sales_order_id,
                        sales_invoice_id: placed.sales_invoice_id,
                    })
                    .await;
                info!(
                    quotation = %order.order_number,
                    sales_order = %placed.sales_order_number,
                    invoice = %placed.sales_invoice_number,
                    "order conversion committed"
                );
                Ok(placed)
            }
            Err(cause) => {
                // The submit in step one must not stay visible: everything
                // since begin() is rolled back before the error surfaces.
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "rollback after failed conversion also failed");
                }
                Err(ServiceError::ConversionFailed(cause.to_string()))
            }
        }
    }

    /// Fulfillment location per line: the best-stocked warehouse, else the
    /// first non-group warehouse, else the configured fallback name.
    async fn resolve_warehouses(
        &self,
        lines: Vec<DraftOrderLineModel>,
    ) -> Result<Vec<(DraftOrderLineModel, String)>, ServiceError> {
        let mut default_warehouse: Option<Option<String>> = None;
        let mut resolved = Vec::with_capacity(lines.len());

        for line in lines {
            let warehouse = match self.stock.best_stocked_warehouse(&line.item_code).await? {
                Some(wh) => wh,
                None => {
                    // One lookup for the whole document; lines falling through
                    // the bin check share the same fallback.
                    if default_warehouse.is_none() {
                        default_warehouse = Some(self.stock.first_non_group_warehouse().await?);
                    }
                    default_warehouse
                        .clone()
                        .flatten()
                        .unwrap_or_else(|| self.fallback_warehouse.clone())
                }
            };
            resolved.push((line, warehouse));
        }

        Ok(resolved)
    }

    /// The transactional body: submit the draft, derive the sales order,
    /// derive the invoice. Runs entirely on `txn`.
    async fn convert(
        &self,
        txn: &DatabaseTransaction,
        order: &DraftOrderModel,
        resolved: &[(DraftOrderLineModel, String)],
        address_id: Option<Uuid>,
    ) -> Result<PlaceOrderResult, ServiceError> {
        let mut submit: draft_order::ActiveModel = order.clone().into();
        submit.docstatus = Set(docstatus::SUBMITTED);
        submit.updated_at = Set(Utc::now());
        submit.update(txn).await?;

        let line_totals: Vec<LineTotals> = resolved
            .iter()
            .map(|(l, _)| LineTotals {
                qty: l.qty,
                amount: l.amount,
            })
            .collect();

        let sales_order_id = Uuid::new_v4();
        let sales_order_number = format!("SO-{}", sales_order_id.to_string()[..8].to_uppercase());
        let order_totals = self.totals.recompute(&line_totals)?;

        let so = sales_order::ActiveModel {
            id: Set(sales_order_id),
            order_number: Set(sales_order_number.clone()),
            customer_id: Set(order.customer_id),
            draft_order_id: Set(order.id),
            shipping_address_id: Set(address_id),
            docstatus: Set(docstatus::DRAFT),
            net_total: Set(order_totals.net_total),
            tax_total: Set(order_totals.tax_total),
            grand_total: Set(order_totals.grand_total),
            total_qty: Set(order_totals.total_qty),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        so.insert(txn).await?;

        for (line, warehouse) in resolved {
            let row = sales_order_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_order_id: Set(sales_order_id),
                item_code: Set(line.item_code.clone()),
                qty: Set(line.qty),
                rate: Set(line.rate),
                amount: Set(line.amount),
                warehouse: Set(warehouse.clone()),
                delivery_date: Set(line.delivery_date),
            };
            row.insert(txn).await?;
        }

        let invoice_totals = self.totals.recompute(&line_totals)?;
        let sales_invoice_id = Uuid::new_v4();
        let sales_invoice_number =
            format!("INV-{}", sales_invoice_id.to_string()[..8].to_uppercase());

        let invoice = sales_invoice::ActiveModel {
            id: Set(sales_invoice_id),
            invoice_number: Set(sales_invoice_number.clone()),
            customer_id: Set(order.customer_id),
            sales_order_id: Set(sales_order_id),
            shipping_address_id: Set(address_id),
            docstatus: Set(docstatus::DRAFT),
            update_stock: Set(true),
            net_total: Set(invoice_totals.net_total),
            tax_total: Set(invoice_totals.tax_total),
            grand_total: Set(invoice_totals.grand_total),
            total_qty: Set(invoice_totals.total_qty),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        invoice.insert(txn).await?;

        for (line, warehouse) in resolved {
            let row = sales_invoice_line::ActiveModel {
                id: Set(Uuid::new_v4()),
                sales_invoice_id: Set(sales_invoice_id),
                item_code: Set(line.item_code.clone()),
                qty: Set(line.qty),
                rate: Set(line.rate),
                amount: Set(line.amount),
                warehouse: Set(warehouse.clone()),
            };
            row.insert(txn).await?;
        }

        Ok(PlaceOrderResult {
            sales_order_id,
            sales_order_number,
            sales_invoice_id,
            sales_invoice_number,
            grand_total: invoice_totals.grand_total,
        })
    }
}
