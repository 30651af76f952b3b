use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Domain events emitted by the storefront services. The processing loop
/// only logs them today; downstream consumers (mailers, webhooks) attach to
/// the same channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    CartSynced {
        draft_order_id: Uuid,
        customer_id: Uuid,
    },
    OrderPlaced {
        draft_order_id: Uuid,
        sales_order_id: Uuid,
        sales_invoice_id: Uuid,
    },
    ItemPublishedChanged {
        item_code: String,
        published: bool,
    },
    CustomerRegistered {
        user_email: String,
        customer_id: Uuid,
    },
    NewsletterSubscribed {
        email: String,
    },
    PasswordResetRequested {
        user_email: String,
    },
    BackupCompleted {
        account_email: String,
    },
    BackupFailed {
        account_email: String,
        error: String,
    },
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event, surfacing channel failure to the caller.
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }

    /// Sends an event; a full or closed channel is logged, not propagated.
    pub async fn send_or_log(&self, event: Event) {
        if let Err(e) = self.send(event).await {
            warn!("Dropping event: {}", e);
        }
    }
}

/// Event processing loop, spawned once at startup.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match &event {
            Event::OrderPlaced {
                draft_order_id,
                sales_order_id,
                sales_invoice_id,
            } => {
                info!(
                    %draft_order_id, %sales_order_id, %sales_invoice_id,
                    "order placed"
                );
            }
            Event::BackupFailed {
                account_email,
                error: cause,
            } => {
                error!(account = %account_email, error = %cause, "drive backup failed");
            }
            other => info!(event = ?other, "event processed"),
        }
    }

    info!("Event channel closed; processor exiting");
}
