use crate::{
    entities::{newsletter_member, NewsletterMember},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeOutcome {
    pub status: String,
    pub message: String,
}

impl SubscribeOutcome {
    fn new(status: &str, message: &str) -> Self {
        Self {
            status: status.to_string(),
            message: message.to_string(),
        }
    }
}

/// Newsletter signup. A missing or disabled mailing list degrades to an
/// in-band error status instead of failing the request: the storefront
/// renders the message either way.
#[derive(Clone)]
pub struct NewsletterService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    enabled: bool,
    email_group: Option<String>,
}

impl NewsletterService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        enabled: bool,
        email_group: Option<String>,
    ) -> Self {
        Self {
            db,
            event_sender,
            enabled,
            email_group,
        }
    }

    #[instrument(skip(self))]
    pub async fn subscribe(&self, email: &str) -> Result<SubscribeOutcome, ServiceError> {
        if !self.enabled {
            return Ok(SubscribeOutcome::new(
                "error",
                "Email subscription is not enabled at the moment",
            ));
        }

        let Some(group) = &self.email_group else {
            error!("newsletter email group is not configured");
            return Ok(SubscribeOutcome::new(
                "error",
                "Email service temporarily unavailable",
            ));
        };

        let existing = NewsletterMember::find()
            .filter(newsletter_member::Column::EmailGroup.eq(group.as_str()))
            .filter(newsletter_member::Column::Email.eq(email))
            .one(&*self.db)
            .await?;

        match existing {
            Some(member) if !member.unsubscribed => Ok(SubscribeOutcome::new(
                "error",
                "You are already subscribed to our newsletter",
            )),
            Some(member) => {
                let mut update: newsletter_member::ActiveModel = member.into();
                update.unsubscribed = Set(false);
                update.update(&*self.db).await?;
                self.subscribed_event(email).await;
                Ok(SubscribeOutcome::new(
                    "success",
                    "You have been successfully subscribed to our newsletter",
                ))
            }
            None => {
                let row = newsletter_member::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    email_group: Set(group.clone()),
                    email: Set(email.to_string()),
                    unsubscribed: Set(false),
                    created_at: Set(Utc::now()),
                };
                row.insert(&*self.db).await?;
                self.subscribed_event(email).await;
                Ok(SubscribeOutcome::new(
                    "success",
                    "You have been successfully subscribed to our newsletter",
                ))
            }
        }
    }

    async fn subscribed_event(&self, email: &str) {
        self.event_sender
            .send_or_log(Event::NewsletterSubscribed {
                email: email.to_string(),
            })
            .await;
    }
}
