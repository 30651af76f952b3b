use crate::{
    auth::hash_password,
    entities::{
        customer, portal_user, user_account, Customer, PortalUser, UserAccount,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationInput {
    #[validate(length(min = 1))]
    pub business_name: String,
    #[validate(length(min = 1))]
    pub contact_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 5))]
    pub phone: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub gst: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResult {
    pub status: String,
    pub message: String,
    pub user: String,
    pub customer: Uuid,
}

/// Signs up a storefront user: account, customer record, and the portal
/// link between them, created or reused in one transaction.
#[derive(Clone)]
pub struct RegistrationService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    default_customer_group: String,
    default_territory: String,
}

impl RegistrationService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        default_customer_group: String,
        default_territory: String,
    ) -> Self {
        Self {
            db,
            event_sender,
            default_customer_group,
            default_territory,
        }
    }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(
        &self,
        input: RegistrationInput,
    ) -> Result<RegistrationResult, ServiceError> {
        input.validate()?;

        let existing = UserAccount::find()
            .filter(user_account::Column::Email.eq(input.email.as_str()))
            .one(&*self.db)
            .await?;
        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&input.password)?;
        let (first_name, last_name) = split_contact_name(&input.contact_name);

        let txn = self.db.begin().await?;

        let user = user_account::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(input.email.clone()),
            username: Set(None),
            first_name: Set(first_name),
            last_name: Set(last_name),
            phone: Set(Some(input.phone.clone())),
            password_hash: Set(password_hash),
            enabled: Set(true),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        let user = user.insert(&txn).await?;

        // Reuse a customer that already carries this email (e.g. created by
        // back-office staff before the web signup).
        let customer = Customer::find()
            .filter(customer::Column::Email.eq(input.email.as_str()))
            .one(&txn)
            .await?;
        let customer = match customer {
            Some(existing) => existing,
            None => {
                let row = customer::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    customer_name: Set(input.business_name.clone()),
                    customer_type: Set("Company".to_string()),
                    email: Set(Some(input.email.clone())),
                    phone: Set(Some(input.phone.clone())),
                    tax_id: Set(input.gst.clone()),
                    customer_group: Set(self.default_customer_group.clone()),
                    territory: Set(self.default_territory.clone()),
                    created_at: Set(Utc::now()),
                    updated_at: Set(Utc::now()),
                };
                row.insert(&txn).await?
            }
        };

        let linked = PortalUser::find()
            .filter(portal_user::Column::CustomerId.eq(customer.id))
            .filter(portal_user::Column::UserEmail.eq(user.email.as_str()))
            .one(&txn)
            .await?;
        if linked.is_none() {
            let link = portal_user::ActiveModel {
                id: Set(Uuid::new_v4()),
                customer_id: Set(customer.id),
                user_email: Set(user.email.clone()),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CustomerRegistered {
                user_email: user.email.clone(),
                customer_id: customer.id,
            })
            .await;

        info!(user = %user.email, customer = %customer.id, "registration complete");
        Ok(RegistrationResult {
            status: "success".to_string(),
            message: "Registration successful".to_string(),
            user: user.email,
            customer: customer.id,
        })
    }
}

/// "Jane Q Doe" -> ("Jane", Some("Q Doe")); single names carry no last name.
fn split_contact_name(contact_name: &str) -> (String, Option<String>) {
    let trimmed = contact_name.trim();
    match trimmed.split_once(' ') {
        Some((first, rest)) => (first.to_string(), Some(rest.trim().to_string())),
        None => (trimmed.to_string(), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_name_splits_on_first_space() {
        assert_eq!(
            split_contact_name("Jane Q Doe"),
            ("Jane".to_string(), Some("Q Doe".to_string()))
        );
        assert_eq!(split_contact_name("Mononym"), ("Mononym".to_string(), None));
        assert_eq!(
            split_contact_name("  Padded Name "),
            ("Padded".to_string(), Some("Name".to_string()))
        );
    }

    #[test]
    fn registration_input_rejects_short_passwords() {
        let input = RegistrationInput {
            business_name: "Acme".to_string(),
            contact_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "5551234".to_string(),
            password: "short".to_string(),
            gst: None,
        };
        assert!(input.validate().is_err());
    }
}
