use crate::{
    entities::{user_account, UserAccount},
    errors::ServiceError,
    events::{Event, EventSender},
};
use chrono::{Duration, Utc};
use rand::RngCore;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::{info, instrument};
use utoipa::ToSchema;

const TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Serialize, ToSchema)]
pub struct ResetOutcome {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_sent_to: Option<String>,
}

/// Password reset by username, email, or phone. The raw token never touches
/// the database; only its sha256 digest is stored, with a one-hour expiry.
#[derive(Clone)]
pub struct PasswordResetService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl PasswordResetService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn request_reset(&self, identifier: &str) -> Result<ResetOutcome, ServiceError> {
        let identifier = identifier.trim().to_lowercase();
        if identifier.is_empty() {
            return Ok(ResetOutcome {
                status: "fail".to_string(),
                message: "Identifier is required.".to_string(),
                email_sent_to: None,
            });
        }

        // Case-insensitive match on the stored side as well.
        let user = UserAccount::find()
            .filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(user_account::Column::Username)))
                            .eq(identifier.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(user_account::Column::Email)))
                            .eq(identifier.as_str()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(user_account::Column::Phone)))
                            .eq(identifier.as_str()),
                    ),
            )
            .filter(user_account::Column::Enabled.eq(true))
            .one(&*self.db)
            .await?;

        let Some(user) = user else {
            return Ok(ResetOutcome {
                status: "fail".to_string(),
                message: "No user found.".to_string(),
                email_sent_to: None,
            });
        };

        let mut raw = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut raw);
        let token = hex::encode(raw);
        let token_hash = hex::encode(Sha256::digest(token.as_bytes()));

        let email = user.email.clone();
        let mut update: user_account::ActiveModel = user.into();
        update.reset_token_hash = Set(Some(token_hash));
        update.reset_token_expires_at = Set(Some(Utc::now() + Duration::minutes(TOKEN_TTL_MINUTES)));
        update.updated_at = Set(Utc::now());
        update.update(&*self.db).await?;

        // Mail delivery is owned by the notification pipeline; the event
        // carries everything it needs.
        self.event_sender
            .send_or_log(Event::PasswordResetRequested {
                user_email: email.clone(),
            })
            .await;
        info!(user = %email, "password reset token issued");

        Ok(ResetOutcome {
            status: "success".to_string(),
            message: format!("Password reset link sent to {}", mask_email(&email)),
            email_sent_to: Some(email),
        })
    }
}

/// `jane.doe@example.com` -> `j******e@example.com`.
fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            if chars.len() <= 2 {
                return email.to_string();
            }
            let masked: String = std::iter::once(chars[0])
                .chain(std::iter::repeat('*').take(chars.len() - 2))
                .chain(std::iter::once(chars[chars.len() - 1]))
                .collect();
            format!("{}@{}", masked, domain)
        }
        None => email.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masking_keeps_first_and_last_local_characters() {
        assert_eq!(mask_email("jane.doe@example.com"), "j******e@example.com");
        assert_eq!(mask_email("ab@example.com"), "ab@example.com");
        assert_eq!(mask_email("not-an-email"), "not-an-email");
    }
}
