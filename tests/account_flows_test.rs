mod common;

use common::TestApp;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use storefront_api::{
    entities::{portal_user, user_account, Customer, PortalUser, UserAccount},
    errors::ServiceError,
    services::registration::RegistrationInput,
};

fn registration(email: &str) -> RegistrationInput {
    serde_json::from_value(serde_json::json!({
        "businessName": "Acme Traders",
        "contactName": "Jane Q Doe",
        "email": email,
        "phone": "5550100",
        "password": "a-long-password",
        "gst": "GST-001",
    }))
    .expect("registration input")
}

#[tokio::test]
async fn registration_creates_user_customer_and_portal_link() {
    let app = TestApp::new().await;

    let result = app
        .state
        .services
        .registration
        .register(registration("new@example.com"))
        .await
        .expect("register");
    assert_eq!(result.status, "success");
    assert_eq!(result.user, "new@example.com");

    let user = UserAccount::find()
        .filter(user_account::Column::Email.eq("new@example.com"))
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("user exists");
    assert_eq!(user.first_name, "Jane");
    assert_eq!(user.last_name.as_deref(), Some("Q Doe"));

    let customer = Customer::find_by_id(result.customer)
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("customer exists");
    assert_eq!(customer.customer_name, "Acme Traders");
    assert_eq!(customer.tax_id.as_deref(), Some("GST-001"));

    let link = PortalUser::find()
        .filter(portal_user::Column::UserEmail.eq("new@example.com"))
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("link exists");
    assert_eq!(link.customer_id, result.customer);

    // The fresh credentials work against the login flow.
    let login = app
        .state
        .auth
        .login("new@example.com", "a-long-password")
        .await
        .expect("login");
    assert!(!login.token.is_empty());
}

#[tokio::test]
async fn duplicate_registration_is_rejected_without_side_effects() {
    let app = TestApp::new().await;
    let registration_input = registration("dup@example.com");

    app.state
        .services
        .registration
        .register(registration_input)
        .await
        .expect("first registration");

    let err = app
        .state
        .services
        .registration
        .register(registration("dup@example.com"))
        .await
        .expect_err("second registration must fail");
    assert!(matches!(err, ServiceError::Conflict(_)));

    let users = UserAccount::find()
        .filter(user_account::Column::Email.eq("dup@example.com"))
        .count(&*app.state.db)
        .await
        .expect("count");
    assert_eq!(users, 1);
}

#[tokio::test]
async fn registration_reuses_an_existing_customer_with_the_same_email() {
    let app = TestApp::new().await;
    // Back-office customer created before the web signup; no user account.
    let (existing_customer, _) = {
        use chrono::Utc;
        use sea_orm::{ActiveModelTrait, Set};
        use storefront_api::entities::customer;
        use uuid::Uuid;

        let id = Uuid::new_v4();
        let row = customer::ActiveModel {
            id: Set(id),
            customer_name: Set("Preexisting Co".to_string()),
            customer_type: Set("Company".to_string()),
            email: Set(Some("existing@example.com".to_string())),
            phone: Set(None),
            tax_id: Set(None),
            customer_group: Set("All Customer Groups".to_string()),
            territory: Set("All Territories".to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        row.insert(&*app.state.db).await.expect("insert customer");
        (id, ())
    };

    let result = app
        .state
        .services
        .registration
        .register(registration("existing@example.com"))
        .await
        .expect("register");

    assert_eq!(result.customer, existing_customer);
}

#[tokio::test]
async fn password_reset_finds_users_by_any_identifier() {
    let app = TestApp::new().await;
    app.seed_customer_with_user("reset@example.com").await;
    let reset = &app.state.services.password_reset;

    // Email, case-insensitively.
    let by_email = reset.request_reset("RESET@Example.COM").await.expect("reset");
    assert_eq!(by_email.status, "success");
    assert_eq!(by_email.email_sent_to.as_deref(), Some("reset@example.com"));
    assert!(by_email.message.contains("r***t@example.com"));

    // Phone.
    let by_phone = reset.request_reset("5550100").await.expect("reset");
    assert_eq!(by_phone.status, "success");

    // The stored token is a digest with an expiry, never the raw token.
    let user = UserAccount::find()
        .filter(user_account::Column::Email.eq("reset@example.com"))
        .one(&*app.state.db)
        .await
        .expect("query")
        .expect("user exists");
    let hash = user.reset_token_hash.expect("token hash stored");
    assert_eq!(hash.len(), 64);
    assert!(user.reset_token_expires_at.is_some());
}

#[tokio::test]
async fn password_reset_for_unknown_identifier_fails_in_band() {
    let app = TestApp::new().await;
    let outcome = app
        .state
        .services
        .password_reset
        .request_reset("nobody@example.com")
        .await
        .expect("request");
    assert_eq!(outcome.status, "fail");
    assert_eq!(outcome.message, "No user found.");
}

#[tokio::test]
async fn newsletter_subscription_paths() {
    let app = TestApp::new().await;
    let newsletter = &app.state.services.newsletter;

    let first = newsletter.subscribe("reader@example.com").await.expect("subscribe");
    assert_eq!(first.status, "success");

    let second = newsletter.subscribe("reader@example.com").await.expect("subscribe");
    assert_eq!(second.status, "error");
    assert!(second.message.contains("already subscribed"));
}

#[tokio::test]
async fn disabled_newsletter_degrades_in_band() {
    use std::sync::Arc;
    use storefront_api::services::NewsletterService;
    use tokio::sync::mpsc;

    let app = TestApp::new().await;
    let (tx, _rx) = mpsc::channel(8);
    let disabled = NewsletterService::new(
        app.state.db.clone(),
        Arc::new(storefront_api::events::EventSender::new(tx)),
        false,
        None,
    );

    let outcome = disabled.subscribe("reader@example.com").await.expect("subscribe");
    assert_eq!(outcome.status, "error");
    assert!(outcome.message.contains("not enabled"));
}
