use crate::{
    entities::{portal_user, Customer, CustomerModel, PortalUser},
    errors::ServiceError,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

/// Resolves web identities to customer records via the portal link table.
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DatabaseConnection>,
}

impl CustomerService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// The customer a web user acts for. `NotFound` when the user has no
    /// portal link; callers that tolerate guests use [`Self::try_resolve`].
    pub async fn resolve_for_user(&self, user_email: &str) -> Result<CustomerModel, ServiceError> {
        self.try_resolve(user_email).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("No customer linked to user {}", user_email))
        })
    }

    /// Optional variant of [`Self::resolve_for_user`] for endpoints whose
    /// contract is "no customer, no data" rather than an error.
    pub async fn try_resolve(
        &self,
        user_email: &str,
    ) -> Result<Option<CustomerModel>, ServiceError> {
        let link = PortalUser::find()
            .filter(portal_user::Column::UserEmail.eq(user_email))
            .one(&*self.db)
            .await?;

        match link {
            Some(link) => Ok(Customer::find_by_id(link.customer_id).one(&*self.db).await?),
            None => Ok(None),
        }
    }
}
