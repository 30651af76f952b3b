use crate::{
    entities::{customer_address, CustomerAddress, CustomerAddressModel},
    errors::ServiceError,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AddressInput {
    #[validate(length(min = 1))]
    pub address_title: String,
    #[validate(length(min = 1))]
    pub address_line1: String,
    pub address_line2: Option<String>,
    #[validate(length(min = 1))]
    pub city: String,
    pub state: Option<String>,
    #[validate(length(min = 1))]
    pub country: String,
    pub pincode: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Address book for one customer. Every operation checks ownership; a
/// mismatch is always surfaced, never silently corrected.
#[derive(Clone)]
pub struct AddressService {
    db: Arc<DatabaseConnection>,
}

impl AddressService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    pub async fn list(&self, customer_id: Uuid) -> Result<Vec<CustomerAddressModel>, ServiceError> {
        Ok(CustomerAddress::find()
            .filter(customer_address::Column::CustomerId.eq(customer_id))
            .order_by_desc(customer_address::Column::IsDefault)
            .order_by_asc(customer_address::Column::AddressTitle)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        customer_id: Uuid,
        input: AddressInput,
    ) -> Result<CustomerAddressModel, ServiceError> {
        input.validate()?;

        let row = customer_address::ActiveModel {
            id: Set(Uuid::new_v4()),
            customer_id: Set(customer_id),
            address_title: Set(input.address_title),
            address_line1: Set(input.address_line1),
            address_line2: Set(input.address_line2),
            city: Set(input.city),
            state: Set(input.state),
            country: Set(input.country),
            pincode: Set(input.pincode),
            phone: Set(input.phone),
            is_default: Set(input.is_default),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
        };
        Ok(row.insert(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
        input: AddressInput,
    ) -> Result<CustomerAddressModel, ServiceError> {
        input.validate()?;
        let address = self.owned_address(customer_id, address_id).await?;

        let mut row: customer_address::ActiveModel = address.into();
        row.address_title = Set(input.address_title);
        row.address_line1 = Set(input.address_line1);
        row.address_line2 = Set(input.address_line2);
        row.city = Set(input.city);
        row.state = Set(input.state);
        row.country = Set(input.country);
        row.pincode = Set(input.pincode);
        row.phone = Set(input.phone);
        row.is_default = Set(input.is_default);
        row.updated_at = Set(Utc::now());
        Ok(row.update(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, customer_id: Uuid, address_id: Uuid) -> Result<(), ServiceError> {
        let address = self.owned_address(customer_id, address_id).await?;
        address.delete(&*self.db).await?;
        Ok(())
    }

    async fn owned_address(
        &self,
        customer_id: Uuid,
        address_id: Uuid,
    ) -> Result<CustomerAddressModel, ServiceError> {
        let address = CustomerAddress::find_by_id(address_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Address {} not found", address_id)))?;

        if address.customer_id != customer_id {
            return Err(ServiceError::Forbidden(
                "Address belongs to another customer".to_string(),
            ));
        }
        Ok(address)
    }
}
