use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_catalog_tables::Migration),
            Box::new(m20240301_000002_create_stock_tables::Migration),
            Box::new(m20240301_000003_create_customer_tables::Migration),
            Box::new(m20240301_000004_create_order_documents::Migration),
            Box::new(m20240301_000005_create_engagement_tables::Migration),
        ]
    }
}

mod m20240301_000001_create_catalog_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000001_create_catalog_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(CatalogItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CatalogItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogItems::ItemCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(CatalogItems::ItemName).string().not_null())
                        .col(ColumnDef::new(CatalogItems::Description).string().null())
                        .col(ColumnDef::new(CatalogItems::ItemGroup).string().null())
                        .col(ColumnDef::new(CatalogItems::Brand).string().null())
                        .col(ColumnDef::new(CatalogItems::Route).string().null())
                        .col(ColumnDef::new(CatalogItems::Image).string().null())
                        .col(
                            ColumnDef::new(CatalogItems::WebsiteWarehouse)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(CatalogItems::IsStockItem)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogItems::Discontinued)
                                .boolean()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CatalogItems::Published).boolean().not_null())
                        .col(ColumnDef::new(CatalogItems::Section).string().null())
                        .col(ColumnDef::new(CatalogItems::SectionOrder).integer().null())
                        .col(
                            ColumnDef::new(CatalogItems::PriceListRate)
                                .decimal()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CatalogItems::Ranking).integer().not_null())
                        .col(
                            ColumnDef::new(CatalogItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CatalogItems::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_catalog_items_section")
                        .table(CatalogItems::Table)
                        .col(CatalogItems::Section)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ItemGroups::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemGroups::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemGroups::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(ItemGroups::ParentItemGroup).string().null())
                        .col(
                            ColumnDef::new(ItemGroups::ShowOnWebsite)
                                .boolean()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemGroups::Route).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ItemAttributes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ItemAttributes::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ItemAttributes::ItemCode).string().not_null())
                        .col(
                            ColumnDef::new(ItemAttributes::Attribute)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ItemAttributes::AttributeValue)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ProductReviews::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ProductReviews::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ProductReviews::ItemCode).string().not_null())
                        .col(ColumnDef::new(ProductReviews::Reviewer).string().not_null())
                        .col(
                            ColumnDef::new(ProductReviews::ReviewerEmail)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(ProductReviews::Rating).integer().not_null())
                        .col(ColumnDef::new(ProductReviews::Review).string().null())
                        .col(
                            ColumnDef::new(ProductReviews::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(HomeSections::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(HomeSections::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(HomeSections::SectionName)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(HomeSections::IsActive).boolean().not_null())
                        .col(ColumnDef::new(HomeSections::SortOrder).integer().not_null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(HomeSections::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ProductReviews::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ItemAttributes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ItemGroups::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(CatalogItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum CatalogItems {
        Table,
        Id,
        ItemCode,
        ItemName,
        Description,
        ItemGroup,
        Brand,
        Route,
        Image,
        WebsiteWarehouse,
        IsStockItem,
        Discontinued,
        Published,
        Section,
        SectionOrder,
        PriceListRate,
        Ranking,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum ItemGroups {
        Table,
        Id,
        Name,
        ParentItemGroup,
        ShowOnWebsite,
        Route,
    }

    #[derive(DeriveIden)]
    enum ItemAttributes {
        Table,
        Id,
        ItemCode,
        Attribute,
        AttributeValue,
    }

    #[derive(DeriveIden)]
    enum ProductReviews {
        Table,
        Id,
        ItemCode,
        Reviewer,
        ReviewerEmail,
        Rating,
        Review,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum HomeSections {
        Table,
        Id,
        SectionName,
        IsActive,
        SortOrder,
    }
}

mod m20240301_000002_create_stock_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000002_create_stock_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Warehouses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Warehouses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Warehouses::Name)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Warehouses::IsGroup).boolean().not_null())
                        .col(ColumnDef::new(Warehouses::Disabled).boolean().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WarehouseBins::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WarehouseBins::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WarehouseBins::ItemCode).string().not_null())
                        .col(ColumnDef::new(WarehouseBins::Warehouse).string().not_null())
                        .col(ColumnDef::new(WarehouseBins::ActualQty).double().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_warehouse_bins_item_code")
                        .table(WarehouseBins::Table)
                        .col(WarehouseBins::ItemCode)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::WorkOrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::ProductionItem)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::QtyToManufacture)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Status)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Docstatus)
                                .small_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_work_orders_production_item")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::ProductionItem)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WarehouseBins::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Warehouses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Warehouses {
        Table,
        Id,
        Name,
        IsGroup,
        Disabled,
    }

    #[derive(DeriveIden)]
    enum WarehouseBins {
        Table,
        Id,
        ItemCode,
        Warehouse,
        ActualQty,
    }

    #[derive(DeriveIden)]
    enum WorkOrders {
        Table,
        Id,
        WorkOrderNumber,
        ProductionItem,
        QtyToManufacture,
        Status,
        Docstatus,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000003_create_customer_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000003_create_customer_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Customers::CustomerName).string().not_null())
                        .col(ColumnDef::new(Customers::CustomerType).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Phone).string().null())
                        .col(ColumnDef::new(Customers::TaxId).string().null())
                        .col(ColumnDef::new(Customers::CustomerGroup).string().not_null())
                        .col(ColumnDef::new(Customers::Territory).string().not_null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PortalUsers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PortalUsers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PortalUsers::CustomerId).uuid().not_null())
                        .col(
                            ColumnDef::new(PortalUsers::UserEmail)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(UserAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(UserAccounts::Username).string().null())
                        .col(ColumnDef::new(UserAccounts::FirstName).string().not_null())
                        .col(ColumnDef::new(UserAccounts::LastName).string().null())
                        .col(ColumnDef::new(UserAccounts::Phone).string().null())
                        .col(
                            ColumnDef::new(UserAccounts::PasswordHash)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(UserAccounts::Enabled).boolean().not_null())
                        .col(
                            ColumnDef::new(UserAccounts::ResetTokenHash)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::ResetTokenExpiresAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserAccounts::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(CustomerAddresses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(CustomerAddresses::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::CustomerId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::AddressTitle)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::AddressLine1)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::AddressLine2)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(CustomerAddresses::City).string().not_null())
                        .col(ColumnDef::new(CustomerAddresses::State).string().null())
                        .col(
                            ColumnDef::new(CustomerAddresses::Country)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(CustomerAddresses::Pincode).string().null())
                        .col(ColumnDef::new(CustomerAddresses::Phone).string().null())
                        .col(
                            ColumnDef::new(CustomerAddresses::IsDefault)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(CustomerAddresses::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(CustomerAddresses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(UserAccounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PortalUsers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Customers {
        Table,
        Id,
        CustomerName,
        CustomerType,
        Email,
        Phone,
        TaxId,
        CustomerGroup,
        Territory,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PortalUsers {
        Table,
        Id,
        CustomerId,
        UserEmail,
    }

    #[derive(DeriveIden)]
    enum UserAccounts {
        Table,
        Id,
        Email,
        Username,
        FirstName,
        LastName,
        Phone,
        PasswordHash,
        Enabled,
        ResetTokenHash,
        ResetTokenExpiresAt,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum CustomerAddresses {
        Table,
        Id,
        CustomerId,
        AddressTitle,
        AddressLine1,
        AddressLine2,
        City,
        State,
        Country,
        Pincode,
        Phone,
        IsDefault,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240301_000004_create_order_documents {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000004_create_order_documents"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(DraftOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DraftOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(DraftOrders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(DraftOrders::Source).string().not_null())
                        .col(
                            ColumnDef::new(DraftOrders::Docstatus)
                                .small_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrders::GrandTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrders::TotalQty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_draft_orders_customer_source")
                        .table(DraftOrders::Table)
                        .col(DraftOrders::CustomerId)
                        .col(DraftOrders::Source)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DraftOrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DraftOrderLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::DraftOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::ItemCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::Qty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::Rate)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::Amount)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::DeliveryDate)
                                .date()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DraftOrderLines::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrders::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SalesOrders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(SalesOrders::DraftOrderId).uuid().not_null())
                        .col(
                            ColumnDef::new(SalesOrders::ShippingAddressId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::Docstatus)
                                .small_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::NetTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::TaxTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::GrandTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::TotalQty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesOrderLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesOrderLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::SalesOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::ItemCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::Qty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::Rate)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::Amount)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::Warehouse)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesOrderLines::DeliveryDate)
                                .date()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesInvoices::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesInvoices::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::InvoiceNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(SalesInvoices::CustomerId).uuid().not_null())
                        .col(
                            ColumnDef::new(SalesInvoices::SalesOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::ShippingAddressId)
                                .uuid()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::Docstatus)
                                .small_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::UpdateStock)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::NetTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::TaxTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::GrandTotal)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::TotalQty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoices::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(SalesInvoiceLines::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(SalesInvoiceLines::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::SalesInvoiceId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::ItemCode)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::Qty)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::Rate)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::Amount)
                                .decimal()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(SalesInvoiceLines::Warehouse)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SalesInvoiceLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesInvoices::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(SalesOrders::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DraftOrderLines::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DraftOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum DraftOrders {
        Table,
        Id,
        OrderNumber,
        CustomerId,
        Source,
        Docstatus,
        GrandTotal,
        TotalQty,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum DraftOrderLines {
        Table,
        Id,
        DraftOrderId,
        ItemCode,
        Qty,
        Rate,
        Amount,
        DeliveryDate,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum SalesOrders {
        Table,
        Id,
        OrderNumber,
        CustomerId,
        DraftOrderId,
        ShippingAddressId,
        Docstatus,
        NetTotal,
        TaxTotal,
        GrandTotal,
        TotalQty,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SalesOrderLines {
        Table,
        Id,
        SalesOrderId,
        ItemCode,
        Qty,
        Rate,
        Amount,
        Warehouse,
        DeliveryDate,
    }

    #[derive(DeriveIden)]
    enum SalesInvoices {
        Table,
        Id,
        InvoiceNumber,
        CustomerId,
        SalesOrderId,
        ShippingAddressId,
        Docstatus,
        UpdateStock,
        NetTotal,
        TaxTotal,
        GrandTotal,
        TotalQty,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum SalesInvoiceLines {
        Table,
        Id,
        SalesInvoiceId,
        ItemCode,
        Qty,
        Rate,
        Amount,
        Warehouse,
    }
}

mod m20240301_000005_create_engagement_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240301_000005_create_engagement_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WishlistItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WishlistItems::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(WishlistItems::UserEmail).string().not_null())
                        .col(ColumnDef::new(WishlistItems::ItemCode).string().not_null())
                        .col(
                            ColumnDef::new(WishlistItems::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_wishlist_items_user")
                        .table(WishlistItems::Table)
                        .col(WishlistItems::UserEmail)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(NewsletterMembers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(NewsletterMembers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NewsletterMembers::EmailGroup)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(NewsletterMembers::Email).string().not_null())
                        .col(
                            ColumnDef::new(NewsletterMembers::Unsubscribed)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(NewsletterMembers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DriveBackupAccounts::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DriveBackupAccounts::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::Email)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::ClientId)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::ClientSecret)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::RefreshToken)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::BackupFolderName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::BackupFolderId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::WithFiles)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::Enabled)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::SendEmailNotification)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::NotifyEmail)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(DriveBackupAccounts::LastBackupOn)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(DriveBackupAccounts::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(NewsletterMembers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WishlistItems::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum WishlistItems {
        Table,
        Id,
        UserEmail,
        ItemCode,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum NewsletterMembers {
        Table,
        Id,
        EmailGroup,
        Email,
        Unsubscribed,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    enum DriveBackupAccounts {
        Table,
        Id,
        Email,
        ClientId,
        ClientSecret,
        RefreshToken,
        BackupFolderName,
        BackupFolderId,
        WithFiles,
        Enabled,
        SendEmailNotification,
        NotifyEmail,
        LastBackupOn,
    }
}
