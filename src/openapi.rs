use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        version = "0.3.0",
        description = "Catalog browsing with stock visibility, cart-to-order conversion, and customer self-service endpoints.\n\nAuthenticated routes expect `Authorization: Bearer <token>` from `/auth/login`."
    ),
    paths(
        // Catalog
        crate::handlers::catalog::get_product_filters,
        crate::handlers::catalog::get_stock,
        crate::handlers::catalog::get_products_with_stock,
        crate::handlers::catalog::get_product_info,
        crate::handlers::catalog::get_product_reviews,
        crate::handlers::catalog::get_products_by_section,

        // Cart & orders
        crate::handlers::cart::sync_cart,
        crate::handlers::cart::get_current_quotation,
        crate::handlers::cart::place_order,

        // Addresses
        crate::handlers::addresses::list_addresses,
        crate::handlers::addresses::create_address,
        crate::handlers::addresses::update_address,
        crate::handlers::addresses::delete_address,

        // Wishlist
        crate::handlers::wishlist::get_wishlist,
        crate::handlers::wishlist::add_to_wishlist,
        crate::handlers::wishlist::remove_from_wishlist,

        // Account
        crate::handlers::account::register,
        crate::handlers::account::request_password_reset,
        crate::handlers::account::subscribe,

        // Admin
        crate::handlers::admin::run_backups,
        crate::handlers::admin::run_account_backup,
        crate::handlers::admin::authorize_url,
        crate::handlers::admin::connect_account,
        crate::handlers::admin::run_publishing_sweep,

        // Auth
        crate::auth::login,
    ),
    components(schemas(
        crate::errors::ErrorResponse,
        crate::services::stock::StockStatus,
        crate::services::stock::ItemStock,
        crate::services::catalog::ProductQuery,
        crate::services::catalog::ProductSummary,
        crate::services::catalog::SectionProducts,
        crate::services::catalog::ProductFilters,
        crate::services::catalog::ProductInfo,
        crate::services::catalog::ReviewView,
        crate::services::cart::CartLineInput,
        crate::services::cart::CartSyncResult,
        crate::services::cart::QuotationLineView,
        crate::services::cart::QuotationSnapshot,
        crate::services::orders::PlaceOrderResult,
        crate::services::addresses::AddressInput,
        crate::entities::CustomerAddressModel,
        crate::services::registration::RegistrationInput,
        crate::services::registration::RegistrationResult,
        crate::services::password_reset::ResetOutcome,
        crate::services::newsletter::SubscribeOutcome,
        crate::google::backup::BackupRunReport,
        crate::handlers::cart::SyncCartRequest,
        crate::handlers::cart::PlaceOrderRequest,
        crate::handlers::wishlist::WishlistAddRequest,
        crate::handlers::account::PasswordResetRequest,
        crate::handlers::account::SubscribeRequest,
        crate::handlers::admin::ConnectAccountRequest,
        crate::auth::LoginRequest,
        crate::auth::LoginResponse,
    )),
    tags(
        (name = "Catalog", description = "Product browsing with stock visibility"),
        (name = "Cart", description = "Cart sync and order conversion"),
        (name = "Addresses", description = "Customer address book"),
        (name = "Wishlist", description = "Per-user wishlists"),
        (name = "Account", description = "Signup, password reset, newsletter"),
        (name = "Admin", description = "Backups and maintenance jobs"),
        (name = "Auth", description = "Session tokens")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())
}
