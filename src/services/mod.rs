pub mod addresses;
pub mod cart;
pub mod catalog;
pub mod customers;
pub mod newsletter;
pub mod orders;
pub mod password_reset;
pub mod publishing;
pub mod registration;
pub mod stock;
pub mod wishlist;

pub use addresses::AddressService;
pub use cart::CartService;
pub use catalog::CatalogService;
pub use customers::CustomerService;
pub use newsletter::NewsletterService;
pub use orders::OrderConversionService;
pub use password_reset::PasswordResetService;
pub use publishing::PublishingService;
pub use registration::RegistrationService;
pub use stock::{StockLookup, StockService};
pub use wishlist::WishlistService;
