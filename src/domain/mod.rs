pub mod analytics;
pub mod backup;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod invoice;
pub mod ledger;
pub mod money;

pub use cart::{BillingSession, Cart, CartError, CartLine};
pub use catalog::{Catalog, CatalogError, ProductDraft, ProductPatch, ValidationError};
pub use checkout::{Checkout, CheckoutError};
pub use ledger::Ledger;
