//! Controllers that keep the surface in step with server state.
//!
//! # Flow
//!
//! ```text
//! page load      -> load_categories, load_products(""), load_cart
//! category pick  -> load_products(category)
//! add / remove   -> POST / DELETE, then load_cart
//! checkout       -> POST order, status text, load_cart on success
//! ```
//!
//! Every operation returns a `Result`. Deciding whether an error becomes
//! visible is up to the caller; the [`Storefront`](crate::Storefront)
//! dispatcher only logs.

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use cart::CartController;
pub use catalog::CatalogController;
pub use checkout::{CheckoutOrchestrator, CheckoutOutcome};
