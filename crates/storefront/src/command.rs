//! Commands attached to rendered entities.
//!
//! A rendered node carries the command it triggers instead of a callback.
//! The [`Storefront`](crate::Storefront) dispatcher is the single consumer.

use cloudmart_core::{CartItemId, Category, ProductId};

/// A user- or lifecycle-triggered action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    /// Initial load of categories, products and cart.
    LoadPage,
    /// Filter the product list. The empty category means "all".
    SelectCategory(Category),
    /// Add one unit of a product to the cart.
    AddToCart(ProductId),
    /// Remove a cart line.
    RemoveFromCart(CartItemId),
    /// Place an order from the current cart.
    Checkout,
}

impl Command {
    /// Short operation name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadPage => "load_page",
            Self::SelectCategory(_) => "select_category",
            Self::AddToCart(_) => "add_to_cart",
            Self::RemoveFromCart(_) => "remove_from_cart",
            Self::Checkout => "checkout",
        }
    }
}
