//! Cart types.

use serde::{Deserialize, Serialize};

use super::id::{CartItemId, ProductId, UserId};

/// One line of the server-held cart.
///
/// `id` identifies the line, not the product. The client never derives
/// totals from these; the list returned by the server is the whole cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
}

/// Request body for adding a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItemCreate {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartItemCreate {
    /// A request for exactly one unit of `product_id`.
    #[must_use]
    pub const fn single(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}
