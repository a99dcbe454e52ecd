//! Typed calls against the commerce API.
//!
//! # Path contract
//!
//! ```text
//! GET    /api/v1/categories          - Category names
//! GET    /api/v1/products[?category] - Products, optionally filtered
//! GET    /api/v1/cart                - Cart line items
//! POST   /api/v1/cart/items          - Add a line ({product_id, quantity})
//! DELETE /api/v1/cart/items/{id}     - Remove a line
//! POST   /api/v1/orders              - Place an order (no body)
//! GET    /api/v1/orders              - Past orders
//! GET    /health                     - Service health
//! ```

use std::collections::BTreeMap;

use cloudmart_core::{CartItemCreate, CartItemId, CartLineItem, Category, Order, Product};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{RawResponse, Result, Transport};

pub const CATEGORIES: &str = "/api/v1/categories";
pub const PRODUCTS: &str = "/api/v1/products";
pub const CART: &str = "/api/v1/cart";
pub const CART_ITEMS: &str = "/api/v1/cart/items";
pub const ORDERS: &str = "/api/v1/orders";
pub const HEALTH: &str = "/health";

/// Characters `urlencoding` escapes that a URI component may carry as is.
const COMPONENT_SAFE: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode one URI component.
///
/// Unreserved characters and `!'()*` stay literal, the same set a browser's
/// `encodeURIComponent` keeps.
#[must_use]
pub fn encode_component(raw: &str) -> String {
    COMPONENT_SAFE
        .iter()
        .fold(urlencoding::encode(raw).into_owned(), |encoded, &(escape, literal)| {
            encoded.replace(escape, literal)
        })
}

/// Product listing path, with a category filter only when one is given.
#[must_use]
pub fn products_path(category: &str) -> String {
    if category.is_empty() {
        PRODUCTS.to_string()
    } else {
        format!("{PRODUCTS}?category={}", encode_component(category))
    }
}

/// Path of a single cart line.
#[must_use]
pub fn cart_item_path(id: &CartItemId) -> String {
    format!("{CART_ITEMS}/{}", encode_component(id.as_str()))
}

async fn get_json<T, D>(api: &T, path: &str) -> Result<D>
where
    T: Transport,
    D: DeserializeOwned,
{
    let value = api.get(path).await?;
    Ok(serde_json::from_value(value)?)
}

/// List all category names, in server order.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn list_categories<T: Transport>(api: &T) -> Result<Vec<Category>> {
    get_json(api, CATEGORIES).await
}

/// List products, filtered by `category` when it is non-empty.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn list_products<T: Transport>(api: &T, category: &str) -> Result<Vec<Product>> {
    get_json(api, &products_path(category)).await
}

/// List the current cart lines.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn list_cart<T: Transport>(api: &T) -> Result<Vec<CartLineItem>> {
    get_json(api, CART).await
}

/// Create a cart line. The response status is left to the caller.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn add_cart_item<T: Transport>(
    api: &T,
    item: &CartItemCreate,
) -> Result<RawResponse> {
    let body = serde_json::to_value(item)?;
    api.post(CART_ITEMS, Some(body)).await
}

/// Delete a cart line. The response status is left to the caller.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn remove_cart_item<T: Transport>(
    api: &T,
    id: &CartItemId,
) -> Result<RawResponse> {
    api.delete(&cart_item_path(id)).await
}

/// Place an order from the current cart. The response status is left to
/// the caller.
///
/// # Errors
///
/// Returns error only on transport failure.
pub async fn place_order<T: Transport>(api: &T) -> Result<RawResponse> {
    api.post(ORDERS, None).await
}

/// List past orders.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn list_orders<T: Transport>(api: &T) -> Result<Vec<Order>> {
    get_json(api, ORDERS).await
}

/// Body of the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Health {
    pub status: String,
    /// Any extra fields the backend reports (e.g. storage connectivity).
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Health {
    /// Whether the service reported itself healthy.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Check service health.
///
/// # Errors
///
/// Returns error on transport failure or a non-success status.
pub async fn health<T: Transport>(api: &T) -> Result<Health> {
    get_json(api, HEALTH).await
}
