//! Cart: line list, summary, add and remove.

use cloudmart_core::{CartItemCreate, CartItemId, ProductId};
use tracing::{debug, instrument};

use crate::api::{RawResponse, Result, Transport, endpoints};
use crate::surface::{CartLineView, Container, Node, Surface};

/// Renders the server-held cart and issues cart mutations.
///
/// The rendered cart only ever comes from a cart read. Mutation responses
/// are never used to patch it; every mutation is followed by a fresh
/// [`load_cart`](Self::load_cart).
#[derive(Debug, Clone)]
pub struct CartController<T, S> {
    api: T,
    surface: S,
}

/// Summary text for a cart of `count` lines.
#[must_use]
pub fn summary_text(count: usize) -> String {
    format!("Items in cart: {count}")
}

impl<T: Transport, S: Surface> CartController<T, S> {
    /// Create a new cart controller.
    #[must_use]
    pub const fn new(api: T, surface: S) -> Self {
        Self { api, surface }
    }

    /// Re-render the cart list and the item count.
    ///
    /// Returns the number of lines rendered.
    ///
    /// # Errors
    ///
    /// Returns error if the cart could not be read; the view is left as is.
    #[instrument(skip(self))]
    pub async fn load_cart(&self) -> Result<usize> {
        let lines = endpoints::list_cart(&self.api).await?;

        self.surface.clear(Container::CartList);
        for line in &lines {
            self.surface
                .append(Container::CartList, Node::CartLine(CartLineView::from(line)));
        }
        self.surface.set_text(Container::CartSummary, &summary_text(lines.len()));

        debug!(count = lines.len(), "cart rendered");
        Ok(lines.len())
    }

    /// Add one unit of `product_id`, then reload the cart.
    ///
    /// The create response's status is not checked: a rejected add still
    /// reloads and reports success.
    ///
    /// # Errors
    ///
    /// Returns the transport error of the create if it failed, otherwise
    /// the outcome of the reload.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, product_id: &ProductId) -> Result<usize> {
        let item = CartItemCreate::single(product_id.clone());
        let attempt = endpoints::add_cart_item(&self.api, &item).await;
        self.reload_after("add_to_cart", attempt).await
    }

    /// Remove the line `id`, then reload the cart.
    ///
    /// Same status and reload policy as [`add_to_cart`](Self::add_to_cart).
    ///
    /// # Errors
    ///
    /// Returns the transport error of the delete if it failed, otherwise
    /// the outcome of the reload.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, id: &CartItemId) -> Result<usize> {
        let attempt = endpoints::remove_cart_item(&self.api, id).await;
        self.reload_after("remove_from_cart", attempt).await
    }

    async fn reload_after(
        &self,
        operation: &'static str,
        attempt: Result<RawResponse>,
    ) -> Result<usize> {
        if let Ok(response) = &attempt {
            debug!(operation, status = %response.status, "cart mutation answered");
        }

        let reloaded = self.load_cart().await;
        attempt?;
        reloaded
    }
}
