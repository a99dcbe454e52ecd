//! Command dispatcher.
//!
//! [`Storefront`] owns the three controllers and is the top-level caller:
//! every [`Command`] goes through [`Storefront::dispatch`], which logs and
//! returns controller errors. Nothing above it is expected to show them.

use tracing::{error, instrument};

use crate::api::{Result, Transport};
use crate::command::Command;
use crate::controllers::{CartController, CatalogController, CheckoutOrchestrator};
use crate::surface::{Node, Surface};

/// The storefront page: controllers wired to one transport and one surface.
#[derive(Debug, Clone)]
pub struct Storefront<T, S> {
    catalog: CatalogController<T, S>,
    cart: CartController<T, S>,
    checkout: CheckoutOrchestrator<T, S>,
}

impl<T, S> Storefront<T, S>
where
    T: Transport + Clone,
    S: Surface + Clone,
{
    /// Wire the controllers to `api` and `surface`.
    #[must_use]
    pub fn new(api: T, surface: S) -> Self {
        let cart = CartController::new(api.clone(), surface.clone());
        Self {
            catalog: CatalogController::new(api.clone(), surface.clone()),
            checkout: CheckoutOrchestrator::new(api, surface, cart.clone()),
            cart,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogController<T, S> {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartController<T, S> {
        &self.cart
    }

    #[must_use]
    pub const fn checkout(&self) -> &CheckoutOrchestrator<T, S> {
        &self.checkout
    }

    /// Run `command` to completion.
    ///
    /// Failures have already been logged when this returns; the result is
    /// only informative.
    ///
    /// # Errors
    ///
    /// Returns the first controller error the command ran into.
    #[instrument(skip(self), fields(operation = command.name()))]
    pub async fn dispatch(&self, command: Command) -> Result<()> {
        let result = self.run(&command).await;
        if let Err(err) = &result {
            error!(operation = command.name(), error = %err, "command failed");
        }
        result
    }

    /// Dispatch the command attached to a rendered node.
    ///
    /// # Errors
    ///
    /// Same as [`dispatch`](Self::dispatch).
    pub async fn activate(&self, node: &Node) -> Result<()> {
        self.dispatch(node.command()).await
    }

    async fn run(&self, command: &Command) -> Result<()> {
        match command {
            Command::LoadPage => self.load_page().await,
            Command::SelectCategory(category) => {
                self.catalog.load_products(category.as_str()).await.map(drop)
            }
            Command::AddToCart(product_id) => self.cart.add_to_cart(product_id).await.map(drop),
            Command::RemoveFromCart(id) => self.cart.remove_from_cart(id).await.map(drop),
            Command::Checkout => self.checkout.checkout().await.map(drop),
        }
    }

    /// Start the three page loads together. Requests are issued in the
    /// order categories, products, cart; they complete in any order.
    async fn load_page(&self) -> Result<()> {
        let (categories, products, cart) = tokio::join!(
            self.catalog.load_categories(),
            self.catalog.load_products(""),
            self.cart.load_cart(),
        );

        let mut first = None;
        for (load, result) in [
            ("load_categories", categories),
            ("load_products", products),
            ("load_cart", cart),
        ] {
            if let Err(err) = result {
                error!(operation = load, error = %err, "page load step failed");
                if first.is_none() {
                    first = Some(err);
                }
            }
        }

        first.map_or(Ok(()), Err)
    }
}
