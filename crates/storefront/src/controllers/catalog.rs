//! Catalog: category filter and product list.

use tracing::{debug, instrument};

use crate::api::{Result, Transport, endpoints};
use crate::surface::{Container, Node, ProductCard, Surface};

/// Loads categories and products into the surface.
///
/// Nothing is tracked between calls. Overlapping `load_products` calls are
/// not cancelled, so whichever response arrives last is what stays rendered.
#[derive(Debug, Clone)]
pub struct CatalogController<T, S> {
    api: T,
    surface: S,
}

impl<T: Transport, S: Surface> CatalogController<T, S> {
    /// Create a new catalog controller.
    #[must_use]
    pub const fn new(api: T, surface: S) -> Self {
        Self { api, surface }
    }

    /// Append one option per category to the category filter.
    ///
    /// Returns the number of options added.
    ///
    /// # Errors
    ///
    /// Returns error if the categories could not be read; nothing is added.
    #[instrument(skip(self))]
    pub async fn load_categories(&self) -> Result<usize> {
        let categories = endpoints::list_categories(&self.api).await?;

        for category in &categories {
            self.surface.append(
                Container::CategorySelect,
                Node::CategoryOption {
                    value: category.clone(),
                },
            );
        }

        debug!(count = categories.len(), "categories rendered");
        Ok(categories.len())
    }

    /// Replace the product list with the products of `category`.
    ///
    /// The empty category lists every product. Returns the number of
    /// products rendered.
    ///
    /// # Errors
    ///
    /// Returns error if the products could not be read; the list keeps
    /// whatever it showed before.
    #[instrument(skip(self))]
    pub async fn load_products(&self, category: &str) -> Result<usize> {
        let products = endpoints::list_products(&self.api, category).await?;

        self.surface.clear(Container::ProductList);
        for product in &products {
            self.surface.append(
                Container::ProductList,
                Node::ProductCard(ProductCard::from(product)),
            );
        }

        debug!(count = products.len(), "products rendered");
        Ok(products.len())
    }
}
