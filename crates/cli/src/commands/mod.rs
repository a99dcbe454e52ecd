//! CLI command implementations.
//!
//! Every command works on a [`Session`]: one API client, one in-memory
//! surface, and the storefront controllers wired between them.

pub mod orders;
pub mod render;
pub mod shell;

use std::io::Write;

use cloudmart_core::{CartItemId, Category, ProductId};
use cloudmart_storefront::config::ConfigError;
use cloudmart_storefront::{
    ApiClient, ApiError, Command, MemorySurface, Storefront, StorefrontConfig,
};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The API could not be reached or answered unexpectedly.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Writing to the terminal failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// The API answered but reported itself unhealthy.
    #[error("API unhealthy: status {0}")]
    Unhealthy(String),
}

/// A connected storefront page rendered in memory.
pub struct Session {
    api: ApiClient,
    surface: MemorySurface,
    storefront: Storefront<ApiClient, MemorySurface>,
}

impl Session {
    /// Build a session from the environment, with an optional base URL
    /// override.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn connect(base_url: Option<&str>) -> Result<Self, CliError> {
        let mut config = StorefrontConfig::from_env()?;
        if let Some(base_url) = base_url {
            config = config.override_base_url(base_url)?;
        }

        let api = ApiClient::new(&config)?;
        info!(base_url = api.base_url(), "Using CloudMart API");

        let surface = MemorySurface::new();
        let storefront = Storefront::new(api.clone(), surface.clone());
        Ok(Self {
            api,
            surface,
            storefront,
        })
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    pub const fn surface(&self) -> &MemorySurface {
        &self.surface
    }

    pub const fn storefront(&self) -> &Storefront<ApiClient, MemorySurface> {
        &self.storefront
    }

    /// Load the page, optionally filter the catalog, then print it.
    ///
    /// # Errors
    ///
    /// Returns the first load failure, after printing what did load.
    pub async fn browse(&self, category: Option<&str>) -> Result<(), CliError> {
        let loaded = self.storefront.dispatch(Command::LoadPage).await;
        let filtered = match category {
            Some(category) => {
                self.storefront
                    .dispatch(Command::SelectCategory(Category::from(category)))
                    .await
            }
            None => Ok(()),
        };

        self.print()?;
        loaded?;
        filtered?;
        Ok(())
    }

    /// Load the page, add one unit of `product_id`, then print it.
    ///
    /// # Errors
    ///
    /// Returns the add failure, or a page load failure.
    pub async fn add(&self, product_id: &str) -> Result<(), CliError> {
        self.run_after_load(Command::AddToCart(ProductId::new(product_id))).await
    }

    /// Load the page, remove the cart line `line_id`, then print it.
    ///
    /// # Errors
    ///
    /// Returns the remove failure, or a page load failure.
    pub async fn remove(&self, line_id: &str) -> Result<(), CliError> {
        self.run_after_load(Command::RemoveFromCart(CartItemId::new(line_id))).await
    }

    /// Load the page, place an order, then print it.
    ///
    /// A rejected order is not an error; its message is in the printed
    /// order status.
    ///
    /// # Errors
    ///
    /// Returns the transport failure of the order, or a page load failure.
    pub async fn checkout(&self) -> Result<(), CliError> {
        self.run_after_load(Command::Checkout).await
    }

    async fn run_after_load(&self, command: Command) -> Result<(), CliError> {
        let loaded = self.storefront.dispatch(Command::LoadPage).await;
        let ran = self.storefront.dispatch(command).await;

        self.print()?;
        ran?;
        loaded?;
        Ok(())
    }

    /// Print the current page to stdout.
    ///
    /// # Errors
    ///
    /// Returns error if stdout cannot be written.
    pub fn print(&self) -> Result<(), CliError> {
        let mut out = std::io::stdout().lock();
        render::page(&self.surface, &mut out)?;
        out.flush()?;
        Ok(())
    }
}
