//! Checkout: order placement and status display.
//!
//! Checkout is the one place that tells apart the three ways a request can
//! end:
//!
//! | Outcome | Status text | Cart reload |
//! |---|---|---|
//! | 2xx, `Order` body | `Order <id> confirmed!` | yes, after the text |
//! | non-2xx, `{detail}` body | `Error: <detail>` | no |
//! | transport failure or undecodable body | `Error placing order.` | no |

use cloudmart_core::{Order, OrderFailure};
use reqwest::StatusCode;
use tracing::{error, info, instrument, warn};

use super::cart::CartController;
use crate::api::{Result, Transport, endpoints};
use crate::surface::{Container, Surface};

/// Status text while the order request is in flight.
pub const PLACING_ORDER: &str = "Placing order...";

/// Status text when no usable response was obtained.
pub const TRANSPORT_FAILURE: &str = "Error placing order.";

/// Result of a checkout attempt that got a decodable response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The order was placed.
    Confirmed(Order),
    /// The server refused the order.
    Rejected {
        status: StatusCode,
        failure: OrderFailure,
    },
}

impl CheckoutOutcome {
    /// Status text shown for this outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Confirmed(order) => format!("Order {} confirmed!", order.id),
            Self::Rejected { failure, .. } => format!("Error: {}", failure.message()),
        }
    }
}

/// Places orders and reloads the cart after a confirmed one.
#[derive(Debug, Clone)]
pub struct CheckoutOrchestrator<T, S> {
    api: T,
    surface: S,
    cart: CartController<T, S>,
}

impl<T: Transport, S: Surface> CheckoutOrchestrator<T, S> {
    /// Create a new checkout orchestrator.
    ///
    /// `cart` is the controller reloaded after a confirmed order.
    #[must_use]
    pub const fn new(api: T, surface: S, cart: CartController<T, S>) -> Self {
        Self { api, surface, cart }
    }

    /// Place an order from the current cart.
    ///
    /// # Errors
    ///
    /// Returns the transport error when no decodable response was obtained.
    /// The status text has already been set to [`TRANSPORT_FAILURE`] by
    /// then.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<CheckoutOutcome> {
        self.surface.set_text(Container::OrderStatus, PLACING_ORDER);

        let outcome = match self.place_order().await {
            Ok(outcome) => outcome,
            Err(err) => {
                self.surface.set_text(Container::OrderStatus, TRANSPORT_FAILURE);
                return Err(err);
            }
        };

        self.surface.set_text(Container::OrderStatus, &outcome.message());

        match &outcome {
            CheckoutOutcome::Confirmed(order) => {
                info!(order_id = %order.id, "order confirmed");
                if let Err(err) = self.cart.load_cart().await {
                    error!(error = %err, "Error loading cart");
                }
            }
            CheckoutOutcome::Rejected { status, failure } => {
                warn!(status = %status, detail = %failure.message(), "order rejected");
            }
        }

        Ok(outcome)
    }

    async fn place_order(&self) -> Result<CheckoutOutcome> {
        let response = endpoints::place_order(&self.api).await?;

        if !response.is_success() {
            return Ok(CheckoutOutcome::Rejected {
                status: response.status,
                failure: response.json()?,
            });
        }

        Ok(CheckoutOutcome::Confirmed(response.json()?))
    }
}
