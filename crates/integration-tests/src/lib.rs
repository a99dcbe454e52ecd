//! End-to-end tests for the `CloudMart` storefront.
//!
//! The tests drive the real [`ApiClient`](cloudmart_storefront::ApiClient)
//! against [`MockCommerceApi`], an in-process axum server that answers the
//! commerce API with in-memory state.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cloudmart-integration-tests
//! ```

use std::collections::BTreeSet;
use std::sync::Arc;

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use cloudmart_core::{
    CartItemCreate, CartItemId, CartLineItem, Category, Order, OrderId, OrderStatus, Price,
    Product, ProductId, UserId,
};
use cloudmart_storefront::{ApiClient, MemorySurface, Storefront, StorefrontConfig};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// The only shopper the mock API knows.
pub const DEMO_USER: &str = "demo-user";

#[derive(Default)]
struct Store {
    products: Vec<Product>,
    cart: Vec<CartLineItem>,
    orders: Vec<Order>,
    requests: Vec<String>,
    next_line: u64,
    next_order: u64,
    reject_next_order: Option<(StatusCode, Value)>,
}

#[derive(Clone, Default)]
struct MockState {
    store: Arc<Mutex<Store>>,
}

/// An in-process commerce API listening on a random local port.
pub struct MockCommerceApi {
    base_url: String,
    state: MockState,
}

impl MockCommerceApi {
    /// Start a server with `products` in its catalog and an empty cart.
    ///
    /// # Errors
    ///
    /// Returns error if no local port can be bound.
    pub async fn spawn(products: Vec<Product>) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = MockState::default();
        state.store.lock().await.products = products;

        let app = Router::new()
            .route("/health", get(health))
            .route("/api/v1/categories", get(list_categories))
            .route("/api/v1/products", get(list_products))
            .route("/api/v1/cart", get(list_cart))
            .route("/api/v1/cart/items", post(add_cart_item))
            .route("/api/v1/cart/items/{id}", delete(delete_cart_item))
            .route("/api/v1/orders", post(create_order).get(list_orders))
            .layer(middleware::from_fn_with_state(state.clone(), record))
            .with_state(state.clone());

        tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app).await {
                tracing::error!(error = %err, "mock API stopped");
            }
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Every request seen so far, as `"METHOD /path?query"`.
    pub async fn requests(&self) -> Vec<String> {
        self.state.store.lock().await.requests.clone()
    }

    /// How many times `request` was seen.
    pub async fn count(&self, request: &str) -> usize {
        self.requests()
            .await
            .iter()
            .filter(|seen| *seen == request)
            .count()
    }

    pub async fn cart(&self) -> Vec<CartLineItem> {
        self.state.store.lock().await.cart.clone()
    }

    pub async fn orders(&self) -> Vec<Order> {
        self.state.store.lock().await.orders.clone()
    }

    /// Put a line straight into the cart, bypassing the API.
    pub async fn seed_cart(&self, product_id: &str, quantity: u32) -> CartItemId {
        let mut store = self.state.store.lock().await;
        let line = store.new_line(ProductId::new(product_id), quantity);
        let id = line.id.clone();
        store.cart.push(line);
        id
    }

    /// Answer the next order request with `status` and `body`, whatever the
    /// cart holds.
    pub async fn reject_next_order(&self, status: StatusCode, body: Value) {
        self.state.store.lock().await.reject_next_order = Some((status, body));
    }

    /// A storefront talking to this server, and the surface it draws into.
    ///
    /// # Errors
    ///
    /// Returns error if the client cannot be built.
    pub fn storefront(&self) -> Result<(Page, MemorySurface), BoxError> {
        connect(&self.base_url)
    }
}

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A storefront wired to the real HTTP client.
pub type Page = Storefront<ApiClient, MemorySurface>;

/// A storefront talking to `base_url`, and the surface it draws into.
///
/// # Errors
///
/// Returns error if the URL is invalid or the client cannot be built.
pub fn connect(base_url: &str) -> Result<(Page, MemorySurface), BoxError> {
    let config = StorefrontConfig::with_base_url(base_url)?;
    let api = ApiClient::new(&config)?;
    let surface = MemorySurface::new();
    Ok((Storefront::new(api, surface.clone()), surface))
}

/// A base URL nothing listens on.
///
/// # Errors
///
/// Returns error if no local port can be bound.
pub async fn unreachable_base_url() -> std::io::Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

/// A catalog product priced `cents / 100`.
#[must_use]
pub fn product(id: &str, name: &str, category: &str, cents: u32) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        category: Category::from(category),
        price: Price::new(Decimal::new(i64::from(cents), 2)).unwrap_or_default(),
        description: None,
    }
}

/// Three products across two categories, listed out of category order.
#[must_use]
pub fn sample_catalog() -> Vec<Product> {
    vec![
        product("p1", "Widget", "toys", 950),
        product("p2", "Novel", "books", 1200),
        product("p3", "Puzzle", "toys", 1999),
    ]
}

impl Store {
    fn new_line(&mut self, product_id: ProductId, quantity: u32) -> CartLineItem {
        self.next_line += 1;
        CartLineItem {
            id: CartItemId::new(format!("line-{}", self.next_line)),
            product_id,
            quantity,
            user_id: Some(UserId::new(DEMO_USER)),
        }
    }
}

fn detail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn record(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let target = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_string(), ToString::to_string);
    state
        .store
        .lock()
        .await
        .requests
        .push(format!("{} {target}", request.method()));
    next.run(request).await
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "storage": "memory" }))
}

async fn list_categories(State(state): State<MockState>) -> Json<Vec<Category>> {
    let store = state.store.lock().await;
    let categories: BTreeSet<Category> = store
        .products
        .iter()
        .map(|product| product.category.clone())
        .collect();
    Json(categories.into_iter().collect())
}

#[derive(Deserialize)]
struct ProductFilter {
    category: Option<String>,
}

async fn list_products(
    State(state): State<MockState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<Product>> {
    let store = state.store.lock().await;
    let products = store
        .products
        .iter()
        .filter(|product| match filter.category.as_deref() {
            Some(category) if !category.is_empty() => product.category.as_str() == category,
            _ => true,
        })
        .cloned()
        .collect();
    Json(products)
}

async fn list_cart(State(state): State<MockState>) -> Json<Vec<CartLineItem>> {
    Json(state.store.lock().await.cart.clone())
}

async fn add_cart_item(
    State(state): State<MockState>,
    Json(payload): Json<CartItemCreate>,
) -> Response {
    let mut store = state.store.lock().await;
    if !store
        .products
        .iter()
        .any(|product| product.id == payload.product_id)
    {
        return detail(StatusCode::BAD_REQUEST, "Invalid product_id");
    }

    let line = store.new_line(payload.product_id, payload.quantity);
    store.cart.push(line.clone());
    Json(line).into_response()
}

async fn delete_cart_item(State(state): State<MockState>, Path(id): Path<String>) -> Json<Value> {
    let mut store = state.store.lock().await;
    store.cart.retain(|line| line.id.as_str() != id);
    Json(json!({ "status": "deleted", "id": id }))
}

async fn create_order(State(state): State<MockState>) -> Response {
    let mut store = state.store.lock().await;
    if let Some((status, body)) = store.reject_next_order.take() {
        return (status, Json(body)).into_response();
    }
    if store.cart.is_empty() {
        return detail(StatusCode::BAD_REQUEST, "Cart is empty");
    }

    store.next_order += 1;
    let order = Order {
        id: OrderId::new(format!("ord-{}", store.next_order)),
        user_id: Some(UserId::new(DEMO_USER)),
        items: std::mem::take(&mut store.cart),
        status: Some(OrderStatus::Confirmed),
    };
    store.orders.push(order.clone());
    Json(order).into_response()
}

async fn list_orders(State(state): State<MockState>) -> Json<Vec<Order>> {
    Json(state.store.lock().await.orders.clone())
}
