//! Catalog browsing against the mock commerce API.

#![allow(clippy::unwrap_used)]

use cloudmart_core::Category;
use cloudmart_integration_tests::{MockCommerceApi, product, sample_catalog};
use cloudmart_storefront::api::endpoints;
use cloudmart_storefront::surface::{Container, Node};
use cloudmart_storefront::{ApiClient, Command, StorefrontConfig};

fn names(nodes: &[Node]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| match node {
            Node::CategoryOption { value } => value.to_string(),
            Node::ProductCard(card) => format!("{} {}", card.name, card.price),
            Node::CartLine(line) => line.text(),
        })
        .collect()
}

#[tokio::test]
async fn test_page_load_renders_catalog_and_empty_cart() {
    let server = MockCommerceApi::spawn(sample_catalog()).await.unwrap();
    let (storefront, surface) = server.storefront().unwrap();

    storefront.dispatch(Command::LoadPage).await.unwrap();

    assert_eq!(
        names(&surface.children(Container::CategorySelect)),
        vec!["books", "toys"]
    );
    assert_eq!(
        names(&surface.children(Container::ProductList)),
        vec!["Widget 9.50", "Novel 12.00", "Puzzle 19.99"]
    );
    assert!(surface.children(Container::CartList).is_empty());
    assert_eq!(surface.text(Container::CartSummary), "Items in cart: 0");
}

#[tokio::test]
async fn test_selecting_a_category_filters_products() {
    let server = MockCommerceApi::spawn(sample_catalog()).await.unwrap();
    let (storefront, surface) = server.storefront().unwrap();
    storefront.dispatch(Command::LoadPage).await.unwrap();

    let toys = surface
        .children(Container::CategorySelect)
        .into_iter()
        .find(|node| matches!(node, Node::CategoryOption { value } if value.as_str() == "toys"))
        .unwrap();
    storefront.activate(&toys).await.unwrap();

    assert_eq!(
        names(&surface.children(Container::ProductList)),
        vec!["Widget 9.50", "Puzzle 19.99"]
    );
    assert_eq!(server.count("GET /api/v1/products?category=toys").await, 1);

    storefront
        .dispatch(Command::SelectCategory(Category::default()))
        .await
        .unwrap();
    assert_eq!(surface.children(Container::ProductList).len(), 3);
}

#[tokio::test]
async fn test_category_with_reserved_characters_is_encoded() {
    let server = MockCommerceApi::spawn(vec![
        product("g1", "Rake", "home & garden", 1500),
        product("b1", "Atlas", "books", 3000),
    ])
    .await
    .unwrap();
    let (storefront, surface) = server.storefront().unwrap();

    storefront
        .dispatch(Command::SelectCategory(Category::from("home & garden")))
        .await
        .unwrap();

    assert_eq!(
        names(&surface.children(Container::ProductList)),
        vec!["Rake 15.00"]
    );
    assert_eq!(
        server
            .count("GET /api/v1/products?category=home%20%26%20garden")
            .await,
        1
    );
}

#[tokio::test]
async fn test_health_and_base_url_with_trailing_slash() {
    let server = MockCommerceApi::spawn(sample_catalog()).await.unwrap();
    let config = StorefrontConfig::with_base_url(&format!("{}/", server.base_url())).unwrap();
    let api = ApiClient::new(&config).unwrap();

    let health = endpoints::health(&api).await.unwrap();

    assert!(health.is_ok());
    assert_eq!(server.requests().await, vec!["GET /health"]);
}
