//! Rendering surface abstraction.
//!
//! Controllers never own a view. They draw into an injected [`Surface`]
//! that maps logical [`Container`]s to elements supporting three
//! operations: clear children, append a child, set text.
//!
//! Surfaces take `&self` so several in-flight operations can write to the
//! same one, the way event handlers share a document.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use cloudmart_core::{CartItemId, CartLineItem, Category, Product, ProductId};

use crate::command::Command;

/// Logical containers the controllers render into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Container {
    CategorySelect,
    ProductList,
    CartList,
    CartSummary,
    OrderStatus,
}

impl Container {
    /// Every container, in page order.
    pub const ALL: [Self; 5] = [
        Self::CategorySelect,
        Self::ProductList,
        Self::CartList,
        Self::CartSummary,
        Self::OrderStatus,
    ];
}

/// Display data for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    /// Two-decimal price text without currency symbol (e.g. "9.50").
    pub price: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price.display(),
        }
    }
}

/// Display data for one cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLineView {
    /// Line text, e.g. "p1 x 2".
    #[must_use]
    pub fn text(&self) -> String {
        format!("{} x {}", self.product_id, self.quantity)
    }
}

impl From<&CartLineItem> for CartLineView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.clone(),
            product_id: line.product_id.clone(),
            quantity: line.quantity,
        }
    }
}

/// One rendered entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A selectable entry of the category filter.
    CategoryOption { value: Category },
    /// A product in the catalog list.
    ProductCard(ProductCard),
    /// A line in the cart list.
    CartLine(CartLineView),
}

impl Node {
    /// The command this node triggers when activated.
    #[must_use]
    pub fn command(&self) -> Command {
        match self {
            Self::CategoryOption { value } => Command::SelectCategory(value.clone()),
            Self::ProductCard(card) => Command::AddToCart(card.id.clone()),
            Self::CartLine(line) => Command::RemoveFromCart(line.id.clone()),
        }
    }
}

/// Capability set the controllers need from a view.
pub trait Surface {
    /// Remove every child of `container`.
    fn clear(&self, container: Container);

    /// Append one entity to `container`.
    fn append(&self, container: Container, node: Node);

    /// Replace the text content of `container`.
    fn set_text(&self, container: Container, text: &str);
}

// =============================================================================
// MemorySurface
// =============================================================================

/// Contents of one container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub children: Vec<Node>,
    pub text: String,
}

/// In-memory surface.
///
/// Clones share the same elements, so a clone handed to the controllers
/// can be inspected from outside.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    inner: Arc<Mutex<HashMap<Container, Element>>>,
}

impl MemorySurface {
    /// Create an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_elements<R>(&self, f: impl FnOnce(&mut HashMap<Container, Element>) -> R) -> R {
        // Elements stay structurally valid even if a render panicked
        let mut elements = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut elements)
    }

    /// Snapshot of one container.
    #[must_use]
    pub fn element(&self, container: Container) -> Element {
        self.with_elements(|elements| elements.get(&container).cloned().unwrap_or_default())
    }

    /// Children of `container`.
    #[must_use]
    pub fn children(&self, container: Container) -> Vec<Node> {
        self.element(container).children
    }

    /// Text content of `container`.
    #[must_use]
    pub fn text(&self, container: Container) -> String {
        self.element(container).text
    }

    /// The `index`-th child of `container`, if rendered.
    #[must_use]
    pub fn node(&self, container: Container, index: usize) -> Option<Node> {
        self.with_elements(|elements| {
            elements
                .get(&container)
                .and_then(|element| element.children.get(index).cloned())
        })
    }
}

impl Surface for MemorySurface {
    fn clear(&self, container: Container) {
        self.with_elements(|elements| {
            elements.entry(container).or_default().children.clear();
        });
    }

    fn append(&self, container: Container, node: Node) {
        self.with_elements(|elements| {
            elements.entry(container).or_default().children.push(node);
        });
    }

    fn set_text(&self, container: Container, text: &str) {
        self.with_elements(|elements| {
            text.clone_into(&mut elements.entry(container).or_default().text);
        });
    }
}
