//! Plain-text rendering of a [`MemorySurface`].

use std::io::{self, Write};

use cloudmart_storefront::surface::{Container, MemorySurface, Node};

/// Write every container of `surface` to `out`, in page order.
///
/// Product cards and cart lines are numbered so the shell can refer to
/// them by index.
///
/// # Errors
///
/// Returns error if `out` cannot be written.
pub fn page(surface: &MemorySurface, out: &mut impl Write) -> io::Result<()> {
    for container in Container::ALL {
        section(surface, container, out)?;
    }
    Ok(())
}

fn section(
    surface: &MemorySurface,
    container: Container,
    out: &mut impl Write,
) -> io::Result<()> {
    match container {
        Container::CategorySelect => {
            let categories: Vec<String> = surface
                .children(container)
                .iter()
                .filter_map(|node| match node {
                    Node::CategoryOption { value } => Some(value.to_string()),
                    _ => None,
                })
                .collect();
            writeln!(out, "Categories: {}", categories.join(", "))
        }
        Container::ProductList => {
            writeln!(out, "Products:")?;
            for (index, node) in surface.children(container).iter().enumerate() {
                if let Node::ProductCard(card) = node {
                    writeln!(
                        out,
                        "  [{index}] {} ({}) Price: ${}",
                        card.name, card.category, card.price
                    )?;
                }
            }
            Ok(())
        }
        Container::CartList => {
            writeln!(out, "Cart:")?;
            for (index, node) in surface.children(container).iter().enumerate() {
                if let Node::CartLine(line) = node {
                    writeln!(out, "  [{index}] {}", line.text())?;
                }
            }
            Ok(())
        }
        Container::CartSummary => match surface.text(container) {
            summary if summary.is_empty() => Ok(()),
            summary => writeln!(out, "{summary}"),
        },
        Container::OrderStatus => match surface.text(container) {
            status if status.is_empty() => Ok(()),
            status => writeln!(out, "Order status: {status}"),
        },
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use cloudmart_core::{CartItemId, Category, ProductId};
    use cloudmart_storefront::Surface;
    use cloudmart_storefront::surface::{CartLineView, ProductCard};

    use super::*;

    fn rendered(surface: &MemorySurface) -> String {
        let mut out = Vec::new();
        page(surface, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_page() {
        let surface = MemorySurface::new();
        assert_eq!(rendered(&surface), "Categories: \nProducts:\nCart:\n");
    }

    #[test]
    fn test_full_page() {
        let surface = MemorySurface::new();
        for value in ["books", "toys"] {
            surface.append(
                Container::CategorySelect,
                Node::CategoryOption {
                    value: Category::from(value),
                },
            );
        }
        surface.append(
            Container::ProductList,
            Node::ProductCard(ProductCard {
                id: ProductId::new("p1"),
                name: "Widget".to_string(),
                category: Category::from("toys"),
                price: "9.50".to_string(),
            }),
        );
        surface.append(
            Container::CartList,
            Node::CartLine(CartLineView {
                id: CartItemId::new("l1"),
                product_id: ProductId::new("p1"),
                quantity: 2,
            }),
        );
        surface.set_text(Container::CartSummary, "Items in cart: 1");
        surface.set_text(Container::OrderStatus, "Order ord_1 confirmed!");

        assert_eq!(
            rendered(&surface),
            "Categories: books, toys\n\
             Products:\n  [0] Widget (toys) Price: $9.50\n\
             Cart:\n  [0] p1 x 2\n\
             Items in cart: 1\n\
             Order status: Order ord_1 confirmed!\n"
        );
    }
}
