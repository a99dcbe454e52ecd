//! Order history and health checks.

use std::io::Write;

use cloudmart_core::Order;
use cloudmart_storefront::api::{Transport, endpoints};
use tracing::warn;

use super::CliError;

/// Print past orders, one per line.
///
/// # Errors
///
/// Returns error if the orders cannot be read or printed.
pub async fn list<T: Transport>(api: &T) -> Result<(), CliError> {
    let orders = endpoints::list_orders(api).await?;

    let mut out = std::io::stdout().lock();
    write_orders(&orders, &mut out)?;
    out.flush()?;
    Ok(())
}

fn write_orders(orders: &[Order], out: &mut impl Write) -> std::io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders yet.");
    }

    for order in orders {
        let status = order.status.map_or("unknown", |status| status.label());
        let lines: Vec<String> = order
            .items
            .iter()
            .map(|item| format!("{} x {}", item.product_id, item.quantity))
            .collect();
        writeln!(out, "{} [{status}] {}", order.id, lines.join(", "))?;
    }
    Ok(())
}

/// Check the API health endpoint.
///
/// # Errors
///
/// Returns error if the endpoint cannot be read or reports a status other
/// than `ok`.
pub async fn health<T: Transport>(api: &T) -> Result<(), CliError> {
    let health = endpoints::health(api).await?;

    let mut out = std::io::stdout().lock();
    writeln!(out, "status: {}", health.status)?;
    for (key, value) in &health.details {
        writeln!(out, "{key}: {value}")?;
    }
    out.flush()?;

    if !health.is_ok() {
        warn!(status = %health.status, "API reported unhealthy");
        return Err(CliError::Unhealthy(health.status));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn written(orders: &[Order]) -> String {
        let mut out = Vec::new();
        write_orders(orders, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_no_orders() {
        assert_eq!(written(&[]), "No orders yet.\n");
    }

    #[test]
    fn test_order_lines() {
        let orders: Vec<Order> = serde_json::from_value(json!([
            {
                "id": "ord_1",
                "status": "confirmed",
                "items": [
                    {"id": "l1", "product_id": "p1", "quantity": 2},
                    {"id": "l2", "product_id": "p2", "quantity": 1}
                ]
            },
            {"id": "ord_2"}
        ]))
        .unwrap();

        assert_eq!(
            written(&orders),
            "ord_1 [confirmed] p1 x 2, p2 x 1\nord_2 [unknown] \n"
        );
    }
}
