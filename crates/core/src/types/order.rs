//! Order types.

use std::num::FpCategory;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::cart::CartLineItem;
use super::id::{OrderId, UserId};
use super::status::OrderStatus;

/// An order produced by a checkout attempt.
///
/// Only `id` is guaranteed; the remaining fields are filled in when the
/// server includes them. `items` is a display snapshot: lines that do not
/// decode are dropped rather than failing the whole order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    #[serde(
        default,
        deserialize_with = "lenient_items",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub items: Vec<CartLineItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<CartLineItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(items)
}

/// Structured failure body returned when an order cannot be placed.
///
/// `detail` is usually a string, but validation failures may carry a list
/// or object, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OrderFailure {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl OrderFailure {
    /// Message shown when the server gives no `detail`.
    pub const GENERIC_MESSAGE: &'static str = "Unable to place order";

    /// The server's detail, or the generic message when it is missing or
    /// falsy (null, `""`, `false`, `0`).
    #[must_use]
    pub fn message(&self) -> String {
        match &self.detail {
            Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
            None | Some(Value::Null | Value::String(_) | Value::Bool(false)) => {
                Self::GENERIC_MESSAGE.to_string()
            }
            Some(Value::Number(n))
                if n.as_f64().map(f64::classify) == Some(FpCategory::Zero) =>
            {
                Self::GENERIC_MESSAGE.to_string()
            }
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_order() {
        let order: Order = serde_json::from_str(r#"{"id":"ord_1"}"#).unwrap();
        assert_eq!(order.id.as_str(), "ord_1");
        assert!(order.items.is_empty());
        assert!(order.status.is_none());
    }

    #[test]
    fn test_full_order() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "ord_2",
                "user_id": "demo",
                "items": [{"id": "l1", "product_id": "p1", "quantity": 1}],
                "status": "confirmed"
            }"#,
        )
        .unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.status, Some(OrderStatus::Confirmed));
    }

    #[test]
    fn test_failure_detail() {
        let failure: OrderFailure =
            serde_json::from_str(r#"{"detail":"out of stock"}"#).unwrap();
        assert_eq!(failure.message(), "out of stock");
    }

    #[test]
    fn test_failure_without_detail_is_generic() {
        let failure: OrderFailure = serde_json::from_str("{}").unwrap();
        assert_eq!(failure.message(), "Unable to place order");

        let empty: OrderFailure = serde_json::from_str(r#"{"detail":""}"#).unwrap();
        assert_eq!(empty.message(), "Unable to place order");
    }

    #[test]
    fn test_falsy_detail_is_generic() {
        for body in [
            r#"{"detail":0}"#,
            r#"{"detail":0.0}"#,
            r#"{"detail":false}"#,
            r#"{"detail":null}"#,
        ] {
            let failure: OrderFailure = serde_json::from_str(body).unwrap();
            assert_eq!(failure.message(), "Unable to place order", "body {body}");
        }

        let code: OrderFailure = serde_json::from_str(r#"{"detail":409}"#).unwrap();
        assert_eq!(code.message(), "409");
    }

    #[test]
    fn test_malformed_lines_do_not_fail_the_order() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": "ord_3",
                "items": [
                    {"id": "l1", "product_id": "p1", "quantity": 1},
                    {"id": "l2", "quantity": "many"}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(order.id.as_str(), "ord_3");
        assert_eq!(order.items.len(), 1);

        let odd: Order = serde_json::from_str(r#"{"id":"ord_4","items":"n/a"}"#).unwrap();
        assert!(odd.items.is_empty());

        let null: Order = serde_json::from_str(r#"{"id":"ord_5","items":null}"#).unwrap();
        assert!(null.items.is_empty());
    }

    #[test]
    fn test_structured_detail_is_rendered_as_json() {
        let failure: OrderFailure =
            serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert_eq!(failure.message(), r#"[{"msg":"field required"}]"#);
    }
}
