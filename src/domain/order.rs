use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of an order. Only `Completed` counts as realized revenue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_revenue(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is not one of the five known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Cod,
    Transfer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub title: String,
    pub price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub is_pre_order: bool,
}

impl OrderItem {
    pub fn new(title: impl Into<String>, price: u64, quantity: u32) -> Self {
        Self {
            title: title.into(),
            price,
            quantity,
            is_pre_order: false,
        }
    }

    pub fn subtotal(&self) -> u64 {
        self.price.saturating_mul(u64::from(self.quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomerInfo {
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreOrderInfo {
    #[serde(default)]
    pub expected_time: String,
    #[serde(default)]
    pub notes: String,
}

/// Every order, keyed by the owning username.
pub type OrderBook = std::collections::BTreeMap<String, Vec<Order>>;

/// A customer order, stored under its owner's username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub date: DateTime<Utc>,
    pub status: OrderStatus,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub customer_info: CustomerInfo,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub has_pre_order: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_order_info: Option<PreOrderInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(id: impl Into<String>, date: DateTime<Utc>, status: OrderStatus, items: Vec<OrderItem>) -> Self {
        Self {
            id: id.into(),
            date,
            status,
            items,
            customer_info: CustomerInfo::default(),
            payment_method: PaymentMethod::default(),
            has_pre_order: false,
            pre_order_info: None,
            updated_at: None,
        }
    }

    /// Σ price × quantity. Never stored.
    pub fn total(&self) -> u64 {
        self.items.iter().map(OrderItem::subtotal).fold(0, u64::saturating_add)
    }

    /// True when the order or any of its lines is a pre-order.
    pub fn is_pre_order(&self) -> bool {
        self.has_pre_order || self.items.iter().any(|item| item.is_pre_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_parse_rejects_unknown() {
        assert_eq!("shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(
            "delivered".parse::<OrderStatus>(),
            Err(UnknownStatus("delivered".to_string()))
        );
        assert!("Completed".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let order = Order::new(
            "o1",
            date,
            OrderStatus::Pending,
            vec![OrderItem::new("Rice", 50_000, 2), OrderItem::new("Beans", 30_000, 1)],
        );
        assert_eq!(order.total(), 130_000);
    }

    #[test]
    fn test_hand_edited_amounts_saturate() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
        let huge = OrderItem::new("Gold", u64::MAX / 2, 3);
        assert_eq!(huge.subtotal(), u64::MAX);

        let order = Order::new("o1", date, OrderStatus::Completed, vec![huge, OrderItem::new("Rice", 1, 1)]);
        assert_eq!(order.total(), u64::MAX);
    }

    #[test]
    fn test_order_json_shape() {
        let json = r#"{
            "id": "o7",
            "date": "2024-03-02T10:15:00.000Z",
            "status": "processing",
            "items": [{"title": "Oats", "price": 85000, "quantity": 1, "isPreOrder": true}],
            "customerInfo": {"phone": "0900", "email": "a@b.c", "address": "Hanoi"},
            "paymentMethod": "transfer"
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.payment_method, PaymentMethod::Transfer);
        assert!(order.is_pre_order());
        assert!(!order.has_pre_order);
        assert_eq!(order.updated_at, None);

        let back = serde_json::to_value(&order).unwrap();
        assert_eq!(back["customerInfo"]["address"], "Hanoi");
        assert_eq!(back["items"][0]["isPreOrder"], true);
    }
}
