//! Order payloads as returned by the backend `/admin/orders` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fulfillment state of an order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    NotFulfilled,
    PartiallyFulfilled,
    Fulfilled,
    PartiallyShipped,
    Shipped,
    PartiallyReturned,
    Returned,
    Canceled,
    RequiresAction,
    #[default]
    #[serde(other)]
    Unknown,
}

impl FulfillmentStatus {
    /// Wire value used by the backend and in URL filters.
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentStatus::NotFulfilled => "not_fulfilled",
            FulfillmentStatus::PartiallyFulfilled => "partially_fulfilled",
            FulfillmentStatus::Fulfilled => "fulfilled",
            FulfillmentStatus::PartiallyShipped => "partially_shipped",
            FulfillmentStatus::Shipped => "shipped",
            FulfillmentStatus::PartiallyReturned => "partially_returned",
            FulfillmentStatus::Returned => "returned",
            FulfillmentStatus::Canceled => "canceled",
            FulfillmentStatus::RequiresAction => "requires_action",
            FulfillmentStatus::Unknown => "unknown",
        }
    }
}

/// Payment state of an order.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    NotPaid,
    Awaiting,
    Captured,
    PartiallyRefunded,
    Refunded,
    Canceled,
    RequiresAction,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderCustomer {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Address {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub postal_code: Option<String>,
    pub country_code: Option<String>,
    pub phone: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProductVariant {
    pub sku: Option<String>,
    pub title: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LineItem {
    pub id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub variant: Option<ProductVariant>,
    pub quantity: u64,
    /// Unit price in the smallest currency unit.
    pub unit_price: i64,
    pub subtotal: Option<i64>,
    pub metadata: Option<Value>,
}

/// A shipping label or tracking reference attached to a fulfillment.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackingLink {
    pub url: Option<String>,
    pub tracking_number: String,
    pub metadata: Option<Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Fulfillment {
    pub id: String,
    pub tracking_links: Vec<TrackingLink>,
    pub shipped_at: Option<DateTime<Utc>>,
    pub canceled_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Payment {
    pub id: String,
    pub provider_id: String,
    pub amount: i64,
    pub amount_refunded: i64,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OrderSalesChannel {
    pub id: String,
    pub name: String,
}

/// Order summary row. Unknown or missing fields fall back to defaults so a
/// partially expanded payload still renders.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Order {
    pub id: String,
    pub display_id: u64,
    pub status: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub email: Option<String>,
    pub customer: Option<OrderCustomer>,
    pub shipping_address: Option<Address>,
    pub billing_address: Option<Address>,
    pub fulfillment_status: FulfillmentStatus,
    pub payment_status: PaymentStatus,
    /// Total in the smallest currency unit.
    pub total: i64,
    pub currency_code: String,
    pub subtotal: i64,
    pub shipping_total: i64,
    pub tax_total: i64,
    pub discount_total: i64,
    pub paid_total: i64,
    pub refunded_total: i64,
    pub items: Vec<LineItem>,
    pub fulfillments: Vec<Fulfillment>,
    pub payments: Vec<Payment>,
    pub sales_channel: Option<OrderSalesChannel>,
    pub metadata: Option<Value>,
    pub cart: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_statuses_do_not_fail_decoding() {
        let order: Order = serde_json::from_str(
            r#"{"id":"order_1","display_id":12,"fulfillment_status":"teleported","payment_status":"captured"}"#,
        )
        .unwrap();

        assert_eq!(order.fulfillment_status, FulfillmentStatus::Unknown);
        assert_eq!(order.payment_status, PaymentStatus::Captured);
        assert!(order.items.is_empty());
    }

    #[test]
    fn decodes_fulfillment_tracking_links() {
        let order: Order = serde_json::from_str(
            r#"{"id":"order_2","fulfillments":[{"id":"ful_1","tracking_links":[{"tracking_number":"TN1","url":"https://carrier.test/TN1"}]}]}"#,
        )
        .unwrap();

        let link = &order.fulfillments[0].tracking_links[0];
        assert_eq!(link.tracking_number, "TN1");
        assert_eq!(link.url.as_deref(), Some("https://carrier.test/TN1"));
    }
}
