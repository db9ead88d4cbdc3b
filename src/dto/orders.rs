//! Table projection of backend orders.

use serde::Serialize;
use serde_json::Value;

use crate::domain::order::{LineItem, Order, PaymentStatus};

/// Label and colour of the payment status dot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentBadge {
    pub label: &'static str,
    pub variant: &'static str,
}

impl From<&PaymentStatus> for PaymentBadge {
    fn from(status: &PaymentStatus) -> Self {
        let (label, variant) = match status {
            PaymentStatus::Captured => ("Paid", "success"),
            PaymentStatus::Awaiting => ("Awaiting", "default"),
            PaymentStatus::RequiresAction => ("Requires action", "danger"),
            PaymentStatus::Canceled => ("Canceled", "warning"),
            _ => ("N/A", "primary"),
        };
        Self { label, variant }
    }
}

/// ERP synchronisation markers stored in the order metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ErpSync {
    pub sales_order: bool,
    pub delivery_order: bool,
    pub has_errors: bool,
}

impl ErpSync {
    pub(crate) fn from_metadata(metadata: Option<&Value>) -> Self {
        let Some(sync) = metadata.and_then(|m| m.get("_odoo_order_create")) else {
            return Self::default();
        };
        let present = |key: &str| sync.get(key).is_some_and(is_truthy);

        Self {
            sales_order: present("_odoo_order_id"),
            delivery_order: present("_odoo_delivery_order_id"),
            has_errors: sync
                .get("_errors")
                .and_then(Value::as_array)
                .is_some_and(|errors| !errors.is_empty()),
        }
    }

    pub fn sales_marker(&self) -> &'static str {
        if self.sales_order { "S" } else { "-" }
    }

    pub fn delivery_marker(&self) -> &'static str {
        if self.delivery_order { "D" } else { "-" }
    }
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn sku(item: &LineItem) -> String {
    let variant = item.variant.as_ref();
    if let Some(sku) = variant.and_then(|v| v.sku.as_deref()).filter(|s| !s.is_empty()) {
        sku.to_string()
    } else if let Some(title) = variant
        .and_then(|v| v.title.as_deref())
        .filter(|t| !t.is_empty())
    {
        format!("{} ({title})", item.title)
    } else {
        item.title.clone()
    }
}

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code {
        "usd" => Some("$"),
        "eur" => Some("€"),
        "gbp" => Some("£"),
        "dkk" | "sek" | "nok" => Some("kr"),
        "pln" => Some("zł"),
        "chf" => Some("CHF"),
        _ => None,
    }
}

/// `12.50 €`-style amount from minor units.
pub fn format_amount(amount: i64, currency_code: &str) -> String {
    let code = currency_code.to_lowercase();
    let sign = if amount < 0 { "-" } else { "" };
    let abs = amount.unsigned_abs();
    let value = format!("{sign}{}.{:02}", abs / 100, abs % 100);

    match currency_symbol(&code) {
        Some(symbol) => format!("{value} {symbol}"),
        None => value,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderRow {
    pub id: String,
    /// `#1042`
    pub display_id: String,
    /// `05 Mar 2024`, empty when the backend sent no date.
    pub created_at: String,
    pub customer_name: String,
    pub email: String,
    pub fulfillment_status: &'static str,
    pub payment: PaymentBadge,
    pub skus: Vec<String>,
    pub sales_channel: String,
    pub erp: ErpSync,
    pub google_ads: bool,
    pub total: String,
    pub currency_code: String,
    pub country_code: String,
}

impl From<&Order> for OrderRow {
    fn from(order: &Order) -> Self {
        let customer = order.customer.as_ref();
        let shipping = order.shipping_address.as_ref();
        let first_name = customer
            .and_then(|c| c.first_name.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| shipping.and_then(|a| a.first_name.as_deref()));
        let last_name = customer
            .and_then(|c| c.last_name.as_deref())
            .filter(|s| !s.is_empty())
            .or_else(|| shipping.and_then(|a| a.last_name.as_deref()));
        let customer_name = [first_name, last_name]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let google_ads = order
            .cart
            .as_ref()
            .and_then(|cart| cart.pointer("/context/google_ads"))
            .is_some_and(is_truthy);

        Self {
            id: order.id.clone(),
            display_id: format!("#{}", order.display_id),
            created_at: order
                .created_at
                .map(|date| date.format("%d %b %Y").to_string())
                .unwrap_or_default(),
            customer_name,
            email: order.email.clone().unwrap_or_default(),
            fulfillment_status: order.fulfillment_status.as_str(),
            payment: PaymentBadge::from(&order.payment_status),
            skus: order.items.iter().map(sku).collect(),
            sales_channel: order
                .sales_channel
                .as_ref()
                .map(|channel| channel.name.clone())
                .unwrap_or_else(|| "N/A".to_string()),
            erp: ErpSync::from_metadata(order.metadata.as_ref()),
            google_ads,
            total: format_amount(order.total, &order.currency_code),
            currency_code: order.currency_code.to_uppercase(),
            country_code: shipping
                .and_then(|a| a.country_code.as_deref())
                .unwrap_or_default()
                .to_uppercase(),
        }
    }
}
