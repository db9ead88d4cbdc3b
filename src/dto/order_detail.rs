//! Read-only projection of a single order for the details page.

use serde::Serialize;
use serde_json::Value;

use crate::domain::order::{Address, LineItem, Order, TrackingLink};
use crate::dto::orders::{ErpSync, PaymentBadge, format_amount, is_truthy};

/// Prefix of an inline PDF carried in tracking link metadata.
const INLINE_PDF_MARKER: &str = "data:application/pdf;base64,JVB";
const INLINE_PDF_MIN_LEN: usize = 100;

/// A downloadable document attached to a tracking link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentLink {
    pub label: &'static str,
    pub href: String,
    /// File name for inline documents, `None` for plain links.
    pub download: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TrackingView {
    pub tracking_number: String,
    pub url: Option<String>,
    pub documents: Vec<DocumentLink>,
}

fn metadata_text<'a>(metadata: Option<&'a Value>, key: &str) -> Option<&'a str> {
    metadata
        .and_then(|m| m.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn inline_pdf(value: &str) -> bool {
    value.len() > INLINE_PDF_MIN_LEN && value.contains(INLINE_PDF_MARKER)
}

impl From<&TrackingLink> for TrackingView {
    fn from(link: &TrackingLink) -> Self {
        let url = link.url.clone().filter(|url| !url.is_empty());
        let number = &link.tracking_number;
        let metadata = link.metadata.as_ref();
        let mut documents = Vec::new();

        // Labels are only offered for links the carrier can be reached at.
        if url.is_some() {
            match metadata_text(metadata, "labelBase64PDF").filter(|pdf| inline_pdf(pdf)) {
                Some(pdf) => documents.push(DocumentLink {
                    label: "Download label",
                    href: pdf.to_string(),
                    download: Some(format!("{number}.pdf")),
                }),
                None => {
                    if let Some(label_url) = metadata_text(metadata, "labelUrl") {
                        documents.push(DocumentLink {
                            label: "Download label",
                            href: label_url.to_string(),
                            download: None,
                        });
                    }
                }
            }

            for (key, label) in [("CustomsInvoice", "Customs Invoice"), ("USMCA", "USMCA")] {
                if let Some(pdf) = metadata_text(metadata, key).filter(|pdf| inline_pdf(pdf)) {
                    documents.push(DocumentLink {
                        label,
                        href: pdf.to_string(),
                        download: Some(format!("{number}-{key}.pdf")),
                    });
                }
            }
        }

        Self {
            tracking_number: number.clone(),
            url,
            documents,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FulfillmentView {
    /// `Fulfillment #1`
    pub title: String,
    pub shipped: bool,
    pub canceled: bool,
    pub tracking: Vec<TrackingView>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LineView {
    pub title: String,
    pub variant_title: Option<String>,
    pub sku: Option<String>,
    pub holster: Option<String>,
    pub thumbnail: Option<String>,
    pub unit_price: String,
    pub quantity: u64,
    pub subtotal: String,
}

impl LineView {
    fn new(item: &LineItem, currency_code: &str) -> Self {
        let variant = item.variant.as_ref();
        let holster = item
            .metadata
            .as_ref()
            .and_then(|m| m.get("Holster"))
            .filter(|value| is_truthy(value))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        Self {
            title: item.title.clone(),
            variant_title: variant.and_then(|v| v.title.clone()),
            sku: variant
                .and_then(|v| v.sku.clone())
                .filter(|sku| !sku.is_empty()),
            holster,
            thumbnail: item.thumbnail.clone().filter(|t| !t.is_empty()),
            unit_price: format_amount(item.unit_price, currency_code),
            quantity: item.quantity,
            subtotal: format_amount(item.subtotal.unwrap_or(0), currency_code),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AddressView {
    pub name: String,
    pub lines: Vec<String>,
}

impl From<&Address> for AddressView {
    fn from(address: &Address) -> Self {
        let join = |parts: &[Option<&str>]| {
            parts
                .iter()
                .flatten()
                .filter(|part| !part.is_empty())
                .copied()
                .collect::<Vec<_>>()
                .join(" ")
        };
        let name = join(&[address.first_name.as_deref(), address.last_name.as_deref()]);
        let country = address.country_code.as_deref().map(str::to_uppercase);
        let lines = [
            address.company.clone(),
            address.address_1.clone(),
            address.address_2.clone(),
            Some(join(&[address.postal_code.as_deref(), address.city.as_deref()])),
            Some(join(&[address.province.as_deref(), country.as_deref()])),
        ]
        .into_iter()
        .flatten()
        .filter(|line| !line.is_empty())
        .collect();

        Self { name, lines }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderDetail {
    pub id: String,
    /// `#1042`
    pub display_id: String,
    /// `05 Mar 2024 10:15`
    pub created_at: String,
    pub status: String,
    pub email: String,
    pub phone: String,
    pub payment_providers: String,
    pub referral_code: Option<String>,
    pub payment: PaymentBadge,
    pub fulfillment_status: &'static str,
    pub currency_code: String,
    pub items: Vec<LineView>,
    pub fulfillments: Vec<FulfillmentView>,
    pub shipping_address: Option<AddressView>,
    pub billing_address: Option<AddressView>,
    pub erp: ErpSync,
    pub google_ads: bool,
    pub subtotal: String,
    pub shipping_total: String,
    pub tax_total: String,
    pub discount_total: String,
    pub total: String,
    /// Paid minus refunded.
    pub paid: String,
    pub invoice_url: String,
    pub packing_slip_url: String,
}

impl OrderDetail {
    /// Builds the page model; document URLs point at `backend_url`.
    pub fn new(order: &Order, backend_url: &str) -> Self {
        let backend = backend_url.trim_end_matches('/');
        let currency = order.currency_code.as_str();
        let cart = order.cart.as_ref();

        Self {
            id: order.id.clone(),
            display_id: format!("#{}", order.display_id),
            created_at: order
                .created_at
                .map(|date| date.format("%d %b %Y %H:%M").to_string())
                .unwrap_or_default(),
            status: order.status.clone().unwrap_or_default(),
            email: order.email.clone().unwrap_or_default(),
            phone: order
                .shipping_address
                .as_ref()
                .and_then(|a| a.phone.clone())
                .filter(|phone| !phone.is_empty())
                .unwrap_or_else(|| "N/A".to_string()),
            payment_providers: order
                .payments
                .iter()
                .map(|payment| capitalize(&payment.provider_id))
                .collect::<Vec<_>>()
                .join(", "),
            referral_code: cart
                .and_then(|cart| cart.pointer("/context/referral_code"))
                .and_then(Value::as_str)
                .filter(|code| !code.is_empty())
                .map(str::to_string),
            payment: PaymentBadge::from(&order.payment_status),
            fulfillment_status: order.fulfillment_status.as_str(),
            currency_code: order.currency_code.to_uppercase(),
            items: order
                .items
                .iter()
                .map(|item| LineView::new(item, currency))
                .collect(),
            fulfillments: order
                .fulfillments
                .iter()
                .enumerate()
                .map(|(index, fulfillment)| FulfillmentView {
                    title: format!("Fulfillment #{}", index + 1),
                    shipped: fulfillment.shipped_at.is_some(),
                    canceled: fulfillment.canceled_at.is_some(),
                    tracking: fulfillment
                        .tracking_links
                        .iter()
                        .map(TrackingView::from)
                        .collect(),
                })
                .collect(),
            shipping_address: order.shipping_address.as_ref().map(AddressView::from),
            billing_address: order.billing_address.as_ref().map(AddressView::from),
            erp: ErpSync::from_metadata(order.metadata.as_ref()),
            google_ads: cart
                .and_then(|cart| cart.pointer("/context/google_ads"))
                .is_some_and(is_truthy),
            subtotal: format_amount(order.subtotal, currency),
            shipping_total: format_amount(order.shipping_total, currency),
            tax_total: format_amount(order.tax_total, currency),
            discount_total: format_amount(order.discount_total, currency),
            total: format_amount(order.total, currency),
            paid: format_amount(order.paid_total - order.refunded_total, currency),
            invoice_url: format!(
                "{backend}/admin/invoice/{}/invoice-{}.pdf",
                order.id, order.display_id
            ),
            packing_slip_url: format!(
                "{backend}/admin/packing/{}/packing-slip-{}.pdf",
                order.id, order.display_id
            ),
        }
    }
}
