//! Forms posted from the order list.

use serde::Deserialize;
use validator::Validate;

use crate::forms::FormError;
use crate::query::{FilterValue, Filters};

#[derive(Debug, Default, Deserialize)]
/// Filter panel of the order list. Repeated keys carry multiple values, so
/// the body is decoded with `serde_html_form`.
pub struct FiltersForm {
    /// Query string of the list the form was submitted from.
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub fulfillment_status: Vec<String>,
    #[serde(default)]
    pub payment_status: Vec<String>,
    #[serde(default)]
    pub region_id: Option<String>,
}

impl FiltersForm {
    pub fn from_body(body: &[u8]) -> Result<Self, FormError> {
        serde_html_form::from_bytes(body).map_err(|e| FormError::Malformed(e.to_string()))
    }

    pub fn into_filters(self) -> Filters {
        let mut filters = Filters::new();
        let lists = [
            ("fulfillment_status", self.fulfillment_status),
            ("payment_status", self.payment_status),
        ];
        for (key, values) in lists {
            let values: Vec<String> = values
                .into_iter()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .collect();
            if !values.is_empty() {
                filters.insert(key.to_string(), FilterValue::Many(values));
            }
        }
        if let Some(region) = self.region_id.map(|r| r.trim().to_string()) {
            if !region.is_empty() {
                filters.insert("region_id".to_string(), FilterValue::Single(region));
            }
        }
        filters
    }
}

#[derive(Debug, Deserialize, Validate)]
/// Saves the active filters as a named tab.
pub struct SaveTabForm {
    #[serde(default)]
    pub query: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveTabForm {
    #[serde(default)]
    pub query: String,
    #[validate(length(min = 1))]
    pub name: String,
}
