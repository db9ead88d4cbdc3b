//! Configuration model loaded from external sources.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::domain::types::PageSize;

/// Enables the sales channel column and the extra order expansions it needs.
pub const SALES_CHANNELS_FLAG: &str = "sales_channels";

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    pub secret: String,
    /// Base URL of the commerce backend, e.g. `https://api.example.com`.
    pub backend_url: String,
    pub backend_api_token: String,
    #[serde(default)]
    pub page_sizes: PageSizes,
    #[serde(default)]
    pub feature_flags: FeatureFlags,
}

fn page_size(value: u64) -> PageSize {
    PageSize::new(value).unwrap_or(PageSize::MIN)
}

/// Rows per page for each list.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PageSizes {
    pub orders: PageSize,
    pub customers: PageSize,
    pub customer_groups: PageSize,
    pub group_customers: PageSize,
    pub sales_channels: PageSize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            orders: page_size(15),
            customers: page_size(15),
            customer_groups: page_size(15),
            group_customers: page_size(15),
            sales_channels: page_size(12),
        }
    }
}

/// Names of the optional features switched on for this deployment.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FeatureFlags(BTreeSet<String>);

impl FeatureFlags {
    pub fn is_enabled(&self, flag: &str) -> bool {
        self.0.contains(flag)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
