//! Data transfer objects rendered by templates and the JSON API.

pub mod api;
pub mod list;
pub mod order_detail;
pub mod orders;
