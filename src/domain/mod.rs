//! Value objects and the remote entity payloads rendered by the dashboard.

pub mod customer;
pub mod customer_group;
pub mod order;
pub mod sales_channel;
pub mod types;
