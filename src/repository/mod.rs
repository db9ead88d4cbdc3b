//! Readers for the backend lists shown by the dashboard.
//!
//! Every reader takes the [`FetchQuery`] produced by a list's controller and
//! returns one page of rows plus the total count.

use async_trait::async_trait;

use crate::domain::customer::Customer;
use crate::domain::customer_group::CustomerGroup;
use crate::domain::order::Order;
use crate::domain::sales_channel::SalesChannel;
use crate::domain::types::EntityId;
use crate::list_view::ListResponse;
use crate::query::FetchQuery;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod http;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use http::HttpRepository;
pub use memory::InMemoryRepository;

#[async_trait]
pub trait OrderReader: Send + Sync {
    async fn list_orders(&self, query: &FetchQuery) -> RepositoryResult<ListResponse<Order>>;

    /// One order with the relations named in `params` (`expand`, `fields`)
    /// expanded.
    async fn get_order(
        &self,
        order_id: &EntityId,
        params: &[(String, String)],
    ) -> RepositoryResult<Order>;
}

#[async_trait]
pub trait CustomerReader: Send + Sync {
    async fn list_customers(&self, query: &FetchQuery)
    -> RepositoryResult<ListResponse<Customer>>;
}

#[async_trait]
pub trait CustomerGroupReader: Send + Sync {
    async fn list_customer_groups(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<CustomerGroup>>;

    /// Members of one group.
    async fn list_group_customers(
        &self,
        group_id: &EntityId,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<Customer>>;
}

#[async_trait]
pub trait SalesChannelReader: Send + Sync {
    async fn list_sales_channels(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<SalesChannel>>;
}

/// Every list the dashboard reads. Handlers receive it as
/// `web::Data<dyn Backend>` so the HTTP and in-memory repositories are
/// interchangeable.
pub trait Backend: OrderReader + CustomerReader + CustomerGroupReader + SalesChannelReader {}

impl<T> Backend for T where T: OrderReader + CustomerReader + CustomerGroupReader + SalesChannelReader
{}
