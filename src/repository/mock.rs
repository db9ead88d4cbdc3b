//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::customer::Customer;
use crate::domain::customer_group::CustomerGroup;
use crate::domain::order::Order;
use crate::domain::sales_channel::SalesChannel;
use crate::domain::types::EntityId;
use crate::list_view::ListResponse;
use crate::query::FetchQuery;
use crate::repository::errors::RepositoryResult;
use crate::repository::{CustomerGroupReader, CustomerReader, OrderReader, SalesChannelReader};

mock! {
    pub Repository {}

    #[async_trait]
    impl OrderReader for Repository {
        async fn list_orders(&self, query: &FetchQuery) -> RepositoryResult<ListResponse<Order>>;
        async fn get_order(
            &self,
            order_id: &EntityId,
            params: &[(String, String)],
        ) -> RepositoryResult<Order>;
    }

    #[async_trait]
    impl CustomerReader for Repository {
        async fn list_customers(
            &self,
            query: &FetchQuery,
        ) -> RepositoryResult<ListResponse<Customer>>;
    }

    #[async_trait]
    impl CustomerGroupReader for Repository {
        async fn list_customer_groups(
            &self,
            query: &FetchQuery,
        ) -> RepositoryResult<ListResponse<CustomerGroup>>;
        async fn list_group_customers(
            &self,
            group_id: &EntityId,
            query: &FetchQuery,
        ) -> RepositoryResult<ListResponse<Customer>>;
    }

    #[async_trait]
    impl SalesChannelReader for Repository {
        async fn list_sales_channels(
            &self,
            query: &FetchQuery,
        ) -> RepositoryResult<ListResponse<SalesChannel>>;
    }
}
