//! Repository backed by in-process vectors, used for local demos and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::domain::customer::Customer;
use crate::domain::customer_group::CustomerGroup;
use crate::domain::order::Order;
use crate::domain::sales_channel::SalesChannel;
use crate::domain::types::EntityId;
use crate::list_view::ListResponse;
use crate::query::FetchQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerGroupReader, CustomerReader, OrderReader, SalesChannelReader};

#[derive(Clone, Debug, Default)]
pub struct InMemoryRepository {
    pub orders: Vec<Order>,
    pub customers: Vec<Customer>,
    pub customer_groups: Vec<CustomerGroup>,
    pub sales_channels: Vec<SalesChannel>,
    /// When set, every list call fails with a connection error.
    pub unavailable: bool,
}

fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn matches<T: Serialize>(row: &T, query: &FetchQuery, search_fields: &[&str]) -> bool {
    let Ok(Value::Object(fields)) = serde_json::to_value(row) else {
        return false;
    };

    let term = query.state.q.trim().to_lowercase();
    let found = term.is_empty()
        || search_fields.iter().any(|name| {
            fields
                .get(*name)
                .and_then(field_text)
                .is_some_and(|text| text.to_lowercase().contains(&term))
        });

    found
        && query.state.filters.iter().all(|(key, expected)| {
            let allowed = expected.values();
            fields
                .get(key)
                .and_then(field_text)
                .is_some_and(|actual| allowed.contains(&actual.as_str()))
        })
}

fn page<T: Serialize + Clone>(
    rows: &[T],
    query: &FetchQuery,
    search_fields: &[&str],
) -> ListResponse<T> {
    let matching: Vec<&T> = rows
        .iter()
        .filter(|row| matches(row, query, search_fields))
        .collect();

    let offset = usize::try_from(query.state.offset).unwrap_or(usize::MAX);
    let limit = usize::try_from(query.state.limit.get()).unwrap_or(usize::MAX);

    ListResponse {
        count: matching.len() as u64,
        data: matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect(),
    }
}

impl InMemoryRepository {
    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable {
            Err(RepositoryError::ConnectionError(
                "backend unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    /// Members of every group keyed by group id.
    pub fn group_members(&self) -> HashMap<&str, &[Customer]> {
        self.customer_groups
            .iter()
            .map(|group| (group.id.as_str(), group.customers.as_slice()))
            .collect()
    }
}

#[async_trait]
impl OrderReader for InMemoryRepository {
    async fn list_orders(&self, query: &FetchQuery) -> RepositoryResult<ListResponse<Order>> {
        self.check_available()?;
        Ok(page(&self.orders, query, &["email", "display_id"]))
    }

    async fn get_order(
        &self,
        order_id: &EntityId,
        _params: &[(String, String)],
    ) -> RepositoryResult<Order> {
        self.check_available()?;
        self.orders
            .iter()
            .find(|order| order.id == order_id.as_str())
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }
}

#[async_trait]
impl CustomerReader for InMemoryRepository {
    async fn list_customers(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<Customer>> {
        self.check_available()?;
        Ok(page(
            &self.customers,
            query,
            &["email", "first_name", "last_name"],
        ))
    }
}

#[async_trait]
impl CustomerGroupReader for InMemoryRepository {
    async fn list_customer_groups(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<CustomerGroup>> {
        self.check_available()?;
        Ok(page(&self.customer_groups, query, &["name"]))
    }

    async fn list_group_customers(
        &self,
        group_id: &EntityId,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<Customer>> {
        self.check_available()?;
        let members = self.group_members();
        let customers = members
            .get(group_id.as_str())
            .ok_or(RepositoryError::NotFound)?;
        Ok(page(customers, query, &["email", "first_name", "last_name"]))
    }
}

#[async_trait]
impl SalesChannelReader for InMemoryRepository {
    async fn list_sales_channels(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<SalesChannel>> {
        self.check_available()?;
        Ok(page(&self.sales_channels, query, &["name", "description"]))
    }
}
