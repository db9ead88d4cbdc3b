//! Backend readers over the commerce admin REST API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domain::customer::Customer;
use crate::domain::customer_group::CustomerGroup;
use crate::domain::order::Order;
use crate::domain::sales_channel::SalesChannel;
use crate::domain::types::EntityId;
use crate::list_view::ListResponse;
use crate::query::FetchQuery;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CustomerGroupReader, CustomerReader, OrderReader, SalesChannelReader};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Pulls the single entity stored under `key` out of a retrieve payload.
pub(crate) fn decode_entity<T: DeserializeOwned>(
    mut body: Map<String, Value>,
    key: &str,
) -> RepositoryResult<T> {
    let entity = body
        .remove(key)
        .ok_or_else(|| RepositoryError::Decode(format!("missing `{key}` in response")))?;
    Ok(serde_json::from_value(entity)?)
}

/// Pulls the rows stored under `key` and the `count` out of a list payload.
pub(crate) fn decode_list<T: DeserializeOwned>(
    mut body: Map<String, Value>,
    key: &str,
) -> RepositoryResult<ListResponse<T>> {
    let rows = body
        .remove(key)
        .ok_or_else(|| RepositoryError::Decode(format!("missing `{key}` in list response")))?;
    let data: Vec<T> = serde_json::from_value(rows)?;
    let count = body
        .get("count")
        .and_then(Value::as_u64)
        .unwrap_or(data.len() as u64);

    Ok(ListResponse { data, count })
}

#[derive(Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl HttpRepository {
    pub fn new(base_url: &str, api_token: &str) -> RepositoryResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RepositoryError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    async fn get_object(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> RepositoryResult<Map<String, Value>> {
        let url = format!("{}{path}", self.base_url);
        log::debug!("GET {url} {params:?}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RepositoryError::NotFound);
        }
        if !status.is_success() {
            return Err(RepositoryError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(response.json::<Map<String, Value>>().await?)
    }

    async fn fetch_list<T: DeserializeOwned>(
        &self,
        path: &str,
        key: &str,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<T>> {
        let body = self.get_object(path, &query.to_params()).await?;
        decode_list(body, key)
    }
}

#[async_trait]
impl OrderReader for HttpRepository {
    async fn list_orders(&self, query: &FetchQuery) -> RepositoryResult<ListResponse<Order>> {
        self.fetch_list("/admin/orders", "orders", query).await
    }

    async fn get_order(
        &self,
        order_id: &EntityId,
        params: &[(String, String)],
    ) -> RepositoryResult<Order> {
        let body = self
            .get_object(&format!("/admin/orders/{order_id}"), params)
            .await?;
        decode_entity(body, "order")
    }
}

#[async_trait]
impl CustomerReader for HttpRepository {
    async fn list_customers(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<Customer>> {
        self.fetch_list("/admin/customers", "customers", query).await
    }
}

#[async_trait]
impl CustomerGroupReader for HttpRepository {
    async fn list_customer_groups(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<CustomerGroup>> {
        self.fetch_list("/admin/customer-groups", "customer_groups", query)
            .await
    }

    async fn list_group_customers(
        &self,
        group_id: &EntityId,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<Customer>> {
        let path = format!("/admin/customer-groups/{group_id}/customers");
        self.fetch_list(&path, "customers", query).await
    }
}

#[async_trait]
impl SalesChannelReader for HttpRepository {
    async fn list_sales_channels(
        &self,
        query: &FetchQuery,
    ) -> RepositoryResult<ListResponse<SalesChannel>> {
        self.fetch_list("/admin/sales-channels", "sales_channels", query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn decodes_rows_and_count() {
        let response: ListResponse<SalesChannel> = decode_list(
            body(json!({
                "sales_channels": [{"id": "sc_1", "name": "Web"}],
                "count": 40,
                "offset": 0,
                "limit": 12
            })),
            "sales_channels",
        )
        .unwrap();

        assert_eq!(response.count, 40);
        assert_eq!(response.data[0].name, "Web");
    }

    #[test]
    fn missing_count_falls_back_to_row_count() {
        let response: ListResponse<Customer> =
            decode_list(body(json!({"customers": [{}, {}]})), "customers").unwrap();

        assert_eq!(response.count, 2);
    }

    #[test]
    fn missing_rows_key_is_a_decode_error() {
        let result: RepositoryResult<ListResponse<Order>> =
            decode_list(body(json!({"count": 1})), "orders");

        assert!(matches!(result, Err(RepositoryError::Decode(_))));
    }

    #[test]
    fn decodes_a_single_order() {
        let order: Order = decode_entity(
            body(json!({"order": {"id": "order_9", "display_id": 9, "total": 500}})),
            "order",
        )
        .unwrap();

        assert_eq!(order.id, "order_9");
        assert_eq!(order.total, 500);
    }
}
