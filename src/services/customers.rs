//! Customer list.

use crate::controller::QueryController;
use crate::domain::customer::Customer;
use crate::dto::api::ApiListResponse;
use crate::models::config::ServerConfig;
use crate::repository::CustomerReader;
use crate::services::ServiceResult;
use crate::services::list::{ListOutcome, ListRequest, run_list};

pub const CUSTOMERS_PATH: &str = "/customers";

const CUSTOMER_EXPAND: &str = "orders";

fn customer_controller(config: &ServerConfig, request: &ListRequest) -> QueryController {
    QueryController::with_state(
        CUSTOMERS_PATH,
        config.page_sizes.customers,
        request.state.clone(),
    )
    .with_additional(vec![("expand".to_string(), CUSTOMER_EXPAND.to_string())])
}

pub async fn load_customers<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ListOutcome<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.customers)?;
    let controller = customer_controller(config, &request);

    Ok(
        run_list(controller, request.action, "customers", |query| async move {
            repo.list_customers(&query).await
        })
        .await,
    )
}

pub async fn list_customers_api<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ApiListResponse<Customer>>
where
    R: CustomerReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.customers)?;
    let controller = customer_controller(config, &request);

    let response = repo.list_customers(&controller.fetch_query()).await?;
    Ok(ApiListResponse::new(controller.state(), response))
}
