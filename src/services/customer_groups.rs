//! Customer groups and the members of one group.

use crate::controller::QueryController;
use crate::domain::customer::Customer;
use crate::domain::customer_group::CustomerGroup;
use crate::domain::types::EntityId;
use crate::dto::api::ApiListResponse;
use crate::models::config::ServerConfig;
use crate::repository::CustomerGroupReader;
use crate::services::list::{ListOutcome, ListRequest, run_list};
use crate::services::{ServiceError, ServiceResult};

pub const CUSTOMER_GROUPS_PATH: &str = "/customer-groups";

fn group_controller(config: &ServerConfig, request: &ListRequest) -> QueryController {
    QueryController::with_state(
        CUSTOMER_GROUPS_PATH,
        config.page_sizes.customer_groups,
        request.state.clone(),
    )
    .with_additional(vec![("expand".to_string(), "customers".to_string())])
}

pub async fn load_customer_groups<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ListOutcome<CustomerGroup>>
where
    R: CustomerGroupReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.customer_groups)?;
    let controller = group_controller(config, &request);

    Ok(run_list(
        controller,
        request.action,
        "customer groups",
        |query| async move { repo.list_customer_groups(&query).await },
    )
    .await)
}

/// Members of group `group_id`, paged like any other list.
pub async fn load_group_customers<R>(
    repo: &R,
    config: &ServerConfig,
    group_id: &str,
    query: &str,
) -> ServiceResult<ListOutcome<Customer>>
where
    R: CustomerGroupReader + ?Sized,
{
    let group_id = EntityId::new(group_id).map_err(|_| ServiceError::NotFound)?;
    let request = ListRequest::parse(query, config.page_sizes.group_customers)?;
    let path = format!("{CUSTOMER_GROUPS_PATH}/{group_id}/customers");
    let controller =
        QueryController::with_state(path, config.page_sizes.group_customers, request.state);

    Ok(run_list(controller, request.action, "customers", |query| {
        let group_id = group_id.clone();
        async move { repo.list_group_customers(&group_id, &query).await }
    })
    .await)
}

pub async fn list_customer_groups_api<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ApiListResponse<CustomerGroup>>
where
    R: CustomerGroupReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.customer_groups)?;
    let controller = group_controller(config, &request);

    let response = repo
        .list_customer_groups(&controller.fetch_query())
        .await?;
    Ok(ApiListResponse::new(controller.state(), response))
}
