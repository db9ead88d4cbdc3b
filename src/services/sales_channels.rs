//! Sales channel list.

use crate::controller::QueryController;
use crate::domain::sales_channel::SalesChannel;
use crate::dto::api::ApiListResponse;
use crate::models::config::ServerConfig;
use crate::repository::SalesChannelReader;
use crate::services::ServiceResult;
use crate::services::list::{ListOutcome, ListRequest, run_list};

pub const SALES_CHANNELS_PATH: &str = "/sales-channels";

pub async fn load_sales_channels<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ListOutcome<SalesChannel>>
where
    R: SalesChannelReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.sales_channels)?;
    let controller = QueryController::with_state(
        SALES_CHANNELS_PATH,
        config.page_sizes.sales_channels,
        request.state,
    );

    Ok(run_list(
        controller,
        request.action,
        "sales channels",
        |query| async move { repo.list_sales_channels(&query).await },
    )
    .await)
}

pub async fn list_sales_channels_api<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ApiListResponse<SalesChannel>>
where
    R: SalesChannelReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.sales_channels)?;
    let controller = QueryController::with_state(
        SALES_CHANNELS_PATH,
        config.page_sizes.sales_channels,
        request.state,
    );

    let response = repo
        .list_sales_channels(&controller.fetch_query())
        .await?;
    Ok(ApiListResponse::new(controller.state(), response))
}
