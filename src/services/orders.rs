//! Order list: tabs, filters and backend expansions.

use crate::controller::QueryController;
use crate::controller::tabs::{TabStore, order_tabs};
use crate::domain::types::EntityId;
use crate::dto::api::ApiListResponse;
use crate::dto::order_detail::OrderDetail;
use crate::dto::orders::OrderRow;
use crate::forms::orders::{FiltersForm, RemoveTabForm, SaveTabForm};
use crate::list_view::ListResponse;
use crate::models::config::{SALES_CHANNELS_FLAG, ServerConfig};
use crate::query::QueryState;
use crate::repository::OrderReader;
use crate::services::list::{ListOutcome, ListRequest, run_list};
use crate::services::{ServiceError, ServiceResult};

pub const ORDERS_PATH: &str = "/orders";

const ORDER_EXPAND: &str = "customer,shipping_address,cart";
const SALES_CHANNEL_EXPAND: &str = ",shipping_address,sales_channel,items";
const ORDER_FIELDS: &str = "id,status,display_id,created_at,email,fulfillment_status,payment_status,total,currency_code,metadata";
const ORDER_DETAIL_EXPAND: &str = "customer,shipping_address,billing_address,items,items.variant,fulfillments,fulfillments.tracking_links,payments,cart,sales_channel";

/// `expand` and `fields` requested with every order page.
pub fn order_expansions(config: &ServerConfig) -> Vec<(String, String)> {
    let mut expand = ORDER_EXPAND.to_string();
    if config.feature_flags.is_enabled(SALES_CHANNELS_FLAG) {
        expand.push_str(SALES_CHANNEL_EXPAND);
    }
    vec![
        ("expand".to_string(), expand),
        ("fields".to_string(), ORDER_FIELDS.to_string()),
    ]
}

fn order_controller(
    config: &ServerConfig,
    state: QueryState,
    store: impl TabStore + 'static,
) -> QueryController {
    QueryController::with_state(ORDERS_PATH, config.page_sizes.orders, state)
        .with_additional(order_expansions(config))
        .with_tabs(order_tabs(), store)
}

fn controller_for_query(
    config: &ServerConfig,
    query: &str,
    store: impl TabStore + 'static,
) -> ServiceResult<QueryController> {
    let request = ListRequest::parse(query, config.page_sizes.orders)?;
    Ok(order_controller(config, request.state, store))
}

/// Loads the order page or applies the action carried by `query`.
pub async fn load_orders<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
    store: impl TabStore + 'static,
) -> ServiceResult<ListOutcome<OrderRow>>
where
    R: OrderReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.orders)?;
    let controller = order_controller(config, request.state, store);

    let outcome = run_list(controller, request.action, "orders", |query| async move {
        repo.list_orders(&query).await
    })
    .await;

    Ok(outcome.map_rows(|order| OrderRow::from(&order)))
}

/// Replaces the order filters and returns the location to redirect to.
pub fn apply_filters(
    config: &ServerConfig,
    form: FiltersForm,
    store: impl TabStore + 'static,
) -> ServiceResult<String> {
    let mut controller = controller_for_query(config, &form.query, store)?;
    controller.set_filters(form.into_filters());
    Ok(controller.location())
}

/// Saves the active filters as a tab.
pub fn save_tab(
    config: &ServerConfig,
    form: SaveTabForm,
    store: impl TabStore + 'static,
) -> ServiceResult<String> {
    let mut controller = controller_for_query(config, &form.query, store)?;
    controller.save_tab(&form.name).map_err(|err| {
        log::error!("Failed to save tab `{}`: {err}", form.name);
        ServiceError::Form(err.to_string())
    })?;
    Ok(controller.location())
}

/// Removes a saved tab. Removing the active tab leaves its filters applied.
pub fn remove_tab(
    config: &ServerConfig,
    form: RemoveTabForm,
    store: impl TabStore + 'static,
) -> ServiceResult<String> {
    let mut controller = controller_for_query(config, &form.query, store)?;
    if !controller.remove_tab(&form.name) {
        return Err(ServiceError::Form(format!(
            "Tab `{}` cannot be removed",
            form.name
        )));
    }
    Ok(controller.location())
}

/// Loads one order for the read-only details page.
pub async fn load_order<R>(
    repo: &R,
    config: &ServerConfig,
    order_id: &str,
) -> ServiceResult<OrderDetail>
where
    R: OrderReader + ?Sized,
{
    let order_id = EntityId::new(order_id).map_err(|_| ServiceError::NotFound)?;
    let params = [("expand".to_string(), ORDER_DETAIL_EXPAND.to_string())];

    let order = repo.get_order(&order_id, &params).await.map_err(|err| {
        log::error!("Failed to load order {order_id}: {err}");
        err
    })?;
    Ok(OrderDetail::new(&order, &config.backend_url))
}

/// Raw order page for the JSON API. Actions are not applied here.
pub async fn list_orders_api<R>(
    repo: &R,
    config: &ServerConfig,
    query: &str,
) -> ServiceResult<ApiListResponse<OrderRow>>
where
    R: OrderReader + ?Sized,
{
    let request = ListRequest::parse(query, config.page_sizes.orders)?;
    let controller = QueryController::with_state(ORDERS_PATH, config.page_sizes.orders, request.state)
        .with_additional(order_expansions(config));

    let response = repo.list_orders(&controller.fetch_query()).await?;
    let rows = response.data.iter().map(OrderRow::from).collect();
    Ok(ApiListResponse::new(
        controller.state(),
        ListResponse {
            data: rows,
            count: response.count,
        },
    ))
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::controller::tabs::InMemoryTabStore;
    use crate::domain::order::Order;
    use crate::models::config::{FeatureFlags, PageSizes};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn config(flags: &[&str]) -> ServerConfig {
        ServerConfig {
            domain: "localhost".to_string(),
            address: "127.0.0.1".to_string(),
            port: 8080,
            templates_dir: "templates/**/*".to_string(),
            secret: "secret".to_string(),
            backend_url: "http://backend".to_string(),
            backend_api_token: "token".to_string(),
            page_sizes: PageSizes::default(),
            feature_flags: flags.iter().copied().collect::<FeatureFlags>(),
        }
    }

    #[test]
    fn sales_channel_flag_extends_expansions() {
        let plain = order_expansions(&config(&[]));
        let extended = order_expansions(&config(&[SALES_CHANNELS_FLAG]));

        assert_eq!(plain[0].1, "customer,shipping_address,cart");
        assert_eq!(
            extended[0].1,
            "customer,shipping_address,cart,shipping_address,sales_channel,items"
        );
    }

    #[actix_web::test]
    async fn orders_are_fetched_with_expansions() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders()
            .withf(|query| {
                let params = query.to_params();
                params.contains(&("expand".to_string(), ORDER_EXPAND.to_string()))
                    && params.contains(&("offset".to_string(), "15".to_string()))
            })
            .times(1)
            .returning(|_| {
                Ok(ListResponse {
                    data: Vec::new(),
                    count: 40,
                })
            });

        let outcome = load_orders(
            &repo,
            &config(&[]),
            "offset=15&limit=15",
            InMemoryTabStore::default(),
        )
        .await
        .unwrap();

        let ListOutcome::Page(page) = outcome else {
            panic!("expected a page");
        };
        assert_eq!(page.descriptor.page_count, 3);
        assert_eq!(page.tabs.len(), 2);
    }

    #[actix_web::test]
    async fn tab_action_redirects_without_fetching() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders().times(0);

        let outcome = load_orders(
            &repo,
            &config(&[]),
            "offset=30&limit=15&q=jane&tab=complete",
            InMemoryTabStore::default(),
        )
        .await
        .unwrap();

        assert!(matches!(
            outcome,
            ListOutcome::Redirect(location)
                if location == "/orders?offset=0&limit=15&fulfillment_status=shipped&payment_status=captured"
        ));
    }

    #[actix_web::test]
    async fn api_surfaces_backend_errors() {
        let mut repo = MockRepository::new();
        repo.expect_list_orders().returning(|_| {
            Err(RepositoryError::Status {
                status: 502,
                path: "/admin/orders".to_string(),
            })
        });

        let result = list_orders_api(&repo, &config(&[]), "").await;

        assert!(matches!(result, Err(ServiceError::Backend(_))));
    }

    #[actix_web::test]
    async fn order_details_are_fetched_with_relations() {
        let mut repo = MockRepository::new();
        repo.expect_get_order()
            .withf(|order_id, params| {
                order_id.as_str() == "order_5"
                    && params[0].1.contains("fulfillments.tracking_links")
            })
            .times(1)
            .returning(|_, _| {
                Ok(Order {
                    id: "order_5".to_string(),
                    display_id: 5,
                    ..Order::default()
                })
            });

        let detail = load_order(&repo, &config(&[]), "order_5").await.unwrap();

        assert_eq!(detail.display_id, "#5");
        assert_eq!(
            detail.invoice_url,
            "http://backend/admin/invoice/order_5/invoice-5.pdf"
        );
    }

    #[actix_web::test]
    async fn missing_order_is_not_found() {
        let mut repo = MockRepository::new();
        repo.expect_get_order()
            .returning(|_, _| Err(RepositoryError::NotFound));

        let result = load_order(&repo, &config(&[]), "order_404").await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn saving_a_duplicate_tab_is_a_form_error() {
        let form = SaveTabForm {
            query: "fulfillment_status=shipped".to_string(),
            name: "complete".to_string(),
        };

        let result = save_tab(&config(&[]), form, InMemoryTabStore::default());

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
