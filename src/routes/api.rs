use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use serde::Serialize;

use crate::models::config::ServerConfig;
use crate::repository::Backend;
use crate::services::customer_groups::list_customer_groups_api;
use crate::services::customers::list_customers_api;
use crate::services::orders::list_orders_api;
use crate::services::sales_channels::list_sales_channels_api;
use crate::services::{ServiceError, ServiceResult};

fn json_or_error<T: Serialize>(result: ServiceResult<T>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(ServiceError::NotFound) => HttpResponse::NotFound().finish(),
        Err(err @ (ServiceError::Query(_) | ServiceError::Form(_) | ServiceError::Report(_))) => {
            HttpResponse::BadRequest().body(err.to_string())
        }
        Err(err @ ServiceError::Backend(_)) => {
            log::error!("Failed to list rows: {err}");
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/v1/orders")]
pub async fn api_v1_orders(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    json_or_error(list_orders_api(repo.get_ref(), &server_config, req.query_string()).await)
}

#[get("/v1/customers")]
pub async fn api_v1_customers(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    json_or_error(list_customers_api(repo.get_ref(), &server_config, req.query_string()).await)
}

#[get("/v1/customer-groups")]
pub async fn api_v1_customer_groups(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    json_or_error(
        list_customer_groups_api(repo.get_ref(), &server_config, req.query_string()).await,
    )
}

#[get("/v1/sales-channels")]
pub async fn api_v1_sales_channels(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    json_or_error(
        list_sales_channels_api(repo.get_ref(), &server_config, req.query_string()).await,
    )
}
