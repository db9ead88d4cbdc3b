use actix_web::{HttpRequest, HttpResponse, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::Backend;
use crate::routes::{base_context, redirect, render_list};
use crate::services::ServiceError;
use crate::services::customer_groups::{
    CUSTOMER_GROUPS_PATH, load_customer_groups, load_group_customers,
};

#[get("/customer-groups")]
pub async fn show_customer_groups(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let outcome =
        match load_customer_groups(repo.get_ref(), &server_config, req.query_string()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Failed to load customer groups: {err}");
                FlashMessage::error("Invalid list parameters.").send();
                return redirect(CUSTOMER_GROUPS_PATH);
            }
        };

    let context = base_context(&flash_messages, "customer_groups", &server_config);
    render_list(&tera, "customer_groups/index.html", outcome, context)
}

#[get("/customer-groups/{group_id}/customers")]
pub async fn show_group_customers(
    req: HttpRequest,
    group_id: web::Path<String>,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let group_id = group_id.into_inner();
    let outcome = match load_group_customers(
        repo.get_ref(),
        &server_config,
        &group_id,
        req.query_string(),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load customers of group {group_id}: {err}");
            FlashMessage::error("Invalid list parameters.").send();
            return redirect(&format!("{CUSTOMER_GROUPS_PATH}/{group_id}/customers"));
        }
    };

    let mut context = base_context(&flash_messages, "customer_groups", &server_config);
    context.insert("group_id", &group_id);
    render_list(&tera, "customer_groups/customers.html", outcome, context)
}
