use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use chrono::Local;
use tera::Tera;

use crate::forms::reports::ReportForm;
use crate::models::config::ServerConfig;
use crate::repository::Backend;
use crate::routes::{base_context, redirect, render_list};
use crate::services::customers::{CUSTOMERS_PATH, load_customers};
use crate::services::reports::customer_export_url;

#[get("/customers")]
pub async fn show_customers(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let outcome = match load_customers(repo.get_ref(), &server_config, req.query_string()).await {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Failed to load customers: {err}");
            FlashMessage::error("Invalid list parameters.").send();
            return redirect(CUSTOMERS_PATH);
        }
    };

    let context = base_context(&flash_messages, "customers", &server_config);
    render_list(&tera, "customers/index.html", outcome, context)
}

#[get("/customers/export")]
pub async fn export_customers(
    web::Query(form): web::Query<ReportForm>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let today = Local::now().date_naive();
    match customer_export_url(&server_config, &form, today) {
        Ok(url) => redirect(&url),
        Err(err) => {
            FlashMessage::error(format!("Export failed: {err}")).send();
            redirect(CUSTOMERS_PATH)
        }
    }
}
