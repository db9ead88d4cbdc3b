use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::FlashMessage;
use chrono::Local;

use crate::forms::reports::ReportForm;
use crate::models::config::ServerConfig;
use crate::reports::Report;
use crate::routes::redirect;
use crate::services::orders::ORDERS_PATH;
use crate::services::reports::report_url;

fn redirect_to_report(report: Report, form: &ReportForm, server_config: &ServerConfig) -> HttpResponse {
    let today = Local::now().date_naive();
    match report_url(server_config, report, form, today) {
        Ok(url) => redirect(&url),
        Err(err) => {
            FlashMessage::error(format!("Failed to build {report}: {err}")).send();
            redirect(ORDERS_PATH)
        }
    }
}

#[get("/reports/sales")]
pub async fn sales_report(
    web::Query(form): web::Query<ReportForm>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    redirect_to_report(Report::Sales, &form, &server_config)
}

#[get("/reports/shipping")]
pub async fn shipping_report(
    web::Query(form): web::Query<ReportForm>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    redirect_to_report(Report::Shipping, &form, &server_config)
}
