use actix_web::{HttpRequest, Responder, get, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::Backend;
use crate::routes::{base_context, redirect, render_list};
use crate::services::sales_channels::{SALES_CHANNELS_PATH, load_sales_channels};

#[get("/sales-channels")]
pub async fn show_sales_channels(
    req: HttpRequest,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let outcome =
        match load_sales_channels(repo.get_ref(), &server_config, req.query_string()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                log::error!("Failed to load sales channels: {err}");
                FlashMessage::error("Invalid list parameters.").send();
                return redirect(SALES_CHANNELS_PATH);
            }
        };

    let context = base_context(&flash_messages, "sales_channels", &server_config);
    render_list(&tera, "sales_channels/index.html", outcome, context)
}
