use actix_session::Session;
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;
use validator::Validate;

use crate::forms::orders::{FiltersForm, RemoveTabForm, SaveTabForm};
use crate::models::config::ServerConfig;
use crate::repository::Backend;
use crate::routes::{SessionTabStore, base_context, redirect, render_list, render_template};
use crate::services::ServiceError;
use crate::services::orders::{self as order_service, ORDERS_PATH};

fn back_to(query: &str) -> String {
    if query.is_empty() {
        ORDERS_PATH.to_string()
    } else {
        format!("{ORDERS_PATH}?{query}")
    }
}

#[get("/orders")]
pub async fn show_orders(
    req: HttpRequest,
    session: Session,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let outcome = match order_service::load_orders(
        repo.get_ref(),
        &server_config,
        req.query_string(),
        SessionTabStore::new(session),
    )
    .await
    {
        Ok(outcome) => outcome,
        Err(err) => {
            log::error!("Failed to load orders: {err}");
            FlashMessage::error("Invalid list parameters.").send();
            return redirect(ORDERS_PATH);
        }
    };

    let context = base_context(&flash_messages, "orders", &server_config);
    render_list(&tera, "orders/index.html", outcome, context)
}

#[get("/orders/{order_id}")]
pub async fn show_order(
    order_id: web::Path<String>,
    repo: web::Data<dyn Backend>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let order = match order_service::load_order(repo.get_ref(), &server_config, &order_id).await {
        Ok(order) => order,
        Err(ServiceError::NotFound) => return HttpResponse::NotFound().finish(),
        Err(err) => {
            log::error!("Failed to load order {order_id}: {err}");
            FlashMessage::error("Failed to load order.").send();
            return redirect(ORDERS_PATH);
        }
    };

    let mut context = base_context(&flash_messages, "orders", &server_config);
    context.insert("order", &order);
    render_template(&tera, "orders/detail.html", &context)
}

#[post("/orders/filters")]
pub async fn apply_order_filters(
    body: web::Bytes,
    session: Session,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let form = match FiltersForm::from_body(&body) {
        Ok(form) => form,
        Err(err) => {
            log::error!("Failed to parse filters form: {err}");
            FlashMessage::error("Invalid filters.").send();
            return redirect(ORDERS_PATH);
        }
    };
    let query = form.query.clone();

    match order_service::apply_filters(&server_config, form, SessionTabStore::new(session)) {
        Ok(location) => redirect(&location),
        Err(err) => {
            log::error!("Failed to apply filters: {err}");
            FlashMessage::error("Invalid filters.").send();
            redirect(&back_to(&query))
        }
    }
}

#[post("/orders/tabs/save")]
pub async fn save_order_tab(
    session: Session,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SaveTabForm>,
) -> impl Responder {
    let back = back_to(&form.query);
    if let Err(err) = form.validate() {
        log::error!("Failed to validate tab form: {err}");
        FlashMessage::error("Tab name is required.").send();
        return redirect(&back);
    }

    let name = form.name.clone();
    match order_service::save_tab(&server_config, form, SessionTabStore::new(session)) {
        Ok(location) => {
            FlashMessage::success(format!("Tab \"{name}\" saved.")).send();
            redirect(&location)
        }
        Err(err) => {
            FlashMessage::error(format!("Failed to save tab: {err}")).send();
            redirect(&back)
        }
    }
}

#[post("/orders/tabs/remove")]
pub async fn remove_order_tab(
    session: Session,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<RemoveTabForm>,
) -> impl Responder {
    let back = back_to(&form.query);
    if let Err(err) = form.validate() {
        log::error!("Failed to validate tab form: {err}");
        return redirect(&back);
    }

    match order_service::remove_tab(&server_config, form, SessionTabStore::new(session)) {
        Ok(location) => redirect(&location),
        Err(err) => {
            log::error!("Failed to remove tab: {err}");
            FlashMessage::error(err.to_string()).send();
            redirect(&back)
        }
    }
}
