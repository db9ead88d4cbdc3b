//! Actix-web handlers and the helpers they share.

use actix_session::Session;
use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera};

use crate::controller::tabs::{FilterTab, TabStore, TabStoreError};
use crate::models::config::{SALES_CHANNELS_FLAG, ServerConfig};
use crate::services::list::ListOutcome;

pub mod api;
pub mod customer_groups;
pub mod customers;
pub mod orders;
pub mod reports;
pub mod sales_channels;

const SAVED_TABS_KEY: &str = "order_tabs";

/// Maps flash message levels to Bootstrap alert classes.
pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// `303 See Other` to `location`.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// Context every page starts from: alerts, the active menu entry and
/// feature switches.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    current_page: &str,
    server_config: &ServerConfig,
) -> Context {
    let alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert(
        "sales_channels_enabled",
        &server_config.feature_flags.is_enabled(SALES_CHANNELS_FLAG),
    );
    context
}

/// Redirects or renders `template` with the page under `list`.
pub fn render_list<T: Serialize>(
    tera: &Tera,
    template: &str,
    outcome: ListOutcome<T>,
    mut context: Context,
) -> HttpResponse {
    match outcome {
        ListOutcome::Redirect(location) => redirect(&location),
        ListOutcome::Page(page) => {
            context.insert("list", &page);
            render_template(tera, template, &context)
        }
    }
}

/// Saved order tabs kept in the session cookie.
pub struct SessionTabStore {
    session: Session,
}

impl SessionTabStore {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl TabStore for SessionTabStore {
    fn load(&self) -> Result<Vec<FilterTab>, TabStoreError> {
        self.session
            .get::<Vec<FilterTab>>(SAVED_TABS_KEY)
            .map(Option::unwrap_or_default)
            .map_err(|e| TabStoreError(e.to_string()))
    }

    fn save(&self, tabs: &[FilterTab]) -> Result<(), TabStoreError> {
        self.session
            .insert(SAVED_TABS_KEY, tabs)
            .map_err(|e| TabStoreError(e.to_string()))
    }
}

#[actix_web::get("/")]
pub async fn show_index() -> HttpResponse {
    redirect(crate::services::orders::ORDERS_PATH)
}

/// Registers every dashboard route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(show_index)
        .service(orders::show_orders)
        .service(orders::show_order)
        .service(orders::apply_order_filters)
        .service(orders::save_order_tab)
        .service(orders::remove_order_tab)
        .service(customers::show_customers)
        .service(customers::export_customers)
        .service(customer_groups::show_customer_groups)
        .service(customer_groups::show_group_customers)
        .service(sales_channels::show_sales_channels)
        .service(reports::sales_report)
        .service(reports::shipping_report)
        .service(
            web::scope("/api")
                .service(api::api_v1_orders)
                .service(api::api_v1_customers)
                .service(api::api_v1_customer_groups)
                .service(api::api_v1_sales_channels),
        );
}
