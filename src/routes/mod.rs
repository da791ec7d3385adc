//! HTTP handlers rendering the product pages.

use actix_web::http::header;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages, Level};
use tera::{Context, Tera};

use crate::domain::notification::{Notification, NotificationLevel};
use crate::models::config::ServerConfig;

pub mod product_form;
pub mod products;

/// Registers every page handler.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(products::show_products)
        .service(products::confirm_delete_product)
        .service(products::delete_product)
        .service(product_form::new_product)
        .service(product_form::create_product);
}

pub fn alert_level_to_str(level: &Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

fn notification_level_to_str(level: NotificationLevel) -> &'static str {
    match level {
        NotificationLevel::Success => "success",
        NotificationLevel::Error => "danger",
    }
}

/// Context shared by every page: pending flash alerts, an optional inline
/// notification and banner timing.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    notification: Option<&Notification>,
    current_page: &str,
    server_config: &ServerConfig,
) -> Context {
    let mut alerts = flash_messages
        .iter()
        .map(|f| (f.content().to_string(), alert_level_to_str(&f.level())))
        .collect::<Vec<_>>();
    if let Some(notification) = notification {
        alerts.push((
            notification.message.clone(),
            notification_level_to_str(notification.level),
        ));
    }

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("notification_ttl_secs", &server_config.notification_ttl_secs);
    context
}

/// Queues a notification for the next rendered page.
pub fn flash_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => FlashMessage::success(notification.message.clone()).send(),
        NotificationLevel::Error => FlashMessage::error(notification.message.clone()).send(),
    }
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

pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
