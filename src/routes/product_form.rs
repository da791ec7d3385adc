use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::Deserialize;
use tera::Tera;

use crate::forms::product::ProductDraft;
use crate::gateway::HttpGateway;
use crate::models::config::ServerConfig;
use crate::routes::{base_context, render_template};
use crate::services::product_form::{ProductFormController, SubmitOutcome};

/// Submitted creation form: the draft plus the button that was pressed.
#[derive(Debug, Deserialize)]
pub struct ProductFormParams {
    #[serde(flatten)]
    pub draft: ProductDraft,
    #[serde(default)]
    pub action: Option<String>,
}

impl ProductFormParams {
    fn is_reset(&self) -> bool {
        self.action.as_deref() == Some("reset")
    }
}

fn redirect_delay(server_config: &ServerConfig) -> Duration {
    Duration::from_secs(server_config.redirect_delay_secs)
}

fn render_form(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    server_config: &ServerConfig,
    controller: &ProductFormController,
) -> HttpResponse {
    let mut context = base_context(
        flash_messages,
        controller.notification(),
        "new_product",
        server_config,
    );
    context.insert("form", &controller.to_page_data());

    render_template(tera, "products/new.html", &context)
}

#[get("/products/new")]
pub async fn new_product(
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let controller = ProductFormController::new(redirect_delay(&server_config));

    render_form(&tera, &flash_messages, &server_config, &controller)
}

#[post("/products/new")]
pub async fn create_product(
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ProductFormParams>,
) -> impl Responder {
    let mut controller =
        ProductFormController::with_draft(&form.draft, redirect_delay(&server_config));

    if form.is_reset() {
        controller.reset();
        return render_form(&tera, &flash_messages, &server_config, &controller);
    }

    match controller.submit(gateway.get_ref()).await {
        Ok(SubmitOutcome::Invalid) => {
            log::debug!(
                "Product form rejected, missing: {:?}",
                controller.errors().failing().collect::<Vec<_>>()
            );
        }
        Ok(SubmitOutcome::Created(_) | SubmitOutcome::Failed) => {}
        Err(err) => {
            log::error!("Failed to submit product form: {err}");
            return HttpResponse::BadRequest().finish();
        }
    }

    render_form(&tera, &flash_messages, &server_config, &controller)
}
