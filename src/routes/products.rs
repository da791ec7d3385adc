use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

use crate::dto::products::{ProductsPageData, ProductsQuery};
use crate::gateway::HttpGateway;
use crate::models::config::ServerConfig;
use crate::pagination::ITEMS_PER_PAGE_OPTIONS;
use crate::routes::{base_context, flash_notification, redirect, render_template};
use crate::services::products::{self as products_service, DELETE_ERROR_MESSAGE, DeleteOutcome};

/// List state carried in the query string and by the delete confirmation form.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<usize>,
}

impl ListParams {
    /// List URL restoring the same search, page size and page.
    fn location(&self) -> String {
        match serde_html_form::to_string(self) {
            Ok(query) if !query.is_empty() => format!("/?{query}"),
            Ok(_) => "/".to_string(),
            Err(err) => {
                log::error!("Failed to encode list parameters: {err}");
                "/".to_string()
            }
        }
    }
}

impl From<ListParams> for ProductsQuery {
    fn from(params: ListParams) -> Self {
        Self {
            search: params.q,
            page: params.page,
            per_page: params.per_page,
        }
    }
}

fn insert_list_context(context: &mut Context, data: &ProductsPageData) {
    context.insert("products", &data.products);
    context.insert("search_query", &data.search_query.clone().unwrap_or_default());
    context.insert("load_error", &data.load_error);
    context.insert("page_sizes", &ITEMS_PER_PAGE_OPTIONS);
    context.insert("pending_delete_id", &None::<String>);
}

#[get("/")]
pub async fn show_products(
    params: web::Query<ListParams>,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let query = ProductsQuery::from(params.into_inner());
    let data = products_service::load_products_page(gateway.get_ref(), &query).await;

    let mut context = base_context(&flash_messages, None, "products", &server_config);
    insert_list_context(&mut context, &data);

    render_template(&tera, "products/index.html", &context)
}

#[get("/products/{product_id}/delete")]
pub async fn confirm_delete_product(
    product_id: web::Path<String>,
    params: web::Query<ListParams>,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let params = params.into_inner();
    let location = params.location();
    let query = ProductsQuery::from(params);

    match products_service::load_delete_confirmation(gateway.get_ref(), &product_id, &query)
        .await
    {
        Ok(data) => {
            let mut context = base_context(&flash_messages, None, "products", &server_config);
            insert_list_context(&mut context, &data);
            context.insert("pending_delete_id", product_id.trim());
            context.insert("pending_delete", &data.pending_delete);

            render_template(&tera, "products/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to prepare deletion of product '{product_id}': {err}");
            FlashMessage::error(DELETE_ERROR_MESSAGE).send();
            redirect(&location)
        }
    }
}

#[post("/products/{product_id}/delete")]
pub async fn delete_product(
    product_id: web::Path<String>,
    web::Form(params): web::Form<ListParams>,
    gateway: web::Data<HttpGateway>,
    flash_messages: IncomingFlashMessages,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = product_id.into_inner();
    let location = params.location();
    let query = ProductsQuery::from(params);

    match products_service::delete_product(gateway.get_ref(), &product_id, &query).await {
        Ok(DeleteOutcome::Deleted { page, notification }) => {
            let mut context =
                base_context(&flash_messages, Some(&notification), "products", &server_config);
            insert_list_context(&mut context, &page);

            render_template(&tera, "products/index.html", &context)
        }
        Ok(DeleteOutcome::Failed(notification)) => {
            flash_notification(&notification);
            redirect(&location)
        }
        Err(err) => {
            log::error!("Failed to delete product '{product_id}': {err}");
            FlashMessage::error(DELETE_ERROR_MESSAGE).send();
            redirect(&location)
        }
    }
}
