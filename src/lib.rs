#[cfg(feature = "server")]
use actix_files::Files;
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};
#[cfg(feature = "server")]
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
#[cfg(feature = "server")]
use tera::Tera;

#[cfg(feature = "server")]
use crate::gateway::HttpGateway;
#[cfg(feature = "server")]
use crate::models::config::{GatewayConfig, ServerConfig};

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;
#[cfg(feature = "data")]
pub mod gateway;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod services;

/// Builds the flash message middleware, signing cookies with `secret`.
///
/// The secret must be at least 64 bytes long.
#[cfg(feature = "server")]
pub fn message_framework(secret: &str) -> std::io::Result<FlashMessagesFramework> {
    let secret_key = Key::try_from(secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid secret key: {e}")))?;

    let message_store = CookieMessageStore::builder(secret_key).build();
    Ok(FlashMessagesFramework::builder(message_store).build())
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let gateway = HttpGateway::new(&GatewayConfig::from(&server_config))
        .map_err(|e| std::io::Error::other(format!("Failed to build products gateway: {e}")))?;

    let message_framework = message_framework(&server_config.secret)?;

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!(
        "Serving products from {} on {}:{}",
        server_config.backend_url,
        bind_address.0,
        bind_address.1
    );

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .configure(routes::configure)
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(gateway.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
