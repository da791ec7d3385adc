use std::env;

use config::{Config, ConfigError};
use dotenvy::dotenv;

use financial_products::models::config::{
    DEFAULT_AUTHOR_ID, DEFAULT_BACKEND_URL, DEFAULT_NOTIFICATION_TTL_SECS,
    DEFAULT_REDIRECT_DELAY_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, ServerConfig,
};

/// Layers built-in defaults, `config/*.yaml` and `APP_*` environment variables.
fn load_settings() -> Result<ServerConfig, ConfigError> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    Config::builder()
        .set_default("address", "127.0.0.1")?
        .set_default("port", 8080)?
        .set_default("templates_dir", "templates/**/*")?
        .set_default("backend_url", DEFAULT_BACKEND_URL)?
        .set_default("author_id", DEFAULT_AUTHOR_ID)?
        .set_default("request_timeout_secs", DEFAULT_REQUEST_TIMEOUT_SECS as i64)?
        .set_default("redirect_delay_secs", DEFAULT_REDIRECT_DELAY_SECS as i64)?
        .set_default("notification_ttl_secs", DEFAULT_NOTIFICATION_TTL_SECS as i64)?
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default").required(false))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build()?
        .try_deserialize::<ServerConfig>()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match load_settings() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    financial_products::run(server_config).await
}
