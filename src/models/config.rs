//! Configuration model loaded from external sources.

use serde::Deserialize;

pub const DEFAULT_BACKEND_URL: &str =
    "https://tribu-ti-staffing-desarrollo-afangwbmcrhucqfh.z01.azurefd.net/ipf-msa-productosfinancieros";
pub const DEFAULT_AUTHOR_ID: &str = "10";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REDIRECT_DELAY_SECS: u64 = 3;
pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
    /// Signing key for flash message cookies, at least 64 bytes.
    pub secret: String,
    pub backend_url: String,
    pub author_id: String,
    pub request_timeout_secs: u64,
    /// Delay before the creation page returns to the list after a success.
    pub redirect_delay_secs: u64,
    /// Time an alert banner stays visible before fading out.
    pub notification_ttl_secs: u64,
}

#[derive(Clone, Debug, Deserialize)]
/// Connection settings of the products backend.
pub struct GatewayConfig {
    pub base_url: String,
    pub author_id: String,
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            author_id: DEFAULT_AUTHOR_ID.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl From<&ServerConfig> for GatewayConfig {
    fn from(config: &ServerConfig) -> Self {
        Self {
            base_url: config.backend_url.clone(),
            author_id: config.author_id.clone(),
            timeout_secs: config.request_timeout_secs,
        }
    }
}
