use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Backend responded with status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Parse(String),

    #[error("Invalid gateway configuration: {0}")]
    InvalidConfig(String),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return GatewayError::Parse(err.to_string());
        }
        if let Some(status) = err.status() {
            return GatewayError::Status(status.as_u16());
        }
        GatewayError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}
