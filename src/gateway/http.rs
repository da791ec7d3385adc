//! `reqwest` implementation of the product gateway.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response, Url};
use serde::Deserialize;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::gateway::errors::{GatewayError, GatewayResult};
use crate::gateway::{ProductReader, ProductWriter};
use crate::models::config::GatewayConfig;

/// Header identifying the author on whose behalf requests are issued.
pub const AUTHOR_ID_HEADER: &str = "authorid";

const PRODUCTS_PATH: [&str; 2] = ["bp", "products"];

/// Body of a successful create call. Some deployments wrap the record.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedProduct {
    Envelope { data: Product },
    Bare(Product),
}

impl From<CreatedProduct> for Product {
    fn from(value: CreatedProduct) -> Self {
        match value {
            CreatedProduct::Envelope { data } => data,
            CreatedProduct::Bare(product) => product,
        }
    }
}

/// Gateway talking JSON over HTTP(S) to the products backend.
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            GatewayError::InvalidConfig(format!("base url `{}`: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidConfig(format!(
                "base url `{}` cannot carry a path",
                config.base_url
            )));
        }

        let author_id = HeaderValue::from_str(&config.author_id)
            .map_err(|e| GatewayError::InvalidConfig(format!("author id: {e}")))?;
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(AUTHOR_ID_HEADER), author_id);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// `{base}/bp/products` or `{base}/bp/products/{id}` with the id escaped.
    fn endpoint(&self, id: Option<&ProductId>) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                GatewayError::InvalidConfig(format!("base url `{}`", self.base_url))
            })?;
            segments.pop_if_empty().extend(PRODUCTS_PATH);
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }
}

/// Decodes listed records one by one, skipping those that are not valid
/// products so a single bad row does not hide the rest.
fn decode_products(records: Vec<serde_json::Value>) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<Product>(record) {
            Ok(product) => Some(product),
            Err(err) => {
                log::warn!("Skipping malformed product record: {err}");
                None
            }
        })
        .collect()
}

fn ensure_success(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(GatewayError::Status(status.as_u16()))
    }
}

impl ProductReader for HttpGateway {
    async fn list_products(&self) -> GatewayResult<Vec<Product>> {
        let url = self.endpoint(None)?;
        log::debug!("GET {url}");

        let response = ensure_success(self.client.get(url).send().await?)?;
        let records = response.json::<Vec<serde_json::Value>>().await?;

        Ok(decode_products(records))
    }
}

impl ProductWriter for HttpGateway {
    async fn create_product(&self, product: &Product) -> GatewayResult<Product> {
        let url = self.endpoint(None)?;
        log::debug!("POST {url}");

        let response = ensure_success(self.client.post(url).json(product).send().await?)?;
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(product.clone());
        }

        let created: CreatedProduct = serde_json::from_slice(&body)?;
        Ok(created.into())
    }

    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()> {
        let url = self.endpoint(Some(id))?;
        log::debug!("DELETE {url}");

        ensure_success(self.client.delete(url).send().await?)?;
        Ok(())
    }
}
