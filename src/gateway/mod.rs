//! Remote data gateway translating product operations into backend HTTP calls.

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::gateway::errors::GatewayResult;

pub mod errors;
pub mod http;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

pub use http::HttpGateway;

/// Read access to the backend product collection.
#[allow(async_fn_in_trait)]
pub trait ProductReader {
    /// Fetches every product in backend order.
    async fn list_products(&self) -> GatewayResult<Vec<Product>>;
}

/// Mutating access to the backend product collection.
#[allow(async_fn_in_trait)]
pub trait ProductWriter {
    /// Creates a product, returning the record confirmed by the backend.
    async fn create_product(&self, product: &Product) -> GatewayResult<Product>;
    async fn delete_product(&self, id: &ProductId) -> GatewayResult<()>;
}
