//! Mock gateway implementation for isolating services in tests.

use mockall::mock;

use crate::domain::product::Product;
use crate::domain::types::ProductId;
use crate::gateway::errors::GatewayResult;
use crate::gateway::{ProductReader, ProductWriter};

mock! {
    pub Gateway {}

    impl ProductReader for Gateway {
        async fn list_products(&self) -> GatewayResult<Vec<Product>>;
    }

    impl ProductWriter for Gateway {
        async fn create_product(&self, product: &Product) -> GatewayResult<Product>;
        async fn delete_product(&self, id: &ProductId) -> GatewayResult<()>;
    }
}
