use crate::{
    abstract_trait::product::service::ProductQueryServiceTrait,
    domain::response::product::ProductResponse, repository::connector::ProductConnection,
};
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductQueryService {
    pub connection: Arc<ProductConnection>,
}

impl ProductQueryService {
    pub fn new(connection: Arc<ProductConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(&self) -> Result<Vec<ProductResponse>, ServiceError> {
        info!("🔍 Finding all products");

        let lease = self
            .connection
            .lease()
            .ok_or(ServiceError::NotConnected)?;

        match lease.handle.find_all().await {
            Ok(products) => {
                info!("✅ Retrieved {} products", products.len());
                Ok(products.into_iter().map(ProductResponse::from).collect())
            }
            Err(err) if err.is_unavailable() => {
                error!("❌ Lost database connection while finding products: {err}");
                self.connection.invalidate(lease.id);
                Err(ServiceError::Unavailable(err.to_string()))
            }
            Err(err) => {
                error!("❌ Failed to find products: {err}");
                Err(ServiceError::Query(err))
            }
        }
    }
}
