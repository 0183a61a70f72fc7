use crate::{
    abstract_trait::product::service::ProductCommandServiceTrait,
    domain::{requests::product::CreateProductRequest, response::product::ProductResponse},
    model::product::Product as ProductModel,
    repository::connector::ProductConnection,
};
use async_trait::async_trait;
use bson::DateTime;
use shared::errors::ServiceError;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductCommandService {
    pub connection: Arc<ProductConnection>,
}

impl ProductCommandService {
    pub fn new(connection: Arc<ProductConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_products(
        &self,
        req: CreateProductRequest,
    ) -> Result<Vec<ProductResponse>, ServiceError> {
        let lease = self
            .connection
            .lease()
            .ok_or(ServiceError::NotConnected)?;

        let now = DateTime::now();
        let products: Vec<ProductModel> = req
            .into_products()
            .into_iter()
            .map(|input| ProductModel::new(input, now))
            .collect();

        info!("🆕 Creating {} products", products.len());

        match lease.handle.insert_many(products).await {
            Ok(created) => {
                info!("✅ Created {} products", created.len());
                Ok(created.into_iter().map(ProductResponse::from).collect())
            }
            Err(err) if err.is_unavailable() => {
                error!("❌ Lost database connection while creating products: {err}");
                self.connection.invalidate(lease.id);
                Err(ServiceError::Unavailable(err.to_string()))
            }
            Err(err) => {
                error!("❌ Failed to create products: {err}");
                Err(ServiceError::Write(err))
            }
        }
    }
}
