use crate::model::product::Product as ProductModel;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynProductRepository = Arc<dyn ProductRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait ProductRepositoryTrait {
    /// Every product, newest first.
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError>;

    /// Inserts `products` in order and returns them as stored.
    async fn insert_many(
        &self,
        products: Vec<ProductModel>,
    ) -> Result<Vec<ProductModel>, RepositoryError>;

    async fn shutdown(&self) {}
}
