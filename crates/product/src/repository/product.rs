use crate::{
    abstract_trait::product::repository::ProductRepositoryTrait,
    model::product::{PRODUCT_COLLECTION, Product as ProductModel},
};
use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use shared::errors::RepositoryError;
use tracing::{error, info};

#[derive(Clone)]
pub struct ProductRepository {
    client: Client,
    collection: Collection<ProductModel>,
}

impl ProductRepository {
    pub fn new(client: Client, database: &Database) -> Self {
        Self {
            client,
            collection: database.collection::<ProductModel>(PRODUCT_COLLECTION),
        }
    }
}

#[async_trait]
impl ProductRepositoryTrait for ProductRepository {
    async fn find_all(&self) -> Result<Vec<ProductModel>, RepositoryError> {
        info!("🔍 Fetching all products");

        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .await
            .map_err(|e| {
                error!("❌ Failed to fetch products: {:?}", e);
                RepositoryError::from(e)
            })?;

        let products: Vec<ProductModel> = cursor.try_collect().await.map_err(|e| {
            error!("❌ Failed to read product cursor: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Fetched {} products", products.len());

        Ok(products)
    }

    async fn insert_many(
        &self,
        products: Vec<ProductModel>,
    ) -> Result<Vec<ProductModel>, RepositoryError> {
        if products.is_empty() {
            return Ok(products);
        }

        info!("📝 Inserting {} products", products.len());

        let result = self.collection.insert_many(&products).await.map_err(|e| {
            error!("❌ Failed to insert products: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Inserted {} products", result.inserted_ids.len());

        Ok(products)
    }

    async fn shutdown(&self) {
        self.client.clone().shutdown().await;
    }
}
