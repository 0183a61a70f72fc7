use crate::{
    abstract_trait::product::repository::DynProductRepository,
    repository::product::ProductRepository,
};
use async_trait::async_trait;
use bson::doc;
use mongodb::{Client, options::ClientOptions};
use shared::{
    abstract_trait::StoreConnectorTrait,
    config::{ConnectionManager, ConnectionTarget},
    errors::ConnectionError,
};
use std::sync::Arc;
use tracing::debug;

pub type ProductConnection = ConnectionManager<DynProductRepository>;

/// Connects to MongoDB and proves reachability with a `ping` before handing
/// out a repository bound to the configured database.
#[derive(Debug, Clone)]
pub struct MongoConnector {
    app_name: String,
}

impl MongoConnector {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
        }
    }
}

#[async_trait]
impl StoreConnectorTrait for MongoConnector {
    type Handle = DynProductRepository;

    async fn connect(
        &self,
        target: &ConnectionTarget,
    ) -> Result<DynProductRepository, ConnectionError> {
        let mut options = ClientOptions::parse(target.uri.as_str()).await?;
        options.app_name = Some(self.app_name.clone());
        options.connect_timeout = Some(target.connect_timeout);
        options.server_selection_timeout = Some(target.connect_timeout);

        let client = Client::with_options(options)?;
        let database = client.database(&target.db_name);

        database.run_command(doc! { "ping": 1 }).await?;
        debug!(db = %target.db_name, "ping acknowledged");

        Ok(Arc::new(ProductRepository::new(client, &database)))
    }

    async fn release(&self, handle: DynProductRepository) {
        handle.shutdown().await;
    }
}
