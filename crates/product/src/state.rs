use crate::{
    SERVICE_NAME,
    abstract_trait::product::repository::DynProductRepository,
    di::{DependenciesInject, DependenciesInjectDeps},
    repository::connector::{MongoConnector, ProductConnection},
};
use shared::{
    abstract_trait::DynStoreConnector,
    config::{Config, ConnectionManager},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub connection: Arc<ProductConnection>,
    pub di_container: DependenciesInject,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("connection", &self.connection)
            .field("di_container", &self.di_container)
            .finish()
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let connector = Arc::new(MongoConnector::new(SERVICE_NAME))
            as DynStoreConnector<DynProductRepository>;

        Self::with_connector(config, connector)
    }

    pub fn with_connector(
        config: Config,
        connector: DynStoreConnector<DynProductRepository>,
    ) -> Self {
        let connection = Arc::new(ConnectionManager::new(
            connector,
            config.connection_target(),
        ));

        let di_container = DependenciesInject::new(DependenciesInjectDeps {
            connection: connection.clone(),
        });

        Self {
            config,
            connection,
            di_container,
        }
    }
}
