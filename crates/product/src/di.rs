use crate::{
    abstract_trait::product::service::{DynProductCommandService, DynProductQueryService},
    repository::connector::ProductConnection,
    service::{command::ProductCommandService, query::ProductQueryService},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_query: DynProductQueryService,
    pub product_command: DynProductCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_query", &"ProductQueryService")
            .field("product_command", &"ProductCommandService")
            .finish()
    }
}

#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub connection: Arc<ProductConnection>,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps { connection } = deps;

        let product_query =
            Arc::new(ProductQueryService::new(connection.clone())) as DynProductQueryService;

        let product_command =
            Arc::new(ProductCommandService::new(connection)) as DynProductCommandService;

        Self {
            product_query,
            product_command,
        }
    }
}
