use crate::{config::ConnectionTarget, errors::ConnectionError};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynStoreConnector<H> = Arc<dyn StoreConnectorTrait<Handle = H> + Send + Sync>;

/// Opens a connection to the document store and yields a handle bound to it.
#[async_trait]
pub trait StoreConnectorTrait {
    type Handle: Clone + Send + Sync + 'static;

    async fn connect(&self, target: &ConnectionTarget) -> Result<Self::Handle, ConnectionError>;

    async fn release(&self, handle: Self::Handle) {
        drop(handle);
    }
}
