mod database;

pub use self::database::{DynStoreConnector, StoreConnectorTrait};
