mod database;
mod myconfig;

pub use self::database::{
    ConnectionManager, ConnectionState, ConnectionTarget, Lease, RetryPolicy,
};
pub use self::myconfig::{Config, DeployMode};
