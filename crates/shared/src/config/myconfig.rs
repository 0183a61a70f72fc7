use crate::config::database::{ConnectionTarget, RetryPolicy};
use anyhow::{Context, Result, anyhow};
use std::{path::PathBuf, time::Duration};

const DEFAULT_MONGODB_URI: &str = "mongodb://localhost:27017/pharmacy";
const DEFAULT_MONGODB_DB: &str = "pharmacy";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RETRY_DELAY_SECS: u64 = 5;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployMode {
    /// Long-running process: binds a socket and retries in the background.
    Server,
    /// Invoked per request by a host runtime: no socket, retries on demand.
    Serverless,
}

impl DeployMode {
    pub fn retry_policy(self) -> RetryPolicy {
        match self {
            DeployMode::Server => RetryPolicy::Continuous,
            DeployMode::Serverless => RetryPolicy::OnDemand,
        }
    }

    pub fn binds_listener(self) -> bool {
        matches!(self, DeployMode::Server)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub port: u16,
    pub deploy_mode: DeployMode,
    pub retry_delay: Duration,
    pub connect_timeout: Duration,
    pub cors_origin: String,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mongodb_uri = var("MONGODB_URI").unwrap_or_else(|| DEFAULT_MONGODB_URI.to_string());
        let mongodb_db = var("MONGODB_DB").unwrap_or_else(|| DEFAULT_MONGODB_DB.to_string());

        let port = match var("PORT") {
            Some(port) => port
                .parse::<u16>()
                .context("PORT must be a valid u16 integer")?,
            None => DEFAULT_PORT,
        };

        let deploy_mode = match var("DEPLOY_MODE").as_deref() {
            Some("server") => DeployMode::Server,
            Some("serverless") => DeployMode::Serverless,
            Some(other) => {
                return Err(anyhow!(
                    "DEPLOY_MODE must be 'server' or 'serverless', got '{}'",
                    other
                ));
            }
            None if var("VERCEL").is_some() => DeployMode::Serverless,
            None => DeployMode::Server,
        };

        let retry_delay = match var("DB_RETRY_DELAY_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .context("DB_RETRY_DELAY_SECS must be a whole number of seconds")?,
            None => DEFAULT_RETRY_DELAY_SECS,
        };

        let connect_timeout = match var("DB_CONNECT_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse::<u64>()
                .context("DB_CONNECT_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_CONNECT_TIMEOUT_SECS,
        };

        let cors_origin = var("CORS_ORIGIN").unwrap_or_else(|| "*".to_string());
        let static_dir = var("STATIC_DIR").map(PathBuf::from);

        Ok(Self {
            mongodb_uri,
            mongodb_db,
            port,
            deploy_mode,
            retry_delay: Duration::from_secs(retry_delay),
            connect_timeout: Duration::from_secs(connect_timeout),
            cors_origin,
            static_dir,
        })
    }

    pub fn connection_target(&self) -> ConnectionTarget {
        ConnectionTarget {
            uri: self.mongodb_uri.clone(),
            db_name: self.mongodb_db.clone(),
            connect_timeout: self.connect_timeout,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.deploy_mode.retry_policy()
    }
}
