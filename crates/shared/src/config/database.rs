use crate::{abstract_trait::DynStoreConnector, errors::ConnectionError};
use futures::future::{BoxFuture, FutureExt, Shared};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{
        Arc, Mutex, MutexGuard, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};
use tokio::{
    sync::{Notify, broadcast},
    task::JoinHandle,
};
use tracing::{error, info, warn};
use utoipa::ToSchema;

/// Where the store lives and how long a single connect may take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    pub uri: String,
    pub db_name: String,
    pub connect_timeout: Duration,
}

impl ConnectionTarget {
    /// The URI with any `user:password@` part masked, safe for logs.
    pub fn redacted_uri(&self) -> String {
        let Some((scheme, rest)) = self.uri.split_once("://") else {
            return self.uri.clone();
        };

        let authority_end = rest.find('/').unwrap_or(rest.len());

        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{scheme}://***@{}", &rest[at + 1..]),
            None => self.uri.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connected,
    Connecting,
    Disconnecting,
}

impl ConnectionState {
    /// Numeric ready-state code as reported by document-store drivers.
    pub fn code(self) -> u8 {
        match self {
            ConnectionState::Disconnected => 0,
            ConnectionState::Connected => 1,
            ConnectionState::Connecting => 2,
            ConnectionState::Disconnecting => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connected => "connected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Disconnecting => "disconnecting",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a failed connection gets retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryPolicy {
    /// A background task keeps retrying on a fixed delay.
    Continuous,
    /// Nothing runs in the background; the next `acquire` retries.
    OnDemand,
}

type PendingAttempt<H> = Shared<BoxFuture<'static, Result<H, ConnectionError>>>;

/// A cached handle tagged with the attempt that produced it.
///
/// Pass `id` back to [`ConnectionManager::invalidate`] so a failure on an old
/// handle can't drop a newer connection.
#[derive(Debug, Clone)]
pub struct Lease<H> {
    pub id: u64,
    pub handle: H,
}

struct ConnectionSlot<H> {
    handle: Option<Lease<H>>,
    pending: Option<(u64, PendingAttempt<H>)>,
    abandoned: Option<u64>,
    state: ConnectionState,
}

/// Caches one store connection and coalesces concurrent connect attempts.
///
/// Callers racing on `acquire` while no handle is cached all await the same
/// in-flight attempt, so the connector runs once per attempt. A failed attempt
/// is forgotten and the next `acquire` starts a fresh one.
pub struct ConnectionManager<H>
where
    H: Clone + Send + Sync + 'static,
{
    connector: DynStoreConnector<H>,
    target: ConnectionTarget,
    slot: Mutex<ConnectionSlot<H>>,
    next_attempt: AtomicU64,
    lost: Notify,
}

impl<H> fmt::Debug for ConnectionManager<H>
where
    H: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionManager")
            .field("uri", &self.target.redacted_uri())
            .field("db_name", &self.target.db_name)
            .finish()
    }
}

impl<H> ConnectionManager<H>
where
    H: Clone + Send + Sync + 'static,
{
    pub fn new(connector: DynStoreConnector<H>, target: ConnectionTarget) -> Self {
        Self {
            connector,
            target,
            slot: Mutex::new(ConnectionSlot {
                handle: None,
                pending: None,
                abandoned: None,
                state: ConnectionState::Disconnected,
            }),
            next_attempt: AtomicU64::new(0),
            lost: Notify::new(),
        }
    }

    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub fn current_state(&self) -> ConnectionState {
        self.slot().state
    }

    /// The cached handle, without attempting to connect.
    pub fn current(&self) -> Option<H> {
        self.slot().handle.as_ref().map(|lease| lease.handle.clone())
    }

    /// The cached handle with its attempt id, without attempting to connect.
    pub fn lease(&self) -> Option<Lease<H>> {
        self.slot().handle.clone()
    }

    /// The configured database name once a connection is live or underway.
    pub fn database_name(&self) -> Option<&str> {
        match self.current_state() {
            ConnectionState::Connected | ConnectionState::Connecting => {
                Some(self.target.db_name.as_str())
            }
            _ => None,
        }
    }

    pub async fn acquire(&self) -> Result<H, ConnectionError> {
        let (attempt_id, attempt) = {
            let mut slot = self.slot();

            if let Some(lease) = &slot.handle {
                return Ok(lease.handle.clone());
            }

            match &slot.pending {
                Some((id, attempt)) => (*id, attempt.clone()),
                None => {
                    let id = self.next_attempt.fetch_add(1, Ordering::Relaxed);
                    let attempt = self.start_attempt();
                    slot.pending = Some((id, attempt.clone()));
                    slot.state = ConnectionState::Connecting;
                    (id, attempt)
                }
            }
        };

        let outcome = attempt.await;

        let mut slot = self.slot();
        let is_current = matches!(&slot.pending, Some((id, _)) if *id == attempt_id);
        let is_abandoned = slot.abandoned == Some(attempt_id);

        match outcome {
            Ok(handle) if is_current => {
                slot.pending = None;
                slot.handle = Some(Lease {
                    id: attempt_id,
                    handle: handle.clone(),
                });
                slot.state = ConnectionState::Connected;
                Ok(handle)
            }
            Ok(_) if is_abandoned => {
                warn!(
                    db = %self.target.db_name,
                    "⚠️ Connection attempt finished after disconnect, discarding it"
                );
                Err(ConnectionError::Aborted(
                    "disconnected while the attempt was in flight".into(),
                ))
            }
            Ok(handle) => Ok(handle),
            Err(err) => {
                if is_current {
                    slot.pending = None;
                    slot.state = ConnectionState::Disconnected;
                }
                Err(err)
            }
        }
    }

    /// Drops the cached handle so the next `acquire` reconnects.
    ///
    /// Does nothing unless the cached handle still belongs to `lease_id`.
    pub fn invalidate(&self, lease_id: u64) {
        let mut slot = self.slot();

        if matches!(&slot.handle, Some(lease) if lease.id == lease_id) {
            slot.handle = None;
            slot.state = ConnectionState::Disconnected;
            warn!(
                db = %self.target.db_name,
                "⚠️ Database connection invalidated"
            );
            self.lost.notify_one();
        }
    }

    /// Releases the cached handle and abandons any pending attempt.
    pub async fn disconnect(&self) {
        let handle = {
            let mut slot = self.slot();
            if let Some((id, _)) = slot.pending.take() {
                slot.abandoned = Some(id);
            }
            let handle = slot.handle.take();
            if handle.is_some() {
                slot.state = ConnectionState::Disconnecting;
            }
            handle
        };

        if let Some(lease) = handle {
            self.connector.release(lease.handle).await;
            info!(db = %self.target.db_name, "🔌 Database disconnected");
        }

        self.slot().state = ConnectionState::Disconnected;
    }

    /// Keeps the connection alive in the background until `shutdown` fires.
    ///
    /// Failed attempts are retried every `delay`. Once connected the task
    /// parks until the handle is invalidated, then starts over.
    pub fn spawn_retry_loop(
        self: &Arc<Self>,
        delay: Duration,
        mut shutdown: broadcast::Receiver<()>,
    ) -> JoinHandle<()> {
        let manager = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outcome = manager.acquire() => match outcome {
                        Ok(_) => {
                            tokio::select! {
                                _ = manager.lost.notified() => {
                                    info!("🔄 Database connection lost, reconnecting...");
                                    continue;
                                }
                                _ = shutdown.recv() => break,
                            }
                        }
                        Err(err) => {
                            warn!(
                                "🔁 Retrying database connection in {}s: {err}",
                                delay.as_secs()
                            );
                        }
                    },
                    _ = shutdown.recv() => break,
                }

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = shutdown.recv() => break,
                }
            }

            info!("🛑 Database retry loop stopped");
        })
    }

    fn start_attempt(&self) -> PendingAttempt<H> {
        let connector = Arc::clone(&self.connector);
        let target = self.target.clone();

        async move {
            info!(db = %target.db_name, "🔌 Connecting to database...");

            match connector.connect(&target).await {
                Ok(handle) => {
                    info!(db = %target.db_name, "✅ Database connected");
                    Ok(handle)
                }
                Err(err) => {
                    error!(
                        uri = %target.redacted_uri(),
                        db = %target.db_name,
                        "❌ Database connection error: {err}"
                    );
                    Err(err)
                }
            }
        }
        .boxed()
        .shared()
    }

    fn slot(&self) -> MutexGuard<'_, ConnectionSlot<H>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
