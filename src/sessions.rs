use compute::{BuildTicket, ChartError, LoadTable, ReactiveBinder, Selection, UpdateOutcome};
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// A session's binder. The lock is held only to move the binder between
/// states, never while a chart is being built.
pub type SessionHandle = Arc<Mutex<ReactiveBinder>>;

/// Live page sessions keyed by id; idle sessions are evicted.
#[derive(Clone, Debug)]
pub struct SessionStore {
    binders: Cache<u64, SessionHandle>,
    next_id: Arc<AtomicU64>,
}

impl SessionStore {
    pub fn new(max_capacity: u64, time_to_idle: Duration) -> Self {
        let binders = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_idle(time_to_idle)
            .build();

        Self {
            binders,
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Registers `binder` under a fresh id.
    pub async fn create(&self, binder: ReactiveBinder) -> (u64, SessionHandle) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = Arc::new(Mutex::new(binder));
        self.binders.insert(id, handle.clone()).await;
        debug!("Created session {}", id);
        (id, handle)
    }

    pub async fn get(&self, id: u64) -> Option<SessionHandle> {
        self.binders.get(&id).await
    }

    /// Approximate number of live sessions.
    pub fn len(&self) -> u64 {
        self.binders.entry_count()
    }
}

/// Builds the ticket's chart on the blocking pool and completes it on the
/// session's binder.
///
/// The work runs as its own task, so the binder leaves `Updating` even when
/// the request that issued the ticket is dropped before the build finishes.
pub fn spawn_build(
    table: Arc<LoadTable>,
    handle: SessionHandle,
    ticket: BuildTicket,
) -> JoinHandle<UpdateOutcome> {
    tokio::spawn(async move {
        let Selection { zone, range } = ticket.selection;
        let result = tokio::task::spawn_blocking(move || compute::build(&table, zone, range))
            .await
            .map_err(|e| {
                error!("Chart worker failed: {}", e);
                ChartError::BuildFailure(format!("chart worker failed: {}", e))
            });

        handle.lock().await.complete(&ticket, result)
    })
}
