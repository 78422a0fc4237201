//! Debounced execution of the four user intents.
//!
//! Each action key has at most one pending trigger. A pending trigger is a
//! spawned task sleeping out the debounce window; triggering the same key again
//! aborts that task and spawns a fresh one, so the last call wins. Once a task
//! wakes up it removes itself from the pending set before doing any work, so a
//! later trigger never cancels an execution that is already running.
//!
//! Results are reported as [`EngineEvent`]s. The coordinator never holds
//! application state itself; whoever consumes the events applies each one as a
//! single step.
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::task::AbortHandle;
use tokio_util::sync::CancellationToken;

use crate::{ActionKey, EngineEvent, Gateway, GatewayError};

#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub debounce: Duration,
    pub book_quantity: u32,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(300),
            book_quantity: 4,
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

struct PendingTrigger {
    generation: u64,
    handle: AbortHandle,
}

type PendingSet = Arc<Mutex<HashMap<ActionKey, PendingTrigger>>>;

/// Everything a fired action needs, cloned into its task.
#[derive(Clone)]
struct ActionContext {
    gateway: Arc<dyn Gateway>,
    sink: Arc<dyn EventSink>,
    book_quantity: u32,
}

pub struct RefreshCoordinator {
    context: ActionContext,
    debounce: Duration,
    pending: PendingSet,
    next_generation: AtomicU64,
    shutdown: CancellationToken,
}

impl RefreshCoordinator {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        sink: Arc<dyn EventSink>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            context: ActionContext {
                gateway,
                sink,
                book_quantity: settings.book_quantity,
            },
            debounce: settings.debounce,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_generation: AtomicU64::new(0),
            shutdown: CancellationToken::new(),
        }
    }

    /// Schedules `key` to run once the debounce window passes without another
    /// trigger for the same key. Must be called from inside a tokio runtime.
    pub fn trigger(&self, key: ActionKey) {
        if self.shutdown.is_cancelled() {
            engine_debug!("Ignoring {:?} trigger after shutdown", key);
            return;
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        // The lock is held across the spawn so the new task cannot look for
        // its entry before it is inserted.
        let mut pending = lock(&self.pending);
        if let Some(previous) = pending.remove(&key) {
            previous.handle.abort();
            engine_debug!("Superseded pending {:?} trigger #{}", key, previous.generation);
        }

        let task = tokio::spawn(fire_after(
            self.debounce,
            key,
            generation,
            self.pending.clone(),
            self.context.clone(),
        ));
        pending.insert(
            key,
            PendingTrigger {
                generation,
                handle: task.abort_handle(),
            },
        );
        engine_debug!("Scheduled {:?} trigger #{} in {:?}", key, generation, self.debounce);
    }

    /// Keys with a trigger still waiting out its debounce window.
    pub fn pending_keys(&self) -> Vec<ActionKey> {
        let mut keys: Vec<_> = lock(&self.pending).keys().copied().collect();
        keys.sort();
        keys
    }

    /// Fetches books then dog once. The returned token cancels just this
    /// load; a result that arrives after cancellation is dropped.
    pub fn start_initial_load(&self) -> CancellationToken {
        let token = self.shutdown.child_token();
        let cancel = token.clone();
        let context = self.context.clone();

        tokio::spawn(async move {
            let gateway = context.gateway.clone();
            let quantity = context.book_quantity;
            let fetch = tokio::spawn(async move { gateway.fetch_books_and_dog(quantity).await });
            let abort = fetch.abort_handle();

            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    abort.abort();
                    engine_info!("Initial load cancelled");
                    return;
                }
                joined = fetch => flatten_join(joined),
            };

            if cancel.is_cancelled() {
                engine_info!("Discarding initial load result after cancellation");
                return;
            }
            if let Err(err) = &result {
                engine_warn!("Failed to load initial data: {}", err);
            }
            context.sink.emit(EngineEvent::InitialLoadCompleted(result));
        });

        token
    }

    /// Resolves a dog image URL in the background and reports the outcome.
    pub fn probe_image(&self, url: String) {
        let cancel = self.shutdown.clone();
        let context = self.context.clone();
        tokio::spawn(async move {
            let resolved = tokio::select! {
                _ = cancel.cancelled() => return,
                resolved = context.gateway.probe_image(&url) => resolved,
            };
            context
                .sink
                .emit(EngineEvent::ImageProbed { url, resolved });
        });
    }

    /// Cancels the initial load and every pending trigger. Executions already
    /// running are left to finish.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
        let mut pending = lock(&self.pending);
        for (key, trigger) in pending.drain() {
            trigger.handle.abort();
            engine_debug!("Dropped pending {:?} trigger #{} on shutdown", key, trigger.generation);
        }
    }
}

async fn fire_after(
    delay: Duration,
    key: ActionKey,
    generation: u64,
    pending: PendingSet,
    context: ActionContext,
) {
    tokio::time::sleep(delay).await;
    {
        let mut pending = lock(&pending);
        match pending.get(&key) {
            Some(entry) if entry.generation == generation => {
                pending.remove(&key);
            }
            _ => return,
        }
    }
    engine_debug!("Firing {:?} trigger #{}", key, generation);
    execute(key, context).await;
}

async fn execute(key: ActionKey, context: ActionContext) {
    let ActionContext {
        gateway,
        sink,
        book_quantity,
    } = context;
    sink.emit(EngineEvent::ActionStarted(key));

    let event = match key {
        ActionKey::Books => {
            let result = guarded(async move { gateway.fetch_books(book_quantity).await }).await;
            if let Err(err) = &result {
                engine_warn!("Failed to refresh books: {}", err);
            }
            EngineEvent::BooksRefreshed(result)
        }
        ActionKey::Dogs => {
            let result = guarded(async move { gateway.fetch_dog_image().await }).await;
            if let Err(err) = &result {
                engine_warn!("Failed to refresh dog image: {}", err);
            }
            EngineEvent::DogRefreshed(result)
        }
        ActionKey::Both => {
            let result =
                guarded(async move { gateway.fetch_books_and_dog(book_quantity).await }).await;
            if let Err(err) = &result {
                engine_warn!("Failed to refresh both: {}", err);
            }
            EngineEvent::BothRefreshed(result)
        }
        ActionKey::Empty => EngineEvent::AllEmptied,
    };
    sink.emit(event);
}

/// Runs a gateway call in its own task so a panic turns into an error value.
async fn guarded<T, F>(call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    flatten_join(tokio::spawn(call).await)
}

fn flatten_join<T>(
    joined: Result<Result<T, GatewayError>, tokio::task::JoinError>,
) -> Result<T, GatewayError> {
    match joined {
        Ok(result) => result,
        Err(err) => Err(GatewayError::Unexpected(err.to_string())),
    }
}

fn lock(
    pending: &Mutex<HashMap<ActionKey, PendingTrigger>>,
) -> MutexGuard<'_, HashMap<ActionKey, PendingTrigger>> {
    pending.lock().unwrap_or_else(PoisonError::into_inner)
}
