// ── Controller abstraction ──
//
// Full lifecycle management for an inventory service connection.
// Handles connection setup, refresh scheduling, command routing,
// and reactive data streaming through the ItemStore.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::command::{Command, CommandEnvelope, CommandResult};
use crate::config::ClientConfig;
use crate::error::{CoreError, map_item_error};
use crate::model::Item;
use crate::store::ItemStore;
use crate::stream::ItemStream;

use crately_api::{ItemsClient, TransportConfig};

const COMMAND_CHANNEL_SIZE: usize = 64;
const EVENT_CHANNEL_SIZE: usize = 64;
const REFRESH_CHANNEL_SIZE: usize = 16;

// ── ConnectionState ──────────────────────────────────────────────

/// Connection state observable by consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

// ── StoreEvent ───────────────────────────────────────────────────

/// Broadcast notification emitted after refresh attempts.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    /// A full refresh completed and the store now holds `item_count` items.
    Refreshed { item_count: usize },
    /// A refresh attempt failed; the store keeps its previous snapshot.
    RefreshFailed { message: String },
}

// ── Controller ───────────────────────────────────────────────────

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. Manages the full
/// connection lifecycle: connection setup, refresh scheduling, command
/// routing, and reactive item streaming.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    config: ClientConfig,
    store: Arc<ItemStore>,
    connection_state: watch::Sender<ConnectionState>,
    event_tx: broadcast::Sender<StoreEvent>,
    command_tx: Mutex<mpsc::Sender<CommandEnvelope>>,
    command_rx: Mutex<Option<mpsc::Receiver<CommandEnvelope>>>,
    /// Refresh requests from mutations and consumers. Coalesced: a full
    /// channel means a refresh is already pending, so senders drop.
    refresh_tx: Mutex<mpsc::Sender<()>>,
    refresh_rx: Mutex<Option<mpsc::Receiver<()>>>,
    /// Monotonic refresh counter. A list response is applied only if no
    /// newer refresh started while it was in flight.
    refresh_generation: AtomicU64,
    cancel: CancellationToken,
    /// Child token for the current connection — cancelled on disconnect,
    /// replaced on reconnect (avoids permanent cancellation).
    cancel_child: Mutex<CancellationToken>,
    client: Mutex<Option<ItemsClient>>,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Controller {
    /// Create a new Controller from configuration. Does NOT connect --
    /// call [`connect()`](Self::connect) to reach the service and start
    /// background tasks.
    pub fn new(config: ClientConfig) -> Self {
        let store = Arc::new(ItemStore::new());
        let (connection_state, _) = watch::channel(ConnectionState::Disconnected);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
        let (refresh_tx, refresh_rx) = mpsc::channel(REFRESH_CHANNEL_SIZE);
        let cancel = CancellationToken::new();
        let cancel_child = cancel.child_token();

        Self {
            inner: Arc::new(ControllerInner {
                config,
                store,
                connection_state,
                event_tx,
                command_tx: Mutex::new(command_tx),
                command_rx: Mutex::new(Some(command_rx)),
                refresh_tx: Mutex::new(refresh_tx),
                refresh_rx: Mutex::new(Some(refresh_rx)),
                refresh_generation: AtomicU64::new(0),
                cancel,
                cancel_child: Mutex::new(cancel_child),
                client: Mutex::new(None),
                task_handles: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Access the controller configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Access the underlying ItemStore.
    pub fn store(&self) -> &Arc<ItemStore> {
        &self.inner.store
    }

    // ── Connection lifecycle ─────────────────────────────────────

    /// Connect to the inventory service.
    ///
    /// Builds the HTTP client, performs an initial full refresh, and
    /// spawns background tasks (command processor, refresh listener,
    /// periodic refresh when configured).
    pub async fn connect(&self) -> Result<(), CoreError> {
        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Connecting);

        // Fresh child token for this connection (supports reconnect).
        let child = self.inner.cancel.child_token();
        *self.inner.cancel_child.lock().await = child.clone();

        let config = &self.inner.config;
        let transport = TransportConfig::default().with_timeout(config.timeout);
        let client = ItemsClient::new(config.url.as_str(), &transport)?;
        *self.inner.client.lock().await = Some(client);

        // Initial snapshot. Failure here is fatal: a connection that
        // cannot list items is not a connection.
        if let Err(e) = self.full_refresh().await {
            *self.inner.client.lock().await = None;
            let _ = self.inner.connection_state.send(ConnectionState::Failed);
            return Err(e);
        }

        let command_rx = self
            .inner
            .command_rx
            .lock()
            .await
            .take()
            .ok_or_else(|| CoreError::Internal("command receiver already taken".into()))?;
        let refresh_rx = self
            .inner
            .refresh_rx
            .lock()
            .await
            .take()
            .ok_or_else(|| CoreError::Internal("refresh receiver already taken".into()))?;

        let mut handles = self.inner.task_handles.lock().await;
        handles.push(tokio::spawn(command_processor_task(
            self.clone(),
            command_rx,
        )));
        handles.push(tokio::spawn(refresh_listener_task(
            self.clone(),
            refresh_rx,
            child.clone(),
        )));
        if config.refresh_interval_secs > 0 {
            handles.push(tokio::spawn(refresh_task(
                self.clone(),
                config.refresh_interval_secs,
                child,
            )));
        }
        drop(handles);

        let _ = self.inner.connection_state.send(ConnectionState::Connected);
        debug!(url = %config.url, "connected to inventory service");
        Ok(())
    }

    /// Disconnect and stop all background tasks.
    pub async fn disconnect(&self) {
        // Cancel the child token (not the parent — allows reconnect).
        self.inner.cancel_child.lock().await.cancel();

        // Join all background tasks
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        drop(handles);

        *self.inner.client.lock().await = None;

        // Recreate both channels so reconnects can spawn fresh receivers.
        // The previous receivers are consumed by the background tasks.
        {
            let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);
            *self.inner.command_tx.lock().await = tx;
            *self.inner.command_rx.lock().await = Some(rx);
        }
        {
            let (tx, rx) = mpsc::channel(REFRESH_CHANNEL_SIZE);
            *self.inner.refresh_tx.lock().await = tx;
            *self.inner.refresh_rx.lock().await = Some(rx);
        }

        let _ = self
            .inner
            .connection_state
            .send(ConnectionState::Disconnected);
        debug!("disconnected");
    }

    // ── Refresh protocol ─────────────────────────────────────────

    /// Fetch the full item list and replace the store snapshot.
    ///
    /// Stamps the request with a generation counter; if a newer refresh
    /// starts while this one is in flight, the stale response is
    /// discarded instead of overwriting fresher data.
    pub async fn full_refresh(&self) -> Result<(), CoreError> {
        let generation = self.inner.refresh_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let client = self.inner.client.lock().await.clone();
        let Some(client) = client else {
            return Err(CoreError::Disconnected);
        };

        let result = client.list_items().await;

        if self.inner.refresh_generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "discarding stale list response");
            return Ok(());
        }

        match result {
            Ok(responses) => {
                let items: Vec<Item> = responses.into_iter().map(Item::from).collect();
                let item_count = items.len();
                self.inner.store.replace_all(items);
                let _ = self.inner.event_tx.send(StoreEvent::Refreshed { item_count });
                debug!(item_count, "item refresh complete");
                Ok(())
            }
            Err(e) => {
                let err = CoreError::from(e);
                let _ = self.inner.event_tx.send(StoreEvent::RefreshFailed {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Request an asynchronous refresh through the refresh channel.
    ///
    /// Non-blocking; if the channel is full a refresh is already pending
    /// and the request is dropped.
    pub async fn request_refresh(&self) {
        let tx = self.inner.refresh_tx.lock().await.clone();
        if tx.try_send(()).is_err() {
            debug!("refresh already pending, request dropped");
        }
    }

    // ── Command execution ────────────────────────────────────────

    /// Execute a command against the inventory service.
    ///
    /// Sends the command through the internal channel to the command
    /// processor task and awaits the result.
    pub async fn execute(&self, cmd: Command) -> Result<CommandResult, CoreError> {
        if *self.inner.connection_state.borrow() != ConnectionState::Connected {
            return Err(CoreError::Disconnected);
        }

        let (tx, rx) = tokio::sync::oneshot::channel();

        let command_tx = self.inner.command_tx.lock().await.clone();

        command_tx
            .send(CommandEnvelope {
                command: cmd,
                response_tx: tx,
            })
            .await
            .map_err(|_| CoreError::Disconnected)?;

        rx.await.map_err(|_| CoreError::Disconnected)?
    }

    // ── One-shot convenience ─────────────────────────────────────

    /// One-shot: connect, run closure, disconnect.
    ///
    /// Optimized for CLI: disables periodic refresh since we only need
    /// a single request-response cycle. Generic over the error type so
    /// frontends can run their own fallible logic inside the closure.
    pub async fn oneshot<F, Fut, T, E>(config: ClientConfig, f: F) -> Result<T, E>
    where
        F: FnOnce(Controller) -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: From<CoreError>,
    {
        let mut cfg = config;
        cfg.refresh_interval_secs = 0;

        let controller = Controller::new(cfg);
        controller.connect().await.map_err(E::from)?;
        let result = f(controller.clone()).await;
        controller.disconnect().await;
        result
    }

    // ── State observation ────────────────────────────────────────

    /// Subscribe to connection state changes.
    pub fn connection_state(&self) -> watch::Receiver<ConnectionState> {
        self.inner.connection_state.subscribe()
    }

    /// Subscribe to the store event broadcast stream.
    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.event_tx.subscribe()
    }

    // ── Snapshot accessors (delegate to ItemStore) ───────────────

    pub fn items_snapshot(&self) -> Arc<Vec<Arc<Item>>> {
        self.inner.store.snapshot()
    }

    pub fn items(&self) -> ItemStream {
        self.inner.store.subscribe()
    }

    pub fn get_item(&self, id: i64) -> Option<Arc<Item>> {
        self.inner.store.get(id)
    }
}

// ── Background tasks ─────────────────────────────────────────────

/// Periodically refresh items from the service.
async fn refresh_task(controller: Controller, interval_secs: u64, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_secs));
    interval.tick().await; // consume the immediate first tick

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            _ = interval.tick() => {
                if let Err(e) = controller.full_refresh().await {
                    warn!(error = %e, "periodic refresh failed");
                }
            }
        }
    }
}

/// Drain refresh requests from the refresh channel, performing a full
/// refresh for each. Requests arriving mid-refresh queue up (bounded)
/// and collapse into at most one follow-up refresh.
async fn refresh_listener_task(
    controller: Controller,
    mut rx: mpsc::Receiver<()>,
    cancel: CancellationToken,
) {
    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            request = rx.recv() => {
                let Some(()) = request else { break };
                // Drain anything queued behind this request.
                while rx.try_recv().is_ok() {}
                if let Err(e) = controller.full_refresh().await {
                    warn!(error = %e, "requested refresh failed");
                }
            }
        }
    }
}

/// Process commands from the mpsc channel, routing each to the
/// appropriate REST call.
async fn command_processor_task(controller: Controller, mut rx: mpsc::Receiver<CommandEnvelope>) {
    let cancel = controller.inner.cancel_child.lock().await.clone();

    loop {
        tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            envelope = rx.recv() => {
                let Some(envelope) = envelope else { break };
                let result = route_command(&controller, envelope.command).await;
                let _ = envelope.response_tx.send(result);
            }
        }
    }
}

// ── Command routing ──────────────────────────────────────────────

/// Route a command to the appropriate API call.
///
/// Every successful mutation schedules a full refresh; the command
/// result itself carries the service's echo of the written item.
async fn route_command(controller: &Controller, cmd: Command) -> Result<CommandResult, CoreError> {
    let client = controller.inner.client.lock().await.clone();
    let Some(client) = client else {
        return Err(CoreError::Disconnected);
    };

    match cmd {
        Command::CreateItem(request) => {
            let created = client.create_item(&(&request).into()).await?;
            controller.request_refresh().await;
            Ok(CommandResult::Item(created.into()))
        }

        Command::UpdateItem { id, update } => {
            let updated = client
                .update_item(id, &(&update).into())
                .await
                .map_err(|e| map_item_error(e, id))?;
            controller.request_refresh().await;
            Ok(CommandResult::Item(updated.into()))
        }

        Command::DeleteItem { id } => {
            client
                .delete_item(id)
                .await
                .map_err(|e| map_item_error(e, id))?;
            controller.request_refresh().await;
            Ok(CommandResult::Ok)
        }
    }
}
