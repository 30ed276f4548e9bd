//! Data bridge — connects [`Controller`] streams to TUI actions.
//!
//! Runs as a background task: connects the controller, then forwards
//! every snapshot replacement, refresh failure, and connection-state
//! transition as an [`Action`] through the TUI's action channel.

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crately_core::{ConnectionState, Controller, StoreEvent};

use crate::action::{Action, Notification};

/// Connect and stream until cancelled, then disconnect the controller.
pub async fn spawn_data_bridge(
    controller: Controller,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let _ = action_tx.send(Action::ConnectionChanged(ConnectionState::Connecting));

    if let Err(e) = controller.connect().await {
        warn!(error = %e, "failed to connect to inventory service");
        let _ = action_tx.send(Action::ConnectionChanged(ConnectionState::Failed));
        let _ = action_tx.send(Action::Notify(Notification::error(format!("{e}"))));
        return;
    }

    let mut items = controller.items();
    let mut conn_state = controller.connection_state();
    let mut events = controller.events();

    let _ = action_tx.send(Action::ConnectionChanged(ConnectionState::Connected));

    // Initial snapshot so the table has data before the first refresh.
    let _ = action_tx.send(Action::ItemsUpdated(items.current().clone()));

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Some(snapshot) = items.changed() => {
                debug!(item_count = snapshot.len(), "dispatching ItemsUpdated");
                let _ = action_tx.send(Action::ItemsUpdated(snapshot));
            }

            Ok(event) = events.recv() => {
                match event {
                    StoreEvent::Refreshed { item_count } => {
                        debug!(item_count, "store refreshed");
                    }
                    StoreEvent::RefreshFailed { message } => {
                        let _ = action_tx.send(Action::Notify(Notification::error(
                            format!("Refresh failed: {message}"),
                        )));
                    }
                }
            }

            Ok(()) = conn_state.changed() => {
                let state = conn_state.borrow_and_update().clone();
                let _ = action_tx.send(Action::ConnectionChanged(state));
            }
        }
    }

    controller.disconnect().await;
    debug!("data bridge shut down");
}
