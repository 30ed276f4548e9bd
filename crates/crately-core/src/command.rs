// ── Command API ──
//
// All write operations flow through a unified `Command` enum. The
// controller routes each variant to the matching REST call and
// schedules a full refresh after every successful mutation.

use crate::error::CoreError;
use crate::model::Item;

/// A command envelope sent through the command channel.
/// Contains the command and a oneshot response channel.
pub(crate) struct CommandEnvelope {
    pub command: Command,
    pub response_tx: tokio::sync::oneshot::Sender<Result<CommandResult, CoreError>>,
}

/// Validated field values for a create or full-replace update.
///
/// Produced by [`ItemForm::validate`](crate::form::ItemForm::validate);
/// the id is never part of the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemWriteRequest {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: String,
}

/// All possible write operations against the inventory service.
#[derive(Debug, Clone)]
pub enum Command {
    CreateItem(ItemWriteRequest),
    UpdateItem {
        id: i64,
        update: ItemWriteRequest,
    },
    DeleteItem {
        id: i64,
    },
}

/// Result of a command execution.
#[derive(Debug)]
pub enum CommandResult {
    Ok,
    Item(Item),
}
