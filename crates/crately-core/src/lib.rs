//! Reactive data layer between `crately-api` and UI consumers (CLI / TUI).
//!
//! This crate owns the business logic, domain model, and reactive data
//! infrastructure for the crately workspace:
//!
//! - **[`Controller`]** — Central facade managing the full lifecycle:
//!   [`connect()`](Controller::connect) verifies the service is reachable,
//!   fetches an initial snapshot, then spawns background tasks for refresh
//!   handling and command processing.
//!   [`Controller::oneshot()`](Controller::oneshot) provides a lightweight
//!   connect-run-disconnect mode for single CLI invocations.
//!
//! - **[`ItemStore`]** — Lock-free reactive storage (`DashMap` +
//!   `tokio::sync::watch`). Holds the authoritative snapshot of the item
//!   collection; every refresh replaces it wholesale.
//!
//! - **[`ItemStream`]** — Subscription handle vended by the store. Exposes
//!   `current()` / `latest()` / `changed()` for reactive rendering.
//!
//! - **[`ListView`]** — Pure list-view state machine: search, sort,
//!   pagination, and edit mode over the current snapshot, with no
//!   dependency on any rendering layer.
//!
//! - **[`ItemForm`]** — Draft field values for create and edit, with
//!   presence and parse validation.
//!
//! - **[`Command`]** — Typed mutation requests routed through an `mpsc`
//!   channel to the controller's command processor. Every successful
//!   mutation schedules a full refresh over an explicit refresh channel.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod form;
pub mod model;
pub mod store;
pub mod stream;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult, ItemWriteRequest};
pub use config::ClientConfig;
pub use controller::{ConnectionState, Controller, StoreEvent};
pub use error::CoreError;
pub use form::{DraftError, ItemForm};
pub use model::Item;
pub use store::ItemStore;
pub use stream::ItemStream;
pub use view::{ListView, PAGE_SIZE, SortField, SortOrder};
