// ── Domain model ──
//
// Canonical types shared by the store, the list view, and the frontends.
// Wire types from `crately-api` are converted into these in `convert.rs`.

use serde::{Deserialize, Serialize};

/// One warehouse inventory record.
///
/// The id is server-assigned and immutable; the other four fields are
/// replaced as a unit on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: String,
}

impl Item {
    /// Case-insensitive substring match against name or category.
    ///
    /// `query` must already be lowercased by the caller; this keeps the
    /// per-item cost to the field lowering only.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        query.is_empty()
            || self.name.to_lowercase().contains(query)
            || self.category.to_lowercase().contains(query)
    }
}
