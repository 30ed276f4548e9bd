//! Wire types for the inventory service REST endpoints.
//!
//! All types match the JSON bodies exchanged with `/items`. Field names
//! are plain lowercase on the wire, so no rename attributes are needed.

use serde::{Deserialize, Serialize};

/// One inventory record — from `GET /items` and mutation responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResponse {
    /// Server-assigned, unique, immutable after creation.
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: String,
}

/// Request body for `POST /items` and `PUT /items/{id}`.
///
/// Create and update share the same shape: all four mutable fields,
/// never the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCreateUpdate {
    pub name: String,
    pub quantity: u32,
    pub price: f64,
    pub category: String,
}
