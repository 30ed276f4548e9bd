// ── Core error types ──
//
// User-facing errors from crately-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<crately_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach inventory service at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Not connected to the inventory service")]
    Disconnected,

    #[error("Request timed out")]
    Timeout,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Item not found: {id}")]
    ItemNotFound { id: i64 },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Submitted fields rejected by the service: {message}")]
    ValidationFailed { message: String },

    #[error("Invalid draft: {0}")]
    InvalidDraft(#[from] crate::form::DraftError),

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("Inventory service error: {message}")]
    Api {
        message: String,
        /// HTTP status code (if applicable).
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Returns `true` if this error refers to a stale id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ItemNotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<crately_api::Error> for CoreError {
    fn from(err: crately_api::Error) -> Self {
        match err {
            crately_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map(|u| u.to_string())
                            .unwrap_or_else(|| "<unknown>".into()),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            crately_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            crately_api::Error::Rejected { status, ref message } => match status {
                404 => CoreError::Api {
                    message: message.clone(),
                    status: Some(404),
                },
                400 | 422 => CoreError::ValidationFailed {
                    message: message.clone(),
                },
                _ => CoreError::Api {
                    message: message.clone(),
                    status: Some(status),
                },
            },
            crately_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

/// Translate an API error for an operation on a known id, so stale-id
/// rejections become `ItemNotFound` instead of a generic API error.
pub(crate) fn map_item_error(err: crately_api::Error, id: i64) -> CoreError {
    if err.is_not_found() {
        CoreError::ItemNotFound { id }
    } else {
        CoreError::from(err)
    }
}
