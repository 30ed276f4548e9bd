use thiserror::Error;

/// Top-level error type for the `crately-api` crate.
///
/// Covers every failure mode of the inventory service client:
/// transport, rejected requests, and malformed responses.
/// `crately-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Inventory service ───────────────────────────────────────────
    /// Non-success response from the inventory service.
    ///
    /// 404 means a stale id, 400/422 means the service rejected the
    /// submitted fields.
    #[error("Inventory service error (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a transient error worth retrying later.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error (stale id).
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Rejected { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if the service rejected the submitted fields.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Rejected { status: 400 | 422, .. })
    }
}
