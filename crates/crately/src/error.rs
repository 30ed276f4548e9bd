//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use crately_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the inventory service at {url}")]
    #[diagnostic(
        code(crately::connection_failed),
        help(
            "Check that the service is running and accessible.\n\
             URL: {url}\n\
             Try: crately items list --base-url http://127.0.0.1:5000"
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(crately::timeout),
        help("Increase timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── Resources ────────────────────────────────────────────────────
    #[error("Item '{id}' not found")]
    #[diagnostic(
        code(crately::not_found),
        help("Run: crately items list to see available items")
    )]
    NotFound { id: i64 },

    // ── API ──────────────────────────────────────────────────────────
    #[error("Service error: {message}")]
    #[diagnostic(code(crately::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(crately::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(crately::profile_not_found),
        help("Create one with: crately config init")
    )]
    ProfileNotFound { name: String },

    #[error(transparent)]
    #[diagnostic(code(crately::config))]
    Config(#[from] crately_config::ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Disconnected => CliError::ConnectionFailed {
                url: "(disconnected)".into(),
                source: "Service connection was lost".into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::ItemNotFound { id } => CliError::NotFound { id },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::InvalidDraft(draft_err) => CliError::Validation {
                field: "input".into(),
                reason: draft_err.to_string(),
            },

            CoreError::Api { message, status: _ } => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal(message) => CliError::ApiError { message },
        }
    }
}
