// ── Runtime connection configuration ──
//
// Describes *how* to reach the inventory service. Carries connection
// tuning only and never touches disk -- the CLI/TUI constructs a
// `ClientConfig` from its own config layer and hands it in.

use std::time::Duration;

use url::Url;

/// Configuration for connecting to a single inventory service.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service base URL (e.g., `http://127.0.0.1:5000`).
    pub url: Url,
    /// Request timeout.
    pub timeout: Duration,
    /// How often to perform a periodic full refresh (seconds). 0 = never;
    /// mutations still trigger refreshes through the refresh channel.
    pub refresh_interval_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: Url::parse("http://127.0.0.1:5000").expect("default URL is valid"),
            timeout: Duration::from_secs(30),
            refresh_interval_secs: 0,
        }
    }
}
