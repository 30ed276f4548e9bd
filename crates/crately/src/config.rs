//! CLI-side configuration resolution.
//!
//! Bridges `crately-config` (file + env) with `GlobalOpts` flag
//! overrides to produce the `ClientConfig` handed to the controller.

use crately_config::{load_config_or_default, profile_to_client_config, select_profile};
use crately_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `ClientConfig` from the config file, profile, and CLI overrides.
///
/// Precedence, lowest to highest: profile settings, `--timeout`,
/// `--base-url`.
pub fn build_client_config(global: &GlobalOpts) -> Result<ClientConfig, CliError> {
    let cfg = load_config_or_default();

    let (name, profile) = select_profile(&cfg, global.profile.as_deref()).map_err(|_| {
        CliError::ProfileNotFound {
            name: global.profile.clone().unwrap_or_else(|| "default".into()),
        }
    })?;
    tracing::debug!(profile = %name, "resolved service profile");

    let mut client = profile_to_client_config(&profile, &cfg.defaults)?;

    if let Some(secs) = global.timeout {
        client.timeout = std::time::Duration::from_secs(secs);
    }

    if let Some(ref raw) = global.base_url {
        client.url = raw.parse().map_err(|_| CliError::Validation {
            field: "base-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
    }

    Ok(client)
}
