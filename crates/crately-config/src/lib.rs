//! Shared configuration for the crately CLI and TUI.
//!
//! TOML profiles, environment overrides, and translation to
//! `crately_core::ClientConfig`. Both binaries depend on this crate --
//! the CLI adds `GlobalOpts`-aware wrappers on top.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crately_core::ClientConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' in config")]
    ProfileNotFound { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration shared by CLI and TUI.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named service profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named service profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "http://127.0.0.1:5000").
    #[serde(default = "default_service")]
    pub service: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Periodic refresh interval for long-lived consumers (seconds).
    /// 0 disables the periodic refresh; mutations still refresh.
    pub refresh_interval: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            service: default_service(),
            timeout: None,
            refresh_interval: None,
        }
    }
}

fn default_service() -> String {
    "http://127.0.0.1:5000".into()
}

/// Refresh interval applied when a profile doesn't set one. Tuned for
/// the TUI; the CLI's one-shot path disables periodic refresh anyway.
const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 10;

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "crately", "crately").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("crately");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from an explicit path + environment.
///
/// Precedence, lowest to highest: built-in defaults, the TOML file,
/// `CRATELY_`-prefixed environment variables.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CRATELY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML and write to an explicit path.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, to_toml_string(cfg)?)?;
    Ok(())
}

/// Serialize config to the same pretty TOML `save_config` writes.
pub fn to_toml_string(cfg: &Config) -> Result<String, ConfigError> {
    Ok(toml::to_string_pretty(cfg)?)
}

// ── Profile selection ───────────────────────────────────────────────

/// Select the active profile: an explicitly named one, or the config's
/// `default_profile`, or a built-in local profile when nothing is
/// configured at all.
pub fn select_profile(config: &Config, name: Option<&str>) -> Result<(String, Profile), ConfigError> {
    if let Some(name) = name {
        let profile = config
            .profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                profile: name.into(),
            })?;
        return Ok((name.into(), profile.clone()));
    }

    let default_name = config.default_profile.as_deref().unwrap_or("default");
    if let Some(profile) = config.profiles.get(default_name) {
        return Ok((default_name.into(), profile.clone()));
    }

    // Nothing configured: fall back to the local development service.
    if config.profiles.is_empty() {
        return Ok((default_name.into(), Profile::default()));
    }

    Err(ConfigError::ProfileNotFound {
        profile: default_name.into(),
    })
}

// ── Translation to ClientConfig ─────────────────────────────────────

/// Build a `ClientConfig` from a profile — no CLI flag overrides.
///
/// Suitable for the TUI and other long-lived consumers; the profile's
/// timeout falls back to the global default.
pub fn profile_to_client_config(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ClientConfig, ConfigError> {
    let url: url::Url = profile.service.parse().map_err(|_| ConfigError::Validation {
        field: "service".into(),
        reason: format!("invalid URL: {}", profile.service),
    })?;

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ClientConfig {
        url,
        timeout,
        refresh_interval_secs: profile
            .refresh_interval
            .unwrap_or(DEFAULT_REFRESH_INTERVAL_SECS),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        save_config_to(&Config::default(), &path).unwrap();
        let loaded = load_config_from(&path).unwrap();

        assert_eq!(loaded.default_profile.as_deref(), Some("default"));
        assert_eq!(loaded.defaults.output, "table");
        assert_eq!(loaded.defaults.timeout, 30);
        assert!(loaded.profiles.is_empty());
    }

    #[test]
    fn toml_profiles_are_parsed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "warehouse"

[profiles.warehouse]
service = "http://inventory.internal:5000"
timeout = 10
refresh_interval = 5
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        let (name, profile) = select_profile(&config, None).unwrap();
        assert_eq!(name, "warehouse");
        assert_eq!(profile.service, "http://inventory.internal:5000");
        assert_eq!(profile.timeout, Some(10));
        assert_eq!(profile.refresh_interval, Some(5));
    }

    #[test]
    fn named_profile_lookup_fails_for_unknown_name() {
        let config = Config::default();
        let err = select_profile(&config, Some("missing")).unwrap_err();
        assert!(matches!(err, ConfigError::ProfileNotFound { .. }));
    }

    #[test]
    fn empty_config_falls_back_to_local_service() {
        let config = Config::default();
        let (name, profile) = select_profile(&config, None).unwrap();
        assert_eq!(name, "default");
        assert_eq!(profile.service, "http://127.0.0.1:5000");
    }

    #[test]
    fn profile_translates_to_client_config() {
        let profile = Profile {
            service: "http://127.0.0.1:5000".into(),
            timeout: Some(5),
            refresh_interval: None,
        };
        let client = profile_to_client_config(&profile, &Defaults::default()).unwrap();
        assert_eq!(client.url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.refresh_interval_secs, 10);
    }

    #[test]
    fn invalid_service_url_is_rejected() {
        let profile = Profile {
            service: "not a url".into(),
            ..Profile::default()
        };
        let err = profile_to_client_config(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
