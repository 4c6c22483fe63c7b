//! User configuration.
//!
//! One optional TOML file at `~/.config/carrydeck/config.toml` with the
//! orders endpoint and the poll cadence. A missing file means defaults; a
//! present-but-broken file is an error the caller decides how to surface.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

fn default_endpoint() -> String {
    // The tunnel in front of the order backend. The original console also
    // carried tracking query parameters; those are incidental and omitted.
    "https://1440ad55bcf3.ngrok-free.app/orders".to_string()
}

const fn default_poll_interval_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Orders endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Seconds between poll cycles in `carry watch`.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl UserConfig {
    /// Poll cadence as a [`Duration`], clamped to at least one second so a
    /// zero in the file cannot spin the poller.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        let secs = if self.poll_interval_secs == 0 {
            1
        } else {
            self.poll_interval_secs
        };
        Duration::from_secs(secs)
    }
}

/// Platform config path: `<config dir>/carrydeck/config.toml`.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("carrydeck").join("config.toml"))
}

/// Load the user config from the platform path, or defaults when absent.
pub fn load_user_config() -> Result<UserConfig> {
    match user_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(UserConfig::default()),
    }
}

/// Load a config file, treating a missing file as defaults.
pub fn load_config_from(path: &Path) -> Result<UserConfig> {
    if !path.exists() {
        return Ok(UserConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config at {}", path.display()))?;
    let config: UserConfig =
        toml::from_str(&raw).with_context(|| format!("parse config at {}", path.display()))?;
    tracing::debug!(path = %path.display(), endpoint = %config.endpoint, "loaded user config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config_from(&dir.path().join("config.toml")).expect("load");
        assert_eq!(config.poll_interval_secs, 10);
        assert!(config.endpoint.ends_with("/orders"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "endpoint = \"http://localhost:8080/orders\"\npoll_interval_secs = 3\n",
        )
        .expect("write");
        let config = load_config_from(&path).expect("load");
        assert_eq!(config.endpoint, "http://localhost:8080/orders");
        assert_eq!(config.poll_interval(), Duration::from_secs(3));
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "poll_interval_secs = 30\n").expect("write");
        let config = load_config_from(&path).expect("load");
        assert_eq!(config.poll_interval_secs, 30);
        assert!(config.endpoint.starts_with("https://"));
    }

    #[test]
    fn broken_toml_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        fs::write(&path, "endpoint = [not toml").expect("write");
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn zero_interval_clamps_to_one_second() {
        let config = UserConfig {
            poll_interval_secs: 0,
            ..UserConfig::default()
        };
        assert_eq!(config.poll_interval(), Duration::from_secs(1));
    }
}
