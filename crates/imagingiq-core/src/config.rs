//! Configuration management for ImagingIQ.
//!
//! Loads configuration from ${IMAGINGIQ_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// A sign-in account known to the in-memory session provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoAccount {
    pub email: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// In-memory session provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Simulated round-trip latency for every provider call.
    pub latency_ms: u64,
    /// Makes every session query fail (exercises the fail-closed gate).
    pub fail_get_session: bool,
    /// Makes every sign-out call fail (exercises the sign-out notice).
    pub fail_sign_out: bool,
    /// Missing from the file means the built-in demo account, not none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accounts: Vec<DemoAccount>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            latency_ms: 300,
            fail_get_session: false,
            fail_sign_out: false,
            accounts: vec![DemoAccount {
                email: "dana.lee@imagingiq.dev".to_string(),
                password: "radiology".to_string(),
                display_name: Some("Dana Lee".to_string()),
            }],
        }
    }
}

impl ProviderConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How long the simulated scan stays in the scanning phase.
    pub scan_duration_ms: u64,
    /// Auto-close delay of the welcome toast.
    pub welcome_duration_ms: u64,
    /// Auto-close delay of timed notices (e.g. signed in).
    pub notice_duration_ms: u64,
    /// Simulated round trip of the demo-request form on the home view.
    pub demo_request_ms: u64,
    pub provider: ProviderConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan_duration_ms: Self::DEFAULT_SCAN_MS,
            welcome_duration_ms: Self::DEFAULT_WELCOME_MS,
            notice_duration_ms: Self::DEFAULT_NOTICE_MS,
            demo_request_ms: Self::DEFAULT_DEMO_REQUEST_MS,
            provider: ProviderConfig::default(),
        }
    }
}

impl Config {
    const DEFAULT_SCAN_MS: u64 = 6000;
    const DEFAULT_WELCOME_MS: u64 = 4000;
    const DEFAULT_NOTICE_MS: u64 = 4000;
    const DEFAULT_DEMO_REQUEST_MS: u64 = 500;

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the commented default config to `path`.
    ///
    /// Fails if the file already exists. Parent directories are created.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, default_config_template())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }

    pub fn scan_duration(&self) -> Duration {
        Duration::from_millis(self.scan_duration_ms)
    }

    pub fn welcome_duration(&self) -> Duration {
        Duration::from_millis(self.welcome_duration_ms)
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn demo_request_duration(&self) -> Duration {
        Duration::from_millis(self.demo_request_ms)
    }
}

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for ImagingIQ configuration and data directories.
    //!
    //! IMAGINGIQ_HOME resolution order:
    //! 1. IMAGINGIQ_HOME environment variable (if set)
    //! 2. ~/.config/imagingiq (default)

    use std::path::PathBuf;

    /// Returns the ImagingIQ home directory.
    pub fn imagingiq_home() -> PathBuf {
        if let Ok(home) = std::env::var("IMAGINGIQ_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("imagingiq")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        imagingiq_home().join("config.toml")
    }

    /// Returns the directory that receives rolling log files.
    pub fn logs_dir() -> PathBuf {
        imagingiq_home().join("logs")
    }
}
