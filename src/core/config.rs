//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.apollo/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::conversation::DEFAULT_GREETING;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApolloConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub service: ServiceConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub greeting: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: Option<String>,
    pub api_token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Values given on the command line (None = flag not passed).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub website: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub greeting: String,
    pub website: Option<String>,
    pub base_url: String,
    pub api_token: Option<String>,
    pub timeout: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.apollo/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".apollo").join("config.toml"))
}

/// Load config from `~/.apollo/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ApolloConfig::default()`.
pub fn load_config() -> Result<ApolloConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(ApolloConfig::default())
        }
    }
}

pub fn load_config_from(path: &Path) -> Result<ApolloConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(ApolloConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ApolloConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config without the token.
fn redacted(config: &ApolloConfig) -> String {
    format!(
        "general={:?}, base_url={:?}, api_token={}, timeout_secs={:?}",
        config.general,
        config.service.base_url,
        if config.service.api_token.is_some() { "<set>" } else { "<unset>" },
        config.service.timeout_secs
    )
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Apollo Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# greeting = "Hey, I'm Apollo! How can I help?"
# website = "https://example.com"     # Or set APOLLO_WEBSITE / pass --url

# [service]
# base_url = "http://localhost:3000"  # Or set APOLLO_BASE_URL
# api_token = "..."                    # Or set APOLLO_API_TOKEN
# timeout_secs = 60
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ApolloConfig, cli: &CliOverrides) -> ResolvedConfig {
    let greeting = config
        .general
        .greeting
        .clone()
        .unwrap_or_else(|| DEFAULT_GREETING.to_string());

    // Website: CLI → env → config
    let website = cli
        .website
        .clone()
        .or_else(|| std::env::var("APOLLO_WEBSITE").ok())
        .or_else(|| config.general.website.clone())
        .filter(|w| !w.trim().is_empty());

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("APOLLO_BASE_URL").ok())
        .or_else(|| config.service.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // API token: env → config
    let api_token = std::env::var("APOLLO_API_TOKEN")
        .ok()
        .or_else(|| config.service.api_token.clone());

    let timeout_secs = cli
        .timeout_secs
        .or(config.service.timeout_secs)
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    ResolvedConfig {
        greeting,
        website,
        base_url,
        api_token,
        timeout: Duration::from_secs(timeout_secs),
    }
}
