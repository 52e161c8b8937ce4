//! TOML Configuration File Support
//!
//! Centralized configuration for the dashboard, loaded from
//! `~/.config/swifter/dashboard.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (applied by the caller through [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [mascot]
//! variant = "enhanced"
//! click_reset_ms = 4000
//! particle_clear_ms = 2000
//! seed = 42
//!
//! [auth]
//! username = "demo"
//! password = "demo"
//!
//! [session]
//! path = "/home/me/.local/share/swifter/session.json"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::StaticCredentialVerifier;
use crate::mascot::{MascotController, MascotTimings, Variant};
use crate::session::{FileSessionStore, MemorySessionStore, SessionStore};

/// Environment variable for the mascot variant
pub const ENV_MASCOT_VARIANT: &str = "SWIFTER_MASCOT_VARIANT";
/// Environment variable for the click reset delay (ms)
pub const ENV_CLICK_RESET_MS: &str = "SWIFTER_CLICK_RESET_MS";
/// Environment variable for the particle clear delay (ms)
pub const ENV_PARTICLE_CLEAR_MS: &str = "SWIFTER_PARTICLE_CLEAR_MS";
/// Environment variable for the session file path
pub const ENV_SESSION_PATH: &str = "SWIFTER_SESSION_PATH";

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// Mascot section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MascotToml {
    /// "classic" or "enhanced"
    pub variant: Option<Variant>,

    /// Click celebration length in milliseconds
    pub click_reset_ms: Option<u64>,

    /// Particle display time in milliseconds
    pub particle_clear_ms: Option<u64>,

    /// Fixed random seed
    pub seed: Option<u64>,
}

/// Auth section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthToml {
    /// Accepted username
    pub username: Option<String>,

    /// Accepted password
    pub password: Option<String>,
}

/// Session section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionToml {
    /// Session file location
    pub path: Option<PathBuf>,
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardToml {
    /// Mascot section
    pub mascot: MascotToml,

    /// Auth section
    pub auth: AuthToml,

    /// Session section
    pub session: SessionToml,
}

// =============================================================================
// Main Configuration Struct
// =============================================================================

/// Resolved dashboard configuration
#[derive(Clone, Debug)]
pub struct DashboardConfig {
    /// Mascot flavour
    pub variant: Variant,

    /// Click reset override; `None` uses the variant default
    pub click_reset: Option<Duration>,

    /// Particle display time
    pub particle_clear: Duration,

    /// Fixed random seed
    pub seed: Option<u64>,

    /// Accepted username for the static verifier
    pub username: String,

    /// Accepted password for the static verifier
    pub password: String,

    /// Session file; `None` keeps the session in memory only
    pub session_path: Option<PathBuf>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            click_reset: None,
            particle_clear: MascotTimings::PARTICLE_CLEAR,
            seed: None,
            username: "demo".to_string(),
            password: "demo".to_string(),
            session_path: FileSessionStore::default_path(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl DashboardConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Timer durations for the configured variant
    #[must_use]
    pub fn mascot_timings(&self) -> MascotTimings {
        let mut timings = MascotTimings::for_variant(self.variant);
        if let Some(reset) = self.click_reset {
            timings.click_reset = reset;
        }
        timings.particle_clear = self.particle_clear;
        timings
    }

    /// Controller built from this configuration
    #[must_use]
    pub fn mascot_controller(&self) -> MascotController {
        match self.seed {
            Some(seed) => MascotController::with_seed(self.variant, self.mascot_timings(), seed),
            None => MascotController::new(self.variant, self.mascot_timings()),
        }
    }

    /// Verifier accepting the configured username/password
    #[must_use]
    pub fn verifier(&self) -> StaticCredentialVerifier {
        StaticCredentialVerifier::new(self.username.trim(), self.password.clone())
    }

    /// File store at the configured path, or an in-memory store without one
    #[must_use]
    pub fn session_store(&self) -> Box<dyn SessionStore> {
        match self.session_path {
            Some(ref path) => Box::new(FileSessionStore::new(path.clone())),
            None => Box::new(MemorySessionStore::new()),
        }
    }

    /// Apply CLI overrides (highest priority)
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        let mut touched = false;
        if let Some(variant) = overrides.variant {
            self.variant = variant;
            touched = true;
        }
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
            touched = true;
        }
        if let Some(ref path) = overrides.session_path {
            self.session_path = Some(path.clone());
            touched = true;
        }
        if touched {
            self.source = ConfigSource::Cli;
        }
    }

    /// Reject values that would make the mascot misbehave
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for zero delays or an empty
    /// username.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.click_reset.is_some_and(|d| d.is_zero()) {
            return Err(ConfigError::ValidationError(
                "mascot.click_reset_ms must be greater than 0".to_string(),
            ));
        }
        if self.particle_clear.is_zero() {
            return Err(ConfigError::ValidationError(
                "mascot.particle_clear_ms must be greater than 0".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.username must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values supplied on the command line
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// `--variant`
    pub variant: Option<Variant>,
    /// `--seed`
    pub seed: Option<u64>,
    /// `--session`
    pub session_path: Option<PathBuf>,
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/swifter/dashboard.toml` or
/// `~/.config/swifter/dashboard.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("swifter").join("dashboard.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed, or if the
/// resulting values are invalid. A missing config file is not an error.
pub fn load_config() -> Result<DashboardConfig, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read or parsed,
/// or if the resulting values are invalid.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<DashboardConfig, ConfigError> {
    // Start with defaults
    let mut config = DashboardConfig::default();

    // Try to load from file
    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: DashboardToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, &toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    // Apply environment variables (overrides file values)
    apply_env_config(&mut config, |key| std::env::var(key).ok())?;

    config.validate()?;
    Ok(config)
}

/// Parse a TOML string into a configuration (file layer only)
///
/// # Errors
///
/// Returns an error if the TOML is malformed or the values are invalid.
pub fn parse_config(toml_content: &str) -> Result<DashboardConfig, ConfigError> {
    let toml_config: DashboardToml = toml::from_str(toml_content)?;
    let mut config = DashboardConfig::default();
    apply_toml_config(&mut config, &toml_config);
    config.source = ConfigSource::File;
    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut DashboardConfig, toml: &DashboardToml) {
    if let Some(variant) = toml.mascot.variant {
        config.variant = variant;
    }
    if let Some(ms) = toml.mascot.click_reset_ms {
        config.click_reset = Some(Duration::from_millis(ms));
    }
    if let Some(ms) = toml.mascot.particle_clear_ms {
        config.particle_clear = Duration::from_millis(ms);
    }
    if let Some(seed) = toml.mascot.seed {
        config.seed = Some(seed);
    }
    if let Some(ref username) = toml.auth.username {
        config.username.clone_from(username);
    }
    if let Some(ref password) = toml.auth.password {
        config.password.clone_from(password);
    }
    if let Some(ref path) = toml.session.path {
        config.session_path = Some(path.clone());
    }
}

/// Apply environment overrides, reading variables through `get`
fn apply_env_config<F>(config: &mut DashboardConfig, get: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut touched = false;

    if let Some(raw) = get(ENV_MASCOT_VARIANT) {
        config.variant = raw.parse().map_err(|e: String| {
            ConfigError::ValidationError(format!("{ENV_MASCOT_VARIANT}: {e}"))
        })?;
        touched = true;
    }
    if let Some(raw) = get(ENV_CLICK_RESET_MS) {
        config.click_reset = Some(Duration::from_millis(parse_ms(ENV_CLICK_RESET_MS, &raw)?));
        touched = true;
    }
    if let Some(raw) = get(ENV_PARTICLE_CLEAR_MS) {
        config.particle_clear = Duration::from_millis(parse_ms(ENV_PARTICLE_CLEAR_MS, &raw)?);
        touched = true;
    }
    if let Some(raw) = get(ENV_SESSION_PATH) {
        config.session_path = Some(PathBuf::from(raw));
        touched = true;
    }

    if touched {
        config.source = ConfigSource::Env;
        tracing::debug!("Applied environment configuration overrides");
    }
    Ok(())
}

fn parse_ms(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|_| {
        ConfigError::ValidationError(format!("{key} must be milliseconds, got '{raw}'"))
    })
}
