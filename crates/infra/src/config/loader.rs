//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. A `.env` file in the working directory is read into the environment
//!    if present
//! 2. Attempts to load from environment variables
//! 3. If `SCHOOLHUB_REMOTE_URL` is not set, falls back to loading from file
//! 4. Probes multiple paths for config files (JSON or TOML)
//!
//! ## Environment Variables
//! - `SCHOOLHUB_REMOTE_URL`: Base URL of the meetings backend (required)
//! - `SCHOOLHUB_REMOTE_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `SCHOOLHUB_REMOTE_MAX_ATTEMPTS`: Attempts per request, including the
//!   first
//! - `SCHOOLHUB_REMOTE_ENABLED`: Whether the remote backend is used
//!   (true/false)
//! - `SCHOOLHUB_DB_PATH`: Local store database file path
//! - `SCHOOLHUB_DB_POOL_SIZE`: Connection pool size
//! - `SCHOOLHUB_SEED_SAMPLE_DATA`: Seed sample meetings when no store has
//!   data (true/false)
//! - `SCHOOLHUB_UPCOMING_HOURS`: Horizon of the "upcoming" view
//!
//! ## File Locations
//! The loader looks for `config.{json,toml}` and `schoolhub.{json,toml}` in the
//! working directory and its two parents, then next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use schoolhub_domain::constants::{
    DEFAULT_REMOTE_MAX_ATTEMPTS, DEFAULT_REMOTE_TIMEOUT_SECS, MAX_UPCOMING_HOURS,
};
use schoolhub_domain::{
    Config, MeetingsConfig, RemoteConfig, Result, SchoolHubError, StorageConfig,
};

const ENV_REMOTE_URL: &str = "SCHOOLHUB_REMOTE_URL";
const ENV_REMOTE_TIMEOUT: &str = "SCHOOLHUB_REMOTE_TIMEOUT_SECS";
const ENV_REMOTE_MAX_ATTEMPTS: &str = "SCHOOLHUB_REMOTE_MAX_ATTEMPTS";
const ENV_REMOTE_ENABLED: &str = "SCHOOLHUB_REMOTE_ENABLED";
const ENV_DB_PATH: &str = "SCHOOLHUB_DB_PATH";
const ENV_DB_POOL_SIZE: &str = "SCHOOLHUB_DB_POOL_SIZE";
const ENV_SEED_SAMPLE_DATA: &str = "SCHOOLHUB_SEED_SAMPLE_DATA";
const ENV_UPCOMING_HOURS: &str = "SCHOOLHUB_UPCOMING_HOURS";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "schoolhub.json", "schoolhub.toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `SchoolHubError::Config` if configuration cannot be loaded from
/// either source, a file is malformed, or a value is out of range.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "loaded .env file");
    }

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// Only `SCHOOLHUB_REMOTE_URL` is required; every other variable falls back
/// to its default.
///
/// # Errors
/// Returns `SchoolHubError::Config` if the remote URL is missing or a value
/// does not parse.
pub fn load_from_env() -> Result<Config> {
    let base_url = env_var(ENV_REMOTE_URL)?;
    let storage_defaults = StorageConfig::default();
    let meetings_defaults = MeetingsConfig::default();

    let config = Config {
        remote: RemoteConfig {
            base_url,
            timeout_secs: env_parse(ENV_REMOTE_TIMEOUT, DEFAULT_REMOTE_TIMEOUT_SECS)?,
            max_attempts: env_parse(ENV_REMOTE_MAX_ATTEMPTS, DEFAULT_REMOTE_MAX_ATTEMPTS)?,
            enabled: env_bool(ENV_REMOTE_ENABLED, true),
        },
        storage: StorageConfig {
            path: std::env::var(ENV_DB_PATH).unwrap_or(storage_defaults.path),
            pool_size: env_parse(ENV_DB_POOL_SIZE, storage_defaults.pool_size)?,
        },
        meetings: MeetingsConfig {
            seed_sample_data: env_bool(ENV_SEED_SAMPLE_DATA, meetings_defaults.seed_sample_data),
            upcoming_hours: env_parse(ENV_UPCOMING_HOURS, meetings_defaults.upcoming_hours)?,
        },
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches the standard locations. Format is detected by
/// file extension.
///
/// # Errors
/// Returns `SchoolHubError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SchoolHubError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            SchoolHubError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SchoolHubError::Config(format!("Failed to read config file: {e}")))?;

    let config = parse_config(&contents, &config_path)?;
    validate(&config)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SchoolHubError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SchoolHubError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SchoolHubError::Config(format!("Unsupported config format: {extension}"))),
    }
}

fn validate(config: &Config) -> Result<()> {
    if config.remote.base_url.trim().is_empty() {
        return Err(SchoolHubError::Config("remote.base_url must not be empty".into()));
    }
    if config.remote.timeout_secs == 0 {
        return Err(SchoolHubError::Config("remote.timeout_secs must be positive".into()));
    }
    if config.storage.pool_size == 0 {
        return Err(SchoolHubError::Config("storage.pool_size must be positive".into()));
    }
    if !(1..=MAX_UPCOMING_HOURS).contains(&config.meetings.upcoming_hours) {
        return Err(SchoolHubError::Config(format!(
            "meetings.upcoming_hours must be between 1 and {MAX_UPCOMING_HOURS}"
        )));
    }
    Ok(())
}

/// Probe the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    let exe_dir = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf));
    if let Some(exe_dir) = exe_dir {
        roots.push(exe_dir);
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        SchoolHubError::Config(format!("Missing required environment variable: {key}"))
    })
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| SchoolHubError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
