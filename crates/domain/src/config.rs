//! Configuration structures
//!
//! Loaded by `schoolhub_infra::config` from environment variables or a
//! JSON/TOML file.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DB_PATH, DEFAULT_DB_POOL_SIZE, DEFAULT_REMOTE_MAX_ATTEMPTS,
    DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_UPCOMING_HOURS,
};

/// Top-level application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub remote: RemoteConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub meetings: MeetingsConfig,
}

/// Remote meetings backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL, without the `/api/meetings` suffix
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
    /// When false the coordinator runs purely on the local store
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Local fallback store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: String,
    #[serde(default = "default_pool_size")]
    pub pool_size: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { path: DEFAULT_DB_PATH.to_string(), pool_size: DEFAULT_DB_POOL_SIZE }
    }
}

/// Coordinator and query defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingsConfig {
    /// Seed sample meetings when neither store has data
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
    #[serde(default = "default_upcoming_hours")]
    pub upcoming_hours: i64,
}

impl Default for MeetingsConfig {
    fn default() -> Self {
        Self { seed_sample_data: true, upcoming_hours: DEFAULT_UPCOMING_HOURS }
    }
}

fn default_timeout_secs() -> u64 {
    DEFAULT_REMOTE_TIMEOUT_SECS
}

fn default_max_attempts() -> usize {
    DEFAULT_REMOTE_MAX_ATTEMPTS
}

fn default_pool_size() -> u32 {
    DEFAULT_DB_POOL_SIZE
}

fn default_upcoming_hours() -> i64 {
    DEFAULT_UPCOMING_HOURS
}

const fn default_true() -> bool {
    true
}
