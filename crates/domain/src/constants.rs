//! Application constants
//!
//! Centralized location for all domain-level constants used by the meeting
//! lifecycle.

// Admission window
pub const JOIN_GRACE_MINUTES: i64 = 60;

// Query views
pub const DEFAULT_UPCOMING_HOURS: i64 = 168;
pub const MAX_UPCOMING_HOURS: i64 = 24 * 366 * 10;

// Local store layout
pub const LOCAL_MEETINGS_KEY: &str = "meetings";

// Remote backend
pub const MEETINGS_API_PATH: &str = "/api/meetings";
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_REMOTE_MAX_ATTEMPTS: usize = 2;

// Storage
pub const DEFAULT_DB_PATH: &str = "schoolhub.db";
pub const DEFAULT_DB_POOL_SIZE: u32 = 4;
