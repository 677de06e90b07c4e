//! # SchoolHub Domain
//!
//! Business domain types for the SchoolHub meeting lifecycle.
//!
//! This crate contains:
//! - The `Meeting` and `Participant` records and their JSON shape
//! - The meeting status machine and edit guards
//! - Domain error types and Result definitions
//! - Configuration structures and constants
//! - Pure time-window helpers
//!
//! ## Architecture
//! - No dependencies on other SchoolHub crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
