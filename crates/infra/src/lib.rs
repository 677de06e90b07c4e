//! # SchoolHub Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The HTTP adapter for the remote meetings backend
//! - The SQLite local fallback store
//! - Configuration loading and tracing setup
//! - Service wiring
//!
//! ## Architecture
//! - Implements traits defined in `schoolhub-core`
//! - Contains all "impure" code (I/O, network, filesystem)

pub mod api;
pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod notifications;
pub mod observability;
pub mod services;

// Re-export commonly used items
pub use api::{ApiError, ApiErrorCategory, HttpMeetingBackend};
pub use database::{DbManager, InMemoryMeetingStore, SqliteMeetingStore};
pub use errors::InfraError;
pub use http::HttpClient;
pub use notifications::TracingInvitationNotifier;
pub use observability::{init_tracing, LogFormat};
pub use services::MeetingServices;
