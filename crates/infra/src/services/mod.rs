//! Service layer wiring.
//!
//! Builds the core services on top of the concrete adapters described by a
//! [`Config`](schoolhub_domain::Config).

pub mod meeting_services;

pub use meeting_services::MeetingServices;
