//! Participant admission: joining, registration and invitations

pub mod service;

pub use service::{can_join_now, AdmissionService};
