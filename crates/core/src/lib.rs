//! # SchoolHub Core
//!
//! Business logic layer for the meeting lifecycle - no infrastructure
//! dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the remote backend, local store and
//!   invitation channel
//! - The persistence coordinator and participant admission service
//! - Read-only query views
//!
//! ## Architecture Principles
//! - Only depends on `schoolhub-domain`
//! - No database or HTTP code
//! - All external dependencies via traits
//! - Time is injected through [`Clock`]

pub mod admission;
pub mod clock;
pub mod meetings;
pub mod queries;

pub use admission::{can_join_now, AdmissionService};
pub use clock::{Clock, FixedClock, SystemClock};
pub use meetings::{
    InvitationNotifier, LocalMeetingStore, MeetingCoordinator, MeetingSnapshot,
    RemoteMeetingBackend, Source,
};
