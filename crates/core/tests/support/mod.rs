//! Shared test helpers for `schoolhub-core` integration tests.
//!
//! In-memory fakes for the persistence ports plus a few fixtures, so the
//! suites can focus on coordinator behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use schoolhub_core::{FixedClock, MeetingCoordinator};
use schoolhub_domain::{MeetingDraft, ParticipantInput};

pub use repositories::{MockLocalStore, MockRemoteBackend, RecordingNotifier};

/// Monday morning, well inside any test's expectations.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

pub fn draft(title: &str) -> MeetingDraft {
    MeetingDraft::new(title, "Agenda to follow", base_time() + Duration::hours(3), 45)
        .hosted_by("teacher-1", "Ada Moreno", "moreno@school.example")
}

pub fn participant(id: &str) -> ParticipantInput {
    ParticipantInput::new(id, format!("Person {id}"), format!("{id}@school.example"))
}

/// Coordinator wired to the given fakes.
pub struct Harness {
    pub coordinator: Arc<MeetingCoordinator>,
    pub local: Arc<MockLocalStore>,
    pub remote: Arc<MockRemoteBackend>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new(local: MockLocalStore, remote: MockRemoteBackend) -> Self {
        let local = Arc::new(local);
        let remote = Arc::new(remote);
        let clock = Arc::new(FixedClock::new(base_time()));
        let coordinator = MeetingCoordinator::new(local.clone(), clock.clone())
            .with_remote(remote.clone());

        Self { coordinator: Arc::new(coordinator), local, remote, clock }
    }

    /// Empty local store and a healthy, empty remote.
    pub fn online() -> Self {
        Self::new(MockLocalStore::default(), MockRemoteBackend::default())
    }

    /// Empty local store and a remote that fails every call.
    pub fn offline() -> Self {
        Self::new(MockLocalStore::default(), MockRemoteBackend::unreachable())
    }
}
