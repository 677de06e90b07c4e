//! Meeting persistence coordinator - core business logic
//!
//! Presents one logical meeting collection on top of a remote backend and a
//! local fallback store.
//!
//! ## Precedence
//! On every read the local store wins as soon as it holds at least one
//! meeting; the remote backend is then not consulted at all. Only an empty
//! local store sends the read to the remote backend, and a remote failure
//! seeds the local store with the sample set. Once anything has been written
//! locally the coordinator keeps using local data until [`clear_local`] is
//! called.
//!
//! ## Failure semantics
//! Remote failures are logged and recovered from locally; they never reach
//! the caller. Logic errors (`NotFound`, `InvalidTransition`,
//! `MeetingImmutable`, admission errors) always do.
//!
//! [`clear_local`]: MeetingCoordinator::clear_local

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use schoolhub_domain::{Meeting, MeetingDraft, MeetingPatch, Result, SchoolHubError};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use super::id::MeetingIdGenerator;
use super::ports::{LocalMeetingStore, RemoteMeetingBackend};
use super::seed::sample_meetings;
use crate::clock::Clock;

/// Which store answered a read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// The local store held data and was used as-is
    LocalAuthoritative,
    /// The local store was empty and the remote backend answered
    RemoteAuthoritative,
    /// Neither store produced data; the sample set was used
    SeededFallback,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LocalAuthoritative => "local",
            Self::RemoteAuthoritative => "remote",
            Self::SeededFallback => "seeded",
        })
    }
}

/// Materialized view of the meeting collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSnapshot {
    pub meetings: Vec<Meeting>,
    pub source: Source,
}

impl MeetingSnapshot {
    pub fn find(&self, id: &str) -> Option<&Meeting> {
        self.meetings.iter().find(|m| m.id == id)
    }
}

/// Meeting persistence coordinator
pub struct MeetingCoordinator {
    remote: Option<Arc<dyn RemoteMeetingBackend>>,
    local: Arc<dyn LocalMeetingStore>,
    clock: Arc<dyn Clock>,
    ids: MeetingIdGenerator,
    seed_sample_data: bool,
    // Held across every read-modify-write so no caller sees a partial write.
    write_lock: Mutex<()>,
}

impl MeetingCoordinator {
    /// Create a coordinator that runs on the local store only.
    pub fn new(local: Arc<dyn LocalMeetingStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            remote: None,
            local,
            clock,
            ids: MeetingIdGenerator::new(),
            seed_sample_data: true,
            write_lock: Mutex::new(()),
        }
    }

    /// Attach the remote authoritative backend.
    pub fn with_remote(mut self, remote: Arc<dyn RemoteMeetingBackend>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Configure whether the sample set is seeded when both stores are empty
    /// or unavailable. Enabled by default.
    pub fn with_seed_data(mut self, enabled: bool) -> Self {
        self.seed_sample_data = enabled;
        self
    }

    /// Current instant according to the coordinator's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Return the full collection according to the precedence rule.
    ///
    /// Never fails; on total failure the collection is empty.
    pub async fn read(&self) -> MeetingSnapshot {
        let _guard = self.write_lock.lock().await;
        self.resolve().await
    }

    /// Look up a single meeting.
    ///
    /// # Errors
    /// Returns `NotFound` when the authoritative collection lacks `id`.
    pub async fn get(&self, id: &str) -> Result<Meeting> {
        let snapshot = self.read().await;
        snapshot.find(id).cloned().ok_or_else(|| SchoolHubError::NotFound(id.to_string()))
    }

    /// Create a meeting in `scheduled` status.
    ///
    /// Writes to the local store when it already holds data, otherwise to
    /// the remote backend, falling back to the local store when the remote
    /// write fails. Creation never seeds the sample set.
    ///
    /// # Errors
    /// Returns `InvalidInput` for an invalid draft, or `Database` when the
    /// local store cannot be written either.
    pub async fn create(&self, draft: MeetingDraft) -> Result<Meeting> {
        draft.validate()?;

        let _guard = self.write_lock.lock().await;
        let now = self.clock.now();
        let mut meetings = self.load_local().await;

        if !meetings.is_empty() {
            let id =
                self.ids.next_unused(now, |candidate| meetings.iter().any(|m| m.id == candidate));
            let meeting = Meeting::from_draft(id, draft, now)?;
            meetings.push(meeting.clone());
            self.save_local(&meetings).await?;
            info!(
                meeting_id = %meeting.id,
                source = %Source::LocalAuthoritative,
                "meeting created"
            );
            return Ok(meeting);
        }

        let meeting = Meeting::from_draft(self.ids.next_id(now), draft, now)?;

        if let Some(remote) = &self.remote {
            match remote.create_meeting(&meeting).await {
                Ok(stored) => {
                    info!(
                        meeting_id = %stored.id,
                        source = %Source::RemoteAuthoritative,
                        "meeting created"
                    );
                    return Ok(stored);
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        meeting_id = %meeting.id,
                        "remote create failed, keeping meeting locally"
                    );
                }
            }
        }

        self.save_local(std::slice::from_ref(&meeting)).await?;
        info!(meeting_id = %meeting.id, source = %Source::LocalAuthoritative, "meeting created");
        Ok(meeting)
    }

    /// Merge `patch` into an existing meeting.
    ///
    /// # Errors
    /// `NotFound`, `MeetingImmutable` or `InvalidInput`.
    pub async fn update(&self, id: &str, patch: MeetingPatch) -> Result<Meeting> {
        self.modify(id, move |meeting, now| meeting.apply_patch(patch, now)).await
    }

    /// `scheduled` → `active`.
    ///
    /// # Errors
    /// `NotFound` or `InvalidTransition`.
    pub async fn start(&self, id: &str, actor: &str) -> Result<Meeting> {
        let meeting = self.modify(id, |meeting, now| meeting.start(actor, now)).await?;
        info!(meeting_id = %id, actor, "meeting started");
        Ok(meeting)
    }

    /// `active` → `ended`.
    ///
    /// # Errors
    /// `NotFound` or `InvalidTransition`.
    pub async fn end(&self, id: &str, actor: &str) -> Result<Meeting> {
        let meeting = self.modify(id, |meeting, now| meeting.end(actor, now)).await?;
        info!(meeting_id = %id, actor, "meeting ended");
        Ok(meeting)
    }

    /// `scheduled` → `cancelled`.
    ///
    /// # Errors
    /// `NotFound` or `InvalidTransition`.
    pub async fn cancel(&self, id: &str, actor: &str) -> Result<Meeting> {
        let meeting = self.modify(id, |meeting, now| meeting.cancel(actor, now)).await?;
        info!(meeting_id = %id, actor, "meeting cancelled");
        Ok(meeting)
    }

    /// Atomic read-modify-write of one meeting.
    ///
    /// `mutate` receives the current record and the coordinator's `now`; if
    /// it fails nothing is written.
    ///
    /// # Errors
    /// `NotFound` when `id` is absent, or whatever `mutate` returns.
    pub async fn modify<F>(&self, id: &str, mutate: F) -> Result<Meeting>
    where
        F: FnOnce(&mut Meeting, DateTime<Utc>) -> Result<()> + Send,
    {
        let _guard = self.write_lock.lock().await;
        let MeetingSnapshot { mut meetings, source } = self.resolve().await;

        let index = meetings
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| SchoolHubError::NotFound(id.to_string()))?;

        let mut updated = meetings[index].clone();
        mutate(&mut updated, self.clock.now())?;
        meetings[index] = updated.clone();

        self.persist_update(source, &meetings, updated).await
    }

    /// Ensure a meeting is absent. Deleting an unknown id succeeds.
    ///
    /// # Errors
    /// Returns `Database` only when the local store cannot be written.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let MeetingSnapshot { mut meetings, source } = self.resolve().await;

        let Some(index) = meetings.iter().position(|m| m.id == id) else {
            debug!(meeting_id = %id, %source, "delete of absent meeting is a no-op");
            return Ok(());
        };
        meetings.remove(index);

        if let (Source::RemoteAuthoritative, Some(remote)) = (source, &self.remote) {
            match remote.delete_meeting(id).await {
                Ok(()) => {
                    info!(meeting_id = %id, %source, "meeting deleted");
                    return Ok(());
                }
                Err(err) => {
                    warn!(
                        error = %err,
                        meeting_id = %id,
                        "remote delete failed, recording deletion locally"
                    );
                }
            }
        }

        self.save_local(&meetings).await?;
        info!(meeting_id = %id, source = %Source::LocalAuthoritative, "meeting deleted");
        Ok(())
    }

    /// Drop the local collection so the next read goes to the remote
    /// backend again.
    ///
    /// # Errors
    /// Returns the store's error when the document cannot be removed.
    pub async fn clear_local(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.local.clear().await?;
        info!("local meeting store cleared");
        Ok(())
    }

    async fn resolve(&self) -> MeetingSnapshot {
        let local = self.load_local().await;
        if !local.is_empty() {
            debug!(count = local.len(), "serving meetings from local store");
            return MeetingSnapshot { meetings: local, source: Source::LocalAuthoritative };
        }

        if let Some(remote) = &self.remote {
            match remote.list_meetings().await {
                Ok(meetings) => {
                    debug!(count = meetings.len(), "serving meetings from remote backend");
                    return MeetingSnapshot { meetings, source: Source::RemoteAuthoritative };
                }
                Err(err) => {
                    warn!(error = %err, "remote backend unavailable, falling back to sample data");
                }
            }
        }

        self.seed().await
    }

    async fn seed(&self) -> MeetingSnapshot {
        if !self.seed_sample_data {
            return MeetingSnapshot { meetings: Vec::new(), source: Source::SeededFallback };
        }

        let meetings = sample_meetings(self.clock.now());
        match self.local.save(&meetings).await {
            Ok(()) => info!(count = meetings.len(), "seeded local store with sample meetings"),
            Err(err) => warn!(error = %err, "could not persist sample meetings"),
        }

        MeetingSnapshot { meetings, source: Source::SeededFallback }
    }

    async fn persist_update(
        &self,
        source: Source,
        meetings: &[Meeting],
        updated: Meeting,
    ) -> Result<Meeting> {
        if let (Source::RemoteAuthoritative, Some(remote)) = (source, &self.remote) {
            match remote.update_meeting(&updated.id, &updated).await {
                Ok(stored) => return Ok(stored),
                Err(err) => {
                    warn!(
                        error = %err,
                        meeting_id = %updated.id,
                        "remote update failed, recording change locally"
                    );
                }
            }
        }

        self.save_local(meetings).await?;
        Ok(updated)
    }

    async fn load_local(&self) -> Vec<Meeting> {
        match self.local.load().await {
            Ok(meetings) => meetings,
            Err(err) => {
                warn!(error = %err, "local meeting store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save_local(&self, meetings: &[Meeting]) -> Result<()> {
        self.local.save(meetings).await.map_err(|err| {
            error!(error = %err, count = meetings.len(), "failed to write local meeting store");
            err
        })
    }
}
