//! Mock port implementations for testing
//!
//! In-memory stand-ins for the remote backend, the local store and the
//! invitation channel. Each can be switched into a failing mode and records
//! how often it was called.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use schoolhub_core::{InvitationNotifier, LocalMeetingStore, RemoteMeetingBackend};
use schoolhub_domain::{Meeting, Result as DomainResult, SchoolHubError};

/// In-memory mock for `LocalMeetingStore`.
#[derive(Default)]
pub struct MockLocalStore {
    meetings: Mutex<Vec<Meeting>>,
    fail_loads: AtomicBool,
    fail_saves: AtomicBool,
    saves: AtomicUsize,
}

impl MockLocalStore {
    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self { meetings: Mutex::new(meetings), ..Self::default() }
    }

    /// Current stored collection.
    pub fn stored(&self) -> Vec<Meeting> {
        self.meetings.lock().clone()
    }

    pub fn fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocalMeetingStore for MockLocalStore {
    async fn load(&self) -> DomainResult<Vec<Meeting>> {
        if self.fail_loads.load(Ordering::SeqCst) {
            return Err(SchoolHubError::Database("storage unreadable".into()));
        }
        Ok(self.meetings.lock().clone())
    }

    async fn save(&self, meetings: &[Meeting]) -> DomainResult<()> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(SchoolHubError::Database("disk full".into()));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.meetings.lock() = meetings.to_vec();
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.meetings.lock().clear();
        Ok(())
    }
}

/// In-memory mock for `RemoteMeetingBackend`.
pub struct MockRemoteBackend {
    meetings: Mutex<Vec<Meeting>>,
    online: AtomicBool,
    fail_writes: AtomicBool,
    list_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl Default for MockRemoteBackend {
    fn default() -> Self {
        Self {
            meetings: Mutex::new(Vec::new()),
            online: AtomicBool::new(true),
            fail_writes: AtomicBool::new(false),
            list_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }
}

impl MockRemoteBackend {
    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self { meetings: Mutex::new(meetings), ..Self::default() }
    }

    /// A remote that fails every call.
    pub fn unreachable() -> Self {
        let remote = Self::default();
        remote.set_online(false);
        remote
    }

    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Keep listing working but fail every mutation.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn stored(&self) -> Vec<Meeting> {
        self.meetings.lock().clone()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> DomainResult<()> {
        if self.online.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(SchoolHubError::Network("connection refused".into()))
        }
    }

    fn check_writable(&self) -> DomainResult<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SchoolHubError::Network("HTTP 503".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteMeetingBackend for MockRemoteBackend {
    async fn list_meetings(&self) -> DomainResult<Vec<Meeting>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check_online()?;
        Ok(self.meetings.lock().clone())
    }

    async fn create_meeting(&self, meeting: &Meeting) -> DomainResult<Meeting> {
        self.check_writable()?;
        self.meetings.lock().push(meeting.clone());
        Ok(meeting.clone())
    }

    async fn update_meeting(&self, id: &str, meeting: &Meeting) -> DomainResult<Meeting> {
        self.check_writable()?;
        let mut meetings = self.meetings.lock();
        let slot = meetings
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| SchoolHubError::Network("HTTP 404".into()))?;
        *slot = meeting.clone();
        Ok(meeting.clone())
    }

    async fn delete_meeting(&self, id: &str) -> DomainResult<()> {
        self.check_writable()?;
        self.meetings.lock().retain(|m| m.id != id);
        Ok(())
    }
}

/// Records which meetings were handed to the invitation channel.
#[derive(Default)]
pub struct RecordingNotifier {
    notified: Mutex<Vec<String>>,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self { fail: AtomicBool::new(true), ..Self::default() }
    }

    pub fn notified(&self) -> Vec<String> {
        self.notified.lock().clone()
    }
}

#[async_trait]
impl InvitationNotifier for RecordingNotifier {
    async fn notify(&self, meeting: &Meeting) -> DomainResult<()> {
        self.notified.lock().push(meeting.id.clone());
        if self.fail.load(Ordering::SeqCst) {
            return Err(SchoolHubError::Network("smtp relay unavailable".into()));
        }
        Ok(())
    }
}
