//! Process-local `LocalMeetingStore` for tests and ephemeral runs

use async_trait::async_trait;
use parking_lot::RwLock;
use schoolhub_core::LocalMeetingStore;
use schoolhub_domain::{Meeting, Result as DomainResult};

/// In-memory local meeting store. Contents are lost when dropped.
#[derive(Debug, Default)]
pub struct InMemoryMeetingStore {
    meetings: RwLock<Vec<Meeting>>,
}

impl InMemoryMeetingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meetings(meetings: Vec<Meeting>) -> Self {
        Self { meetings: RwLock::new(meetings) }
    }
}

#[async_trait]
impl LocalMeetingStore for InMemoryMeetingStore {
    async fn load(&self) -> DomainResult<Vec<Meeting>> {
        Ok(self.meetings.read().clone())
    }

    async fn save(&self, meetings: &[Meeting]) -> DomainResult<()> {
        *self.meetings.write() = meetings.to_vec();
        Ok(())
    }

    async fn clear(&self) -> DomainResult<()> {
        self.meetings.write().clear();
        Ok(())
    }
}
