//! Port interfaces for meeting persistence
//!
//! These traits define the boundaries between the coordinator and the
//! infrastructure that actually stores meetings.

use async_trait::async_trait;
use schoolhub_domain::{Meeting, Result};

/// Remote authoritative meetings API.
///
/// Every error returned here is treated as an environment failure and
/// absorbed by the coordinator.
#[async_trait]
pub trait RemoteMeetingBackend: Send + Sync {
    /// Fetch the full meeting collection
    async fn list_meetings(&self) -> Result<Vec<Meeting>>;

    /// Store a newly created meeting and return the stored record
    async fn create_meeting(&self, meeting: &Meeting) -> Result<Meeting>;

    /// Replace the fields of an existing meeting and return the stored record
    async fn update_meeting(&self, id: &str, meeting: &Meeting) -> Result<Meeting>;

    /// Remove a meeting. Implementations report success when the id is
    /// already absent.
    async fn delete_meeting(&self, id: &str) -> Result<()>;
}

/// Local fallback store holding the whole collection as one document.
#[async_trait]
pub trait LocalMeetingStore: Send + Sync {
    /// Load the stored collection; an absent document is an empty collection
    async fn load(&self) -> Result<Vec<Meeting>>;

    /// Overwrite the stored collection
    async fn save(&self, meetings: &[Meeting]) -> Result<()>;

    /// Drop the stored collection
    async fn clear(&self) -> Result<()>;
}

/// Outbound notification channel for meeting invitations
#[async_trait]
pub trait InvitationNotifier: Send + Sync {
    /// Signal that invitations for `meeting` should go out
    async fn notify(&self, meeting: &Meeting) -> Result<()>;
}
