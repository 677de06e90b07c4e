//! Participant types
//!
//! Participants are embedded in a meeting record; they are never stored on
//! their own.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SchoolHubError};

/// Participant admission state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    /// Signed up ahead of the meeting, not connected yet
    Registered,
    /// Admitted through the live join path
    Joined,
}

crate::impl_domain_status_conversions!(ParticipantStatus {
    Registered => "registered",
    Joined => "joined"
});

/// Participant entry embedded in a meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub joined_at: DateTime<Utc>,
    pub status: ParticipantStatus,
}

/// Identity supplied by callers when joining or registering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInput {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ParticipantInput {
    pub fn new(id: impl Into<String>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), email: email.into(), phone: None }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Reject inputs that could not be deduplicated.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(SchoolHubError::InvalidInput("participant id must not be empty".into()));
        }
        Ok(())
    }

    /// Materialize the participant entry with the given admission state.
    pub fn into_participant(self, status: ParticipantStatus, at: DateTime<Utc>) -> Participant {
        Participant {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            joined_at: at,
            status,
        }
    }
}

/// Id index over a meeting's participant list.
///
/// The list itself stays a `Vec` for wire compatibility; admission checks go
/// through this index so the uniqueness rule is checked by id only.
#[derive(Debug, Default)]
pub struct ParticipantRoster<'a> {
    ids: HashSet<&'a str>,
}

impl<'a> ParticipantRoster<'a> {
    pub fn from_participants(participants: &'a [Participant]) -> Self {
        Self { ids: participants.iter().map(|p| p.id.as_str()).collect() }
    }

    pub fn contains(&self, participant_id: &str) -> bool {
        self.ids.contains(participant_id)
    }

    /// Number of distinct participant ids.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
