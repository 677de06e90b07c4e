//! Meeting entity and status machine
//!
//! A meeting is created `scheduled`, may be started (`active`) and then
//! ended, or cancelled before it starts. `ended` and `cancelled` are terminal.
//! Every mutation goes through a method on [`Meeting`] so the transition and
//! edit guards cannot be bypassed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::participant::{Participant, ParticipantInput, ParticipantRoster, ParticipantStatus};
use crate::errors::{Result, SchoolHubError};

/// Meeting lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingStatus {
    Scheduled,
    Active,
    Ended,
    Cancelled,
}

crate::impl_domain_status_conversions!(MeetingStatus {
    Scheduled => "scheduled",
    Active => "active",
    Ended => "ended",
    Cancelled => "cancelled"
});

/// Lifecycle transitions a caller can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeetingAction {
    Start,
    End,
    Cancel,
}

crate::impl_domain_status_conversions!(MeetingAction {
    Start => "start",
    End => "end",
    Cancel => "cancel"
});

impl MeetingStatus {
    /// Transition function for the status machine.
    ///
    /// # Errors
    /// Returns `InvalidTransition` for every pair not listed as legal.
    pub fn apply(self, action: MeetingAction) -> Result<Self> {
        use MeetingAction::{Cancel, End, Start};

        let next = match (self, action) {
            (Self::Scheduled, Start) => Some(Self::Active),
            (Self::Scheduled, Cancel) => Some(Self::Cancelled),
            (Self::Scheduled, End) => None,
            (Self::Active, End) => Some(Self::Ended),
            (Self::Active, Start | Cancel) => None,
            (Self::Ended | Self::Cancelled, _) => None,
        };

        next.ok_or(SchoolHubError::InvalidTransition { from: self, action })
    }

    /// No transition leaves a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Ended | Self::Cancelled)
    }

    /// Field edits are allowed while scheduled or active.
    pub fn is_editable(self) -> bool {
        matches!(self, Self::Scheduled | Self::Active)
    }
}

/// Per-meeting feature switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingSettings {
    pub recording_enabled: bool,
    pub waiting_room_enabled: bool,
    pub join_before_host: bool,
    pub mute_on_entry: bool,
}

impl Default for MeetingSettings {
    fn default() -> Self {
        Self {
            recording_enabled: false,
            waiting_room_enabled: false,
            join_before_host: true,
            mute_on_entry: false,
        }
    }
}

/// Scheduled meeting record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub description: String,
    pub scheduled_time: DateTime<Utc>,
    /// Length in minutes
    pub duration: u32,
    pub host_id: String,
    pub host_name: String,
    pub host_email: String,
    pub status: MeetingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub settings: MeetingSettings,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_by: Option<String>,
    /// Provisioned by the conferencing platform; never interpreted here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Input for creating a meeting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingDraft {
    pub title: String,
    pub description: String,
    pub scheduled_time: DateTime<Utc>,
    pub duration: u32,
    pub host_id: String,
    pub host_name: String,
    pub host_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default)]
    pub settings: MeetingSettings,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl MeetingDraft {
    /// Minimal draft; optional fields can be filled in afterwards.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        scheduled_time: DateTime<Utc>,
        duration: u32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            scheduled_time,
            duration,
            host_id: String::new(),
            host_name: String::new(),
            host_email: String::new(),
            max_participants: None,
            settings: MeetingSettings::default(),
            meeting_type: None,
            join_url: None,
            password: None,
        }
    }

    pub fn hosted_by(
        mut self,
        host_id: impl Into<String>,
        host_name: impl Into<String>,
        host_email: impl Into<String>,
    ) -> Self {
        self.host_id = host_id.into();
        self.host_name = host_name.into();
        self.host_email = host_email.into();
        self
    }

    pub fn with_capacity(mut self, max_participants: u32) -> Self {
        self.max_participants = Some(max_participants);
        self
    }

    pub fn with_type(mut self, meeting_type: impl Into<String>) -> Self {
        self.meeting_type = Some(meeting_type.into());
        self
    }

    /// # Errors
    /// Returns `InvalidInput` for blank text, zero duration or zero capacity.
    pub fn validate(&self) -> Result<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_positive_duration(self.duration)?;
        require_positive_capacity(self.max_participants)
    }
}

/// Partial update of editable meeting fields
///
/// Status and audit stamps change only through lifecycle transitions, and
/// the roster only through admission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduled_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_participants: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<MeetingSettings>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub meeting_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl MeetingPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Meeting {
    /// Materialize a freshly created meeting in `scheduled` status.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the draft fails validation.
    pub fn from_draft(
        id: impl Into<String>,
        draft: MeetingDraft,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        draft.validate()?;

        Ok(Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            scheduled_time: draft.scheduled_time,
            duration: draft.duration,
            host_id: draft.host_id,
            host_name: draft.host_name,
            host_email: draft.host_email,
            status: MeetingStatus::Scheduled,
            max_participants: draft.max_participants,
            participants: Vec::new(),
            settings: draft.settings,
            meeting_type: draft.meeting_type,
            created_at: now,
            updated_at: now,
            started_at: None,
            started_by: None,
            ended_at: None,
            ended_by: None,
            join_url: draft.join_url,
            password: draft.password,
        })
    }

    /// Scheduled start plus duration.
    pub fn scheduled_end(&self) -> DateTime<Utc> {
        self.scheduled_time + chrono::Duration::minutes(i64::from(self.duration))
    }

    /// `scheduled` → `active`, recording who started it and when.
    pub fn start(&mut self, actor: &str, at: DateTime<Utc>) -> Result<()> {
        self.status = self.status.apply(MeetingAction::Start)?;
        self.started_by = Some(actor.to_string());
        self.started_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// `active` → `ended`, recording who ended it and when.
    pub fn end(&mut self, actor: &str, at: DateTime<Utc>) -> Result<()> {
        self.status = self.status.apply(MeetingAction::End)?;
        self.ended_by = Some(actor.to_string());
        self.ended_at = Some(at);
        self.updated_at = at;
        Ok(())
    }

    /// `scheduled` → `cancelled`. The record carries no cancellation stamp;
    /// the actor is accepted for symmetry with the other transitions.
    pub fn cancel(&mut self, _actor: &str, at: DateTime<Utc>) -> Result<()> {
        self.status = self.status.apply(MeetingAction::Cancel)?;
        self.updated_at = at;
        Ok(())
    }

    /// # Errors
    /// Returns `MeetingImmutable` once the meeting is ended or cancelled.
    pub fn ensure_editable(&self) -> Result<()> {
        if self.status.is_editable() {
            Ok(())
        } else {
            Err(SchoolHubError::MeetingImmutable { id: self.id.clone(), status: self.status })
        }
    }

    /// Merge a patch into the record.
    ///
    /// The scheduled time is frozen once the meeting leaves `scheduled`;
    /// re-sending the current value is accepted.
    pub fn apply_patch(&mut self, patch: MeetingPatch, at: DateTime<Utc>) -> Result<()> {
        self.ensure_editable()?;

        if let Some(scheduled_time) = patch.scheduled_time {
            if scheduled_time != self.scheduled_time && self.status != MeetingStatus::Scheduled {
                return Err(SchoolHubError::MeetingImmutable {
                    id: self.id.clone(),
                    status: self.status,
                });
            }
        }
        if let Some(title) = &patch.title {
            require_text("title", title)?;
        }
        if let Some(description) = &patch.description {
            require_text("description", description)?;
        }
        if let Some(duration) = patch.duration {
            require_positive_duration(duration)?;
        }
        require_positive_capacity(patch.max_participants)?;
        if let Some(capacity) = patch.max_participants {
            if (capacity as usize) < self.participants.len() {
                return Err(SchoolHubError::InvalidInput(format!(
                    "maxParticipants {capacity} is below the current {} participants",
                    self.participants.len()
                )));
            }
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(scheduled_time) = patch.scheduled_time {
            self.scheduled_time = scheduled_time;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(max_participants) = patch.max_participants {
            self.max_participants = Some(max_participants);
        }
        if let Some(settings) = patch.settings {
            self.settings = settings;
        }
        if let Some(meeting_type) = patch.meeting_type {
            self.meeting_type = Some(meeting_type);
        }
        if let Some(join_url) = patch.join_url {
            self.join_url = Some(join_url);
        }
        if let Some(password) = patch.password {
            self.password = Some(password);
        }

        self.updated_at = at;
        Ok(())
    }

    pub fn roster(&self) -> ParticipantRoster<'_> {
        ParticipantRoster::from_participants(&self.participants)
    }

    pub fn has_participant(&self, participant_id: &str) -> bool {
        self.roster().contains(participant_id)
    }

    /// Live admission: dedup, then capacity, then the edit guard.
    pub fn admit(&mut self, input: ParticipantInput, at: DateTime<Utc>) -> Result<()> {
        input.validate()?;
        self.ensure_not_member(&input.id)?;

        if let Some(capacity) = self.max_participants {
            if self.participants.len() >= capacity as usize {
                return Err(SchoolHubError::MeetingFull { meeting_id: self.id.clone(), capacity });
            }
        }

        self.ensure_editable()?;
        self.participants.push(input.into_participant(ParticipantStatus::Joined, at));
        self.updated_at = at;
        Ok(())
    }

    /// Pre-event sign-up. Only the dedup rule applies; capacity is not
    /// checked.
    pub fn register(&mut self, input: ParticipantInput, at: DateTime<Utc>) -> Result<()> {
        input.validate()?;
        self.ensure_not_member(&input.id)?;
        self.ensure_editable()?;
        self.participants.push(input.into_participant(ParticipantStatus::Registered, at));
        self.updated_at = at;
        Ok(())
    }

    /// Remove a participant by id. Returns whether an entry was removed.
    pub fn remove_participant(&mut self, participant_id: &str, at: DateTime<Utc>) -> Result<bool> {
        if !self.has_participant(participant_id) {
            return Ok(false);
        }
        self.ensure_editable()?;
        self.participants.retain(|p| p.id != participant_id);
        self.updated_at = at;
        Ok(true)
    }

    fn ensure_not_member(&self, participant_id: &str) -> Result<()> {
        if self.has_participant(participant_id) {
            return Err(SchoolHubError::AlreadyJoined {
                meeting_id: self.id.clone(),
                participant_id: participant_id.to_string(),
            });
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SchoolHubError::InvalidInput(format!("{field} must not be empty")));
    }
    Ok(())
}

fn require_positive_duration(duration: u32) -> Result<()> {
    if duration == 0 {
        return Err(SchoolHubError::InvalidInput("duration must be positive".into()));
    }
    Ok(())
}

fn require_positive_capacity(max_participants: Option<u32>) -> Result<()> {
    if max_participants == Some(0) {
        return Err(SchoolHubError::InvalidInput("maxParticipants must be positive".into()));
    }
    Ok(())
}
