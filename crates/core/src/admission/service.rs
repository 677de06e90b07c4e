//! Participant admission service - core business logic

use std::sync::Arc;

use chrono::{DateTime, Utc};
use schoolhub_domain::utils::is_joinable;
use schoolhub_domain::{Meeting, MeetingStatus, ParticipantInput, Result};
use tracing::{debug, info, warn};

use crate::meetings::{InvitationNotifier, MeetingCoordinator};

/// Whether `meeting` may be entered at `now`.
///
/// True only while the meeting is still `scheduled` and `now` falls inside
/// the grace window around its scheduled slot.
pub fn can_join_now(meeting: &Meeting, now: DateTime<Utc>) -> bool {
    meeting.status == MeetingStatus::Scheduled
        && is_joinable(meeting.scheduled_time, meeting.duration, now)
}

/// Participant admission service
pub struct AdmissionService {
    coordinator: Arc<MeetingCoordinator>,
    notifier: Option<Arc<dyn InvitationNotifier>>,
}

impl AdmissionService {
    /// Create a new admission service
    pub fn new(coordinator: Arc<MeetingCoordinator>) -> Self {
        Self { coordinator, notifier: None }
    }

    /// Attach the channel used by [`send_invitations`](Self::send_invitations)
    pub fn with_notifier(mut self, notifier: Arc<dyn InvitationNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Add `participant` to the meeting as `joined`.
    ///
    /// The join window is not enforced here; callers check
    /// [`can_join_now`] first when they need it.
    ///
    /// # Errors
    /// `NotFound`, `AlreadyJoined`, `MeetingFull`, or `MeetingImmutable` for
    /// ended and cancelled meetings.
    pub async fn join(&self, meeting_id: &str, participant: ParticipantInput) -> Result<Meeting> {
        let participant_id = participant.id.clone();
        let meeting = self
            .coordinator
            .modify(meeting_id, move |meeting, now| meeting.admit(participant, now))
            .await?;

        info!(
            meeting_id,
            participant_id = %participant_id,
            participants = meeting.participants.len(),
            "participant joined"
        );
        Ok(meeting)
    }

    /// Add `participant` as `registered`. Capacity is not checked.
    ///
    /// # Errors
    /// `NotFound`, `AlreadyJoined` or `MeetingImmutable`.
    pub async fn register(
        &self,
        meeting_id: &str,
        participant: ParticipantInput,
    ) -> Result<Meeting> {
        let participant_id = participant.id.clone();
        let meeting = self
            .coordinator
            .modify(meeting_id, move |meeting, now| meeting.register(participant, now))
            .await?;

        info!(meeting_id, participant_id = %participant_id, "participant registered");
        Ok(meeting)
    }

    /// Remove a participant. Leaving twice is not an error.
    ///
    /// # Errors
    /// `NotFound` for an unknown meeting, `MeetingImmutable` when removing
    /// from an ended or cancelled meeting.
    pub async fn leave(&self, meeting_id: &str, participant_id: &str) -> Result<Meeting> {
        let meeting = self
            .coordinator
            .modify(meeting_id, |meeting, now| {
                if !meeting.remove_participant(participant_id, now)? {
                    debug!(meeting_id, participant_id, "participant was not on the roster");
                }
                Ok(())
            })
            .await?;

        info!(meeting_id, participant_id, "participant left");
        Ok(meeting)
    }

    /// Signal invitations for every participant of the meeting.
    ///
    /// Returns the number of participants signalled. Notifier failures are
    /// logged and not reported; nothing is persisted.
    ///
    /// # Errors
    /// `NotFound` when the meeting does not exist.
    pub async fn send_invitations(&self, meeting_id: &str) -> Result<usize> {
        let meeting = self.coordinator.get(meeting_id).await?;
        let recipients = meeting.participants.len();

        match &self.notifier {
            Some(notifier) => {
                if let Err(err) = notifier.notify(&meeting).await {
                    warn!(error = %err, meeting_id, "failed to dispatch meeting invitations");
                }
            }
            None => debug!(meeting_id, "no invitation notifier configured"),
        }

        info!(meeting_id, recipients, "meeting invitations sent");
        Ok(recipients)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use schoolhub_domain::{MeetingSettings, MeetingStatus};

    use super::*;

    fn meeting_at(scheduled_time: DateTime<Utc>, status: MeetingStatus) -> Meeting {
        Meeting {
            id: "m-1".into(),
            title: "Board review".into(),
            description: "Quarterly".into(),
            scheduled_time,
            duration: 30,
            host_id: "host".into(),
            host_name: "Host".into(),
            host_email: "host@school.example".into(),
            status,
            max_participants: None,
            participants: Vec::new(),
            settings: MeetingSettings::default(),
            meeting_type: None,
            created_at: scheduled_time,
            updated_at: scheduled_time,
            started_at: None,
            started_by: None,
            ended_at: None,
            ended_by: None,
            join_url: None,
            password: None,
        }
    }

    #[test]
    fn joinable_inside_window_while_scheduled() {
        let scheduled = Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap();
        let meeting = meeting_at(scheduled, MeetingStatus::Scheduled);

        assert!(can_join_now(&meeting, scheduled - Duration::minutes(60)));
        assert!(can_join_now(&meeting, scheduled + Duration::minutes(90)));
        assert!(!can_join_now(&meeting, scheduled - Duration::minutes(61)));
        assert!(!can_join_now(&meeting, scheduled + Duration::minutes(91)));
    }

    #[test]
    fn not_joinable_once_started_or_closed() {
        let scheduled = Utc.with_ymd_and_hms(2025, 3, 10, 14, 0, 0).unwrap();

        for status in [MeetingStatus::Active, MeetingStatus::Ended, MeetingStatus::Cancelled] {
            assert!(!can_join_now(&meeting_at(scheduled, status), scheduled), "{status}");
        }
    }
}
