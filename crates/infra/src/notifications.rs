//! Invitation delivery
//!
//! Outbound mail is not wired up yet; the notifier records each invitation
//! as a structured log event so operators can follow delivery.

use async_trait::async_trait;
use schoolhub_core::InvitationNotifier;
use schoolhub_domain::{Meeting, Result};
use tracing::info;

/// `InvitationNotifier` that emits one tracing event per recipient
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingInvitationNotifier;

#[async_trait]
impl InvitationNotifier for TracingInvitationNotifier {
    async fn notify(&self, meeting: &Meeting) -> Result<()> {
        for participant in &meeting.participants {
            info!(
                meeting_id = %meeting.id,
                participant_id = %participant.id,
                email = %participant.email,
                scheduled_time = %meeting.scheduled_time,
                join_url = meeting.join_url.as_deref().unwrap_or(""),
                "meeting invitation queued"
            );
        }
        Ok(())
    }
}
