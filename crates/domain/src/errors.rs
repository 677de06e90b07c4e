//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{MeetingAction, MeetingStatus};

/// Main error type for SchoolHub meetings
///
/// Variants fall into two groups. Logic errors (`NotFound`,
/// `InvalidTransition`, `MeetingImmutable`, `AlreadyJoined`, `MeetingFull`,
/// `InvalidTimestamp`, `InvalidInput`) are always returned to the caller.
/// Environment errors (`Database`, `Network`, `Config`, `Internal`) are
/// absorbed by the meeting coordinator and only surface from infrastructure
/// constructors and adapters.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SchoolHubError {
    #[error("Meeting not found: {0}")]
    NotFound(String),

    #[error("Cannot {action} a meeting that is {from}")]
    InvalidTransition { from: MeetingStatus, action: MeetingAction },

    #[error("Meeting {id} cannot be edited while {status}")]
    MeetingImmutable { id: String, status: MeetingStatus },

    #[error("Participant {participant_id} already in meeting {meeting_id}")]
    AlreadyJoined { meeting_id: String, participant_id: String },

    #[error("Meeting {meeting_id} is full ({capacity} participants)")]
    MeetingFull { meeting_id: String, capacity: u32 },

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SchoolHubError {
    /// True for failures caused by the environment (storage, network,
    /// configuration) rather than by the caller's request.
    pub fn is_environment(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Network(_) | Self::Config(_) | Self::Internal(_))
    }
}

/// Result type alias for SchoolHub operations
pub type Result<T> = std::result::Result<T, SchoolHubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logic_errors_are_not_environment_errors() {
        let errors = [
            SchoolHubError::NotFound("m-1".into()),
            SchoolHubError::InvalidTransition {
                from: MeetingStatus::Ended,
                action: MeetingAction::Start,
            },
            SchoolHubError::AlreadyJoined {
                meeting_id: "m-1".into(),
                participant_id: "p-1".into(),
            },
            SchoolHubError::MeetingFull { meeting_id: "m-1".into(), capacity: 2 },
            SchoolHubError::InvalidTimestamp("yesterday".into()),
        ];

        for err in errors {
            assert!(!err.is_environment(), "{err} should be a logic error");
        }
        assert!(SchoolHubError::Network("down".into()).is_environment());
        assert!(SchoolHubError::Database("locked".into()).is_environment());
    }

    #[test]
    fn transition_error_message_names_status_and_action() {
        let err = SchoolHubError::InvalidTransition {
            from: MeetingStatus::Cancelled,
            action: MeetingAction::End,
        };
        assert_eq!(err.to_string(), "Cannot end a meeting that is cancelled");
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(SchoolHubError::NotFound("m-9".into())).unwrap();
        assert_eq!(json["type"], "NotFound");
        assert_eq!(json["message"], "m-9");
    }
}
