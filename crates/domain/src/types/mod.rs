//! Domain types and models
//!
//! Meetings and their embedded participants, in the JSON shape shared by the
//! remote API and the local store.

pub mod meeting;
pub mod participant;

pub use meeting::{
    Meeting, MeetingAction, MeetingDraft, MeetingPatch, MeetingSettings, MeetingStatus,
};
pub use participant::{Participant, ParticipantInput, ParticipantRoster, ParticipantStatus};
