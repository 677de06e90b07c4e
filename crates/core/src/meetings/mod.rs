//! Meeting persistence: ports, the coordinator, id generation and sample data

pub mod coordinator;
pub mod id;
pub mod ports;
pub mod seed;

pub use coordinator::{MeetingCoordinator, MeetingSnapshot, Source};
pub use id::MeetingIdGenerator;
pub use ports::{InvitationNotifier, LocalMeetingStore, RemoteMeetingBackend};
pub use seed::{sample_meetings, SAMPLE_MEETING_IDS};
