//! Local storage implementations

pub mod manager;
pub mod meeting_store;
pub mod memory_store;

pub use manager::{DbManager, SqliteConnection};
pub use meeting_store::SqliteMeetingStore;
pub use memory_store::InMemoryMeetingStore;
