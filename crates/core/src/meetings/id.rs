//! Time-based meeting identifiers

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};

/// Issues millisecond-timestamp ids that strictly increase within a process,
/// even when several meetings are created in the same millisecond or the
/// clock steps backwards.
#[derive(Debug, Default)]
pub struct MeetingIdGenerator {
    last: AtomicI64,
}

impl MeetingIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&self, now: DateTime<Utc>) -> String {
        let candidate = now.timestamp_millis();
        let mut previous = self.last.load(Ordering::SeqCst);

        loop {
            let next = candidate.max(previous.saturating_add(1));
            match self.last.compare_exchange(previous, next, Ordering::SeqCst, Ordering::SeqCst) {
                Ok(_) => return next.to_string(),
                Err(actual) => previous = actual,
            }
        }
    }

    /// Next id not already taken according to `is_taken`.
    pub fn next_unused(&self, now: DateTime<Utc>, is_taken: impl Fn(&str) -> bool) -> String {
        loop {
            let id = self.next_id(now);
            if !is_taken(&id) {
                return id;
            }
        }
    }
}
