//! Sample meetings used when neither store has data
//!
//! The set is fixed in content; only the times are anchored to `now` so the
//! dashboards show something in the "today" and "upcoming" views on first
//! run.

use chrono::{DateTime, Duration, Utc};
use schoolhub_domain::{Meeting, MeetingSettings, MeetingStatus};

/// Ids of the seeded meetings, in the order they are returned.
pub const SAMPLE_MEETING_IDS: [&str; 3] =
    ["sample-staff-sync", "sample-parent-teacher", "sample-science-review"];

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    offset: Duration,
    duration: u32,
    host: (&'static str, &'static str, &'static str),
    meeting_type: &'static str,
    max_participants: Option<u32>,
}

/// Build the sample set relative to `now`.
pub fn sample_meetings(now: DateTime<Utc>) -> Vec<Meeting> {
    let samples = [
        Sample {
            id: SAMPLE_MEETING_IDS[0],
            title: "Weekly Staff Meeting",
            description: "Announcements, timetable changes and open floor for all staff.",
            offset: Duration::hours(2),
            duration: 60,
            host: ("admin-1", "Principal Okafor", "principal@school.example"),
            meeting_type: "staff",
            max_participants: None,
        },
        Sample {
            id: SAMPLE_MEETING_IDS[1],
            title: "Parent-Teacher Conference",
            description: "Term progress review with parents of Year 8 students.",
            offset: Duration::days(1),
            duration: 30,
            host: ("teacher-12", "Ms. Lindqvist", "lindqvist@school.example"),
            meeting_type: "parent-teacher",
            max_participants: Some(10),
        },
        Sample {
            id: SAMPLE_MEETING_IDS[2],
            title: "Science Department Review",
            description: "Lab safety audit follow-up and curriculum planning.",
            offset: Duration::days(3),
            duration: 45,
            host: ("teacher-4", "Mr. Haddad", "haddad@school.example"),
            meeting_type: "department",
            max_participants: Some(15),
        },
    ];

    samples
        .into_iter()
        .map(|sample| Meeting {
            id: sample.id.to_string(),
            title: sample.title.to_string(),
            description: sample.description.to_string(),
            scheduled_time: now + sample.offset,
            duration: sample.duration,
            host_id: sample.host.0.to_string(),
            host_name: sample.host.1.to_string(),
            host_email: sample.host.2.to_string(),
            status: MeetingStatus::Scheduled,
            max_participants: sample.max_participants,
            participants: Vec::new(),
            settings: MeetingSettings::default(),
            meeting_type: Some(sample.meeting_type.to_string()),
            created_at: now,
            updated_at: now,
            started_at: None,
            started_by: None,
            ended_at: None,
            ended_by: None,
            join_url: None,
            password: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_set_is_non_empty_and_scheduled() {
        let now = Utc::now();
        let meetings = sample_meetings(now);

        assert_eq!(meetings.len(), SAMPLE_MEETING_IDS.len());
        assert!(meetings.iter().all(|m| m.status == MeetingStatus::Scheduled));
        assert!(meetings.iter().all(|m| m.scheduled_time > now));
        assert!(meetings.iter().all(|m| !m.title.is_empty() && m.duration > 0));
    }
}
