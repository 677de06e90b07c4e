//! Shared fixtures for `schoolhub-infra` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use schoolhub_domain::{Meeting, MeetingDraft};
use schoolhub_infra::database::DbManager;
use serde_json::{json, Value};
use tempfile::TempDir;

/// Temporary database that lives as long as the wrapper.
pub struct TestDatabase {
    pub manager: Arc<DbManager>,
    pub temp_dir: TempDir,
}

impl TestDatabase {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir should be created");
        let manager = DbManager::new(temp_dir.path().join("schoolhub.db"), 2)
            .expect("db manager should be created");
        manager.run_migrations().expect("schema migrations should apply");

        Self { manager: Arc::new(manager), temp_dir }
    }

    pub fn db_path(&self) -> String {
        self.manager.path().to_string_lossy().into_owned()
    }
}

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

pub fn meeting(id: &str) -> Meeting {
    let draft = MeetingDraft::new(format!("Meeting {id}"), "Agenda to follow", base_time(), 30)
        .hosted_by("teacher-1", "Ada Moreno", "moreno@school.example")
        .with_type("staff");
    Meeting::from_draft(id, draft, base_time()).expect("valid draft")
}

/// Wire shape of a meeting as the remote backend sends it.
pub fn meeting_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Meeting {id}"),
        "description": "Agenda to follow",
        "scheduledTime": "2025-03-10T14:00:00Z",
        "duration": 60,
        "hostId": "teacher-1",
        "hostName": "Ada Moreno",
        "hostEmail": "moreno@school.example",
        "status": "scheduled",
        "maxParticipants": 20,
        "participants": [{
            "id": "parent-3",
            "name": "Jo Park",
            "email": "park@example.com",
            "joinedAt": "2025-03-09T18:00:00Z",
            "status": "registered"
        }],
        "settings": {
            "recordingEnabled": false,
            "waitingRoomEnabled": true,
            "joinBeforeHost": false,
            "muteOnEntry": true
        },
        "type": "parent-teacher",
        "createdAt": "2025-03-01T08:00:00Z",
        "updatedAt": "2025-03-09T18:00:00Z"
    })
}
