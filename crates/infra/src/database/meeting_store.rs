//! SQLite-backed implementation of `LocalMeetingStore`
//!
//! The whole collection is stored as one JSON document in `app_storage`
//! under the `meetings` key, in the same shape the remote API uses.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use schoolhub_core::LocalMeetingStore;
use schoolhub_domain::constants::LOCAL_MEETINGS_KEY;
use schoolhub_domain::{Meeting, Result as DomainResult, SchoolHubError};
use tokio::task;
use tracing::debug;

use super::manager::{map_sql_error, DbManager};
use crate::errors::InfraError;

/// SQLite-backed local meeting store
pub struct SqliteMeetingStore {
    db: Arc<DbManager>,
}

impl SqliteMeetingStore {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LocalMeetingStore for SqliteMeetingStore {
    async fn load(&self) -> DomainResult<Vec<Meeting>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Meeting>> {
            let conn = db.get_connection()?;
            let document: Option<String> = conn
                .query_row(
                    "SELECT value FROM app_storage WHERE key = ?1",
                    params![LOCAL_MEETINGS_KEY],
                    |row| row.get(0),
                )
                .optional()
                .map_err(map_sql_error)?;

            match document {
                Some(json) => {
                    let meetings: Vec<Meeting> =
                        serde_json::from_str(&json).map_err(InfraError::from)?;
                    debug!(count = meetings.len(), "loaded local meetings");
                    Ok(meetings)
                }
                None => Ok(Vec::new()),
            }
        })
        .await
        .map_err(map_join_error)?
    }

    async fn save(&self, meetings: &[Meeting]) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let json = serde_json::to_string(meetings).map_err(InfraError::from)?;
        let count = meetings.len();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO app_storage (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE
                 SET value = excluded.value, updated_at = excluded.updated_at",
                params![LOCAL_MEETINGS_KEY, json, Utc::now().timestamp()],
            )
            .map_err(map_sql_error)?;
            debug!(count, "saved local meetings");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn clear(&self) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute("DELETE FROM app_storage WHERE key = ?1", params![LOCAL_MEETINGS_KEY])
                .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_join_error(err: task::JoinError) -> SchoolHubError {
    SchoolHubError::Internal(format!("Task join error: {err}"))
}
