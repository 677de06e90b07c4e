//! Assembled meeting services
//!
//! # Example
//!
//! ```no_run
//! use schoolhub_infra::config;
//! use schoolhub_infra::services::MeetingServices;
//!
//! # async fn example() -> schoolhub_domain::Result<()> {
//! let services = MeetingServices::from_config(&config::load()?)?;
//!
//! for meeting in services.upcoming().await {
//!     println!("{} at {}", meeting.title, meeting.scheduled_time);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use chrono::Local;
use schoolhub_core::{queries, AdmissionService, Clock, MeetingCoordinator, SystemClock};
use schoolhub_domain::{Config, Meeting, Result};
use tracing::info;

use crate::api::HttpMeetingBackend;
use crate::database::{DbManager, SqliteMeetingStore};
use crate::notifications::TracingInvitationNotifier;

/// Coordinator and admission service sharing one local store and remote
/// backend
pub struct MeetingServices {
    pub coordinator: Arc<MeetingCoordinator>,
    pub admission: Arc<AdmissionService>,
    pub db: Arc<DbManager>,
    upcoming_hours: i64,
}

impl MeetingServices {
    /// Wire the services with the wall clock.
    ///
    /// # Errors
    /// Returns `Database` when the local store cannot be opened and `Config`
    /// for an invalid remote base URL.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Wire the services with an explicit clock.
    ///
    /// # Errors
    /// See [`from_config`](Self::from_config).
    pub fn with_clock(config: &Config, clock: Arc<dyn Clock>) -> Result<Self> {
        let db = Arc::new(DbManager::from_config(&config.storage)?);
        let store = Arc::new(SqliteMeetingStore::new(Arc::clone(&db)));

        let mut coordinator = MeetingCoordinator::new(store, clock)
            .with_seed_data(config.meetings.seed_sample_data);

        if config.remote.enabled {
            let backend = HttpMeetingBackend::from_config(&config.remote)?;
            info!(endpoint = %backend.endpoint(), "remote meetings backend enabled");
            coordinator = coordinator.with_remote(Arc::new(backend));
        } else {
            info!("remote meetings backend disabled, running on local store only");
        }

        let coordinator = Arc::new(coordinator);
        let admission = Arc::new(
            AdmissionService::new(Arc::clone(&coordinator))
                .with_notifier(Arc::new(TracingInvitationNotifier)),
        );

        Ok(Self { coordinator, admission, db, upcoming_hours: config.meetings.upcoming_hours })
    }

    /// Meetings on today's calendar day in the host's local time zone.
    pub async fn today(&self) -> Vec<Meeting> {
        let snapshot = self.coordinator.read().await;
        let now = self.coordinator.now().with_timezone(&Local);
        queries::today(&snapshot.meetings, &now).into_iter().cloned().collect()
    }

    /// Meetings within the configured horizon, earliest first.
    pub async fn upcoming(&self) -> Vec<Meeting> {
        let snapshot = self.coordinator.read().await;
        queries::upcoming(&snapshot.meetings, self.coordinator.now(), self.upcoming_hours)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Meetings hosted or attended by `user_id`.
    pub async fn for_user(&self, user_id: &str) -> Vec<Meeting> {
        let snapshot = self.coordinator.read().await;
        queries::for_user(&snapshot.meetings, user_id).into_iter().cloned().collect()
    }

    /// Free-text search over the current collection.
    pub async fn search(&self, query: &str) -> Vec<Meeting> {
        let snapshot = self.coordinator.read().await;
        queries::search(&snapshot.meetings, query).into_iter().cloned().collect()
    }
}
