//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;
use schoolhub_domain::SchoolHubError;
use serde_json::Error as JsonError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SchoolHubError);

impl From<InfraError> for SchoolHubError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SchoolHubError> for InfraError {
    fn from(value: SchoolHubError) -> Self {
        InfraError(value)
    }
}

trait IntoSchoolHubError {
    fn into_schoolhub(self) -> SchoolHubError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SchoolHubError */
/* -------------------------------------------------------------------------- */

impl IntoSchoolHubError for SqlError {
    fn into_schoolhub(self) -> SchoolHubError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match err.code {
                    ErrorCode::DatabaseBusy => SchoolHubError::Database("database is busy".into()),
                    ErrorCode::DatabaseLocked => {
                        SchoolHubError::Database("database is locked".into())
                    }
                    ErrorCode::ReadOnly => SchoolHubError::Database("database is read-only".into()),
                    ErrorCode::DiskFull => SchoolHubError::Database("disk is full".into()),
                    ErrorCode::CannotOpen => {
                        SchoolHubError::Database(format!("unable to open database file: {message}"))
                    }
                    _ => SchoolHubError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => SchoolHubError::Database("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                SchoolHubError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                SchoolHubError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => SchoolHubError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => SchoolHubError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_schoolhub())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SchoolHubError */
/* -------------------------------------------------------------------------- */

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        InfraError(SchoolHubError::Database(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → SchoolHubError */
/* -------------------------------------------------------------------------- */

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(SchoolHubError::Database(format!("stored meetings are not valid JSON: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → SchoolHubError */
/* -------------------------------------------------------------------------- */

// Every HTTP failure is an environment failure from the coordinator's point
// of view, so status codes only shape the message.
impl IntoSchoolHubError for HttpError {
    fn into_schoolhub(self) -> SchoolHubError {
        if self.is_timeout() {
            return SchoolHubError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return SchoolHubError::Network("HTTP connection failure".into());
        }

        if self.is_builder() {
            return SchoolHubError::Config(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            return SchoolHubError::Network(format!(
                "HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status")
            ));
        }

        if self.is_decode() {
            return SchoolHubError::Network(format!("malformed response body: {self}"));
        }

        SchoolHubError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_schoolhub())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
