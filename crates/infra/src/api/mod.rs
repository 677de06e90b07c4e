//! Remote meetings API
//!
//! HTTP adapter for the authoritative meetings backend.
//!
//! # Routes
//!
//! - `GET    {base}/api/meetings`          list
//! - `POST   {base}/api/meetings`          create
//! - `PUT    {base}/api/meetings?id={id}`  update
//! - `DELETE {base}/api/meetings?id={id}`  delete

pub mod errors;
pub mod meetings;

pub use errors::{ApiError, ApiErrorCategory};
pub use meetings::HttpMeetingBackend;
