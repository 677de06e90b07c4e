//! Pure helper functions shared by the core services

pub mod time_window;

pub use time_window::{
    is_joinable, is_within_day_window, is_within_horizon, parse_timestamp, start_of_day,
};
