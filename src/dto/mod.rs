//! JSON bodies returned by the HTTP layer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub mod segments;
pub mod users;

/// Timestamp layout used in every response body.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_date_time(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}
