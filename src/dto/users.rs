use serde::{Deserialize, Serialize};

use crate::domain::history::HistoryRecord;
use crate::domain::membership::{SegmentAssignment, UserSegments};
use crate::domain::types::{OperationType, UserId};
use crate::domain::user::User;
use crate::dto::format_date_time;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUserResponseDto {
    pub id: i32,
}

impl From<UserId> for CreateUserResponseDto {
    fn from(value: UserId) -> Self {
        Self { id: value.get() }
    }
}

/// A segment with its deadline; a missing deadline is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentWithDeadlineDto {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<String>,
}

impl From<SegmentAssignment> for SegmentWithDeadlineDto {
    fn from(value: SegmentAssignment) -> Self {
        Self {
            slug: value.slug.into_inner(),
            deadline_date: value.deadline.map(format_date_time),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserActiveSegmentsDto {
    pub user_id: i32,
    pub segments: Vec<SegmentWithDeadlineDto>,
}

impl From<UserSegments> for UserActiveSegmentsDto {
    fn from(value: UserSegments) -> Self {
        Self {
            user_id: value.user_id.get(),
            segments: value
                .segments
                .into_iter()
                .map(SegmentWithDeadlineDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecordDto {
    pub user_id: i32,
    pub slug: String,
    pub action_date: String,
    pub operation_type: OperationType,
}

impl From<HistoryRecord> for HistoryRecordDto {
    fn from(value: HistoryRecord) -> Self {
        Self {
            user_id: value.user_id.get(),
            slug: value.slug.into_inner(),
            action_date: format_date_time(value.action_date),
            operation_type: value.operation_type,
        }
    }
}
