use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{HistoryId, OperationType, SegmentSlug, UserId};

/// Immutable audit entry describing one membership change.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HistoryRecord {
    pub id: HistoryId,
    pub user_id: UserId,
    pub slug: SegmentSlug,
    pub action_date: NaiveDateTime,
    pub operation_type: OperationType,
}

/// Data required to append a [`HistoryRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewHistoryRecord {
    pub user_id: UserId,
    pub slug: SegmentSlug,
    pub action_date: NaiveDateTime,
    pub operation_type: OperationType,
}

impl NewHistoryRecord {
    /// An `ADDING` entry stamped with `action_date`.
    pub fn adding(user_id: UserId, slug: SegmentSlug, action_date: NaiveDateTime) -> Self {
        Self {
            user_id,
            slug,
            action_date,
            operation_type: OperationType::Adding,
        }
    }

    /// A `REMOVING` entry stamped with `action_date`.
    pub fn removing(user_id: UserId, slug: SegmentSlug, action_date: NaiveDateTime) -> Self {
        Self {
            user_id,
            slug,
            action_date,
            operation_type: OperationType::Removing,
        }
    }
}
