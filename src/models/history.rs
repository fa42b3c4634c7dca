use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::history::{
    HistoryRecord as DomainHistoryRecord, NewHistoryRecord as DomainNewHistoryRecord,
};
use crate::domain::types::{OperationType, SegmentSlug, TypeConstraintError};

/// Diesel model representing a row in the `history` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::history)]
pub struct HistoryRecord {
    pub id: i32,
    pub user_id: i32,
    pub slug: String,
    pub action_date: NaiveDateTime,
    pub operation_type: String,
}

/// Insertable form of [`HistoryRecord`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::history)]
pub struct NewHistoryRecord<'a> {
    pub user_id: i32,
    pub slug: &'a str,
    pub action_date: NaiveDateTime,
    pub operation_type: &'static str,
}

impl TryFrom<HistoryRecord> for DomainHistoryRecord {
    type Error = TypeConstraintError;

    fn try_from(record: HistoryRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            user_id: record.user_id.try_into()?,
            slug: SegmentSlug::new(record.slug)?,
            action_date: record.action_date,
            operation_type: OperationType::try_from(record.operation_type)?,
        })
    }
}

impl<'a> From<&'a DomainNewHistoryRecord> for NewHistoryRecord<'a> {
    fn from(record: &'a DomainNewHistoryRecord) -> Self {
        Self {
            user_id: record.user_id.get(),
            slug: record.slug.as_str(),
            action_date: record.action_date,
            operation_type: record.operation_type.as_str(),
        }
    }
}
