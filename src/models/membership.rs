use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::membership::Membership as DomainMembership;
use crate::domain::types::{SegmentSlug, TypeConstraintError};

/// Diesel model representing a row in the `users_segments` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::users_segments)]
#[diesel(primary_key(user_id, slug))]
pub struct Membership {
    pub user_id: i32,
    pub slug: String,
    pub deadline_date: Option<NaiveDateTime>,
}

/// Insertable form of [`Membership`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::users_segments)]
pub struct NewMembership<'a> {
    pub user_id: i32,
    pub slug: &'a str,
    pub deadline_date: Option<NaiveDateTime>,
}

impl TryFrom<Membership> for DomainMembership {
    type Error = TypeConstraintError;

    fn try_from(membership: Membership) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: membership.user_id.try_into()?,
            slug: SegmentSlug::new(membership.slug)?,
            deadline: membership.deadline_date,
        })
    }
}

impl<'a> From<&'a DomainMembership> for NewMembership<'a> {
    fn from(membership: &'a DomainMembership) -> Self {
        Self {
            user_id: membership.user_id.get(),
            slug: membership.slug.as_str(),
            deadline_date: membership.deadline,
        }
    }
}
