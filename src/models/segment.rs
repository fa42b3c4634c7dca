use diesel::prelude::*;

use crate::domain::segment::{NewSegment as DomainNewSegment, Segment as DomainSegment};
use crate::domain::types::{SegmentDescription, SegmentSlug, TypeConstraintError};

/// Diesel model representing the `segments` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::segments)]
pub struct Segment {
    pub id: i32,
    pub slug: String,
    pub description: Option<String>,
}

/// Insertable form of [`Segment`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::segments)]
pub struct NewSegment<'a> {
    pub slug: &'a str,
    pub description: Option<&'a str>,
}

impl TryFrom<Segment> for DomainSegment {
    type Error = TypeConstraintError;

    fn try_from(segment: Segment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: segment.id.try_into()?,
            slug: SegmentSlug::new(segment.slug)?,
            description: segment
                .description
                .map(SegmentDescription::optional)
                .transpose()?
                .flatten(),
        })
    }
}

impl<'a> From<&'a DomainNewSegment> for NewSegment<'a> {
    fn from(segment: &'a DomainNewSegment) -> Self {
        Self {
            slug: segment.slug.as_str(),
            description: segment.description.as_deref(),
        }
    }
}
