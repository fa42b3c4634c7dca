use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::segment::{NewSegment, Segment};
use crate::domain::types::{OperationType, SegmentDescription, SegmentSlug};
use crate::models::history::NewHistoryRecord as DbNewHistoryRecord;
use crate::models::segment::{NewSegment as DbNewSegment, Segment as DbSegment};
use crate::repository::{DieselRepository, RepositoryResult, SegmentReader, SegmentWriter};

impl SegmentReader for DieselRepository {
    fn list_segments(&self) -> RepositoryResult<Vec<Segment>> {
        use crate::schema::segments;

        let mut conn = self.conn()?;

        let items = segments::table
            .order(segments::slug.asc())
            .load::<DbSegment>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Segment>, _>>()?;

        Ok(items)
    }

    fn get_segment_by_slug(&self, slug: &SegmentSlug) -> RepositoryResult<Option<Segment>> {
        use crate::schema::segments;

        let mut conn = self.conn()?;

        let segment = segments::table
            .filter(segments::slug.eq(slug.as_str()))
            .first::<DbSegment>(&mut conn)
            .optional()?;

        let segment = segment.map(TryInto::try_into).transpose()?;
        Ok(segment)
    }
}

impl SegmentWriter for DieselRepository {
    fn create_segment(&self, segment: &NewSegment) -> RepositoryResult<Segment> {
        use crate::schema::segments;

        let mut conn = self.conn()?;
        let db_segment: DbNewSegment = segment.into();

        let created = diesel::insert_into(segments::table)
            .values(&db_segment)
            .get_result::<DbSegment>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn update_segment_description(
        &self,
        slug: &SegmentSlug,
        description: Option<&SegmentDescription>,
    ) -> RepositoryResult<usize> {
        use crate::schema::segments;

        let mut conn = self.conn()?;

        let affected = diesel::update(segments::table.filter(segments::slug.eq(slug.as_str())))
            .set(segments::description.eq(description.map(SegmentDescription::as_str)))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_segment(
        &self,
        slug: &SegmentSlug,
        removed_at: NaiveDateTime,
    ) -> RepositoryResult<usize> {
        use crate::schema::{history, segments, users_segments};

        let mut conn = self.conn()?;

        let affected = conn.transaction::<_, diesel::result::Error, _>(|conn| {
            let members: Vec<i32> = users_segments::table
                .filter(users_segments::slug.eq(slug.as_str()))
                .select(users_segments::user_id)
                .load(conn)?;

            diesel::delete(users_segments::table.filter(users_segments::slug.eq(slug.as_str())))
                .execute(conn)?;

            let records = members
                .into_iter()
                .map(|user_id| DbNewHistoryRecord {
                    user_id,
                    slug: slug.as_str(),
                    action_date: removed_at,
                    operation_type: OperationType::Removing.as_str(),
                })
                .collect::<Vec<_>>();
            if !records.is_empty() {
                diesel::insert_into(history::table)
                    .values(&records)
                    .execute(conn)?;
            }

            diesel::delete(segments::table.filter(segments::slug.eq(slug.as_str()))).execute(conn)
        })?;

        Ok(affected)
    }
}
