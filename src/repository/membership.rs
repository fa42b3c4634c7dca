use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::membership::{Membership, MembershipInsert};
use crate::domain::types::{SegmentSlug, UserId};
use crate::models::membership::{Membership as DbMembership, NewMembership as DbNewMembership};
use crate::repository::{DieselRepository, MembershipReader, MembershipWriter, RepositoryResult};

impl MembershipReader for DieselRepository {
    fn membership_exists(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<bool> {
        use crate::schema::users_segments;

        let mut conn = self.conn()?;

        let exists = diesel::select(diesel::dsl::exists(
            users_segments::table
                .filter(users_segments::user_id.eq(user_id.get()))
                .filter(users_segments::slug.eq(slug.as_str())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(exists)
    }

    fn list_active_memberships(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> RepositoryResult<Vec<Membership>> {
        use crate::schema::users_segments;

        let mut conn = self.conn()?;

        let items = users_segments::table
            .filter(users_segments::user_id.eq(user_id.get()))
            .filter(
                users_segments::deadline_date
                    .is_null()
                    .or(users_segments::deadline_date.gt(now)),
            )
            .order(users_segments::slug.asc())
            .load::<DbMembership>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Membership>, _>>()?;

        Ok(items)
    }
}

impl MembershipWriter for DieselRepository {
    fn add_membership(&self, membership: &Membership) -> RepositoryResult<MembershipInsert> {
        use crate::schema::users_segments;

        let mut conn = self.conn()?;
        let db_membership: DbNewMembership = membership.into();

        // The (user_id, slug) primary key is the real idempotency guarantee;
        // a concurrent insert of the same pair lands here as zero rows.
        let affected = diesel::insert_into(users_segments::table)
            .values(&db_membership)
            .on_conflict_do_nothing()
            .execute(&mut conn)?;

        Ok(if affected == 0 {
            MembershipInsert::AlreadyPresent
        } else {
            MembershipInsert::Inserted
        })
    }

    fn remove_membership(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<usize> {
        use crate::schema::users_segments;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            users_segments::table
                .filter(users_segments::user_id.eq(user_id.get()))
                .filter(users_segments::slug.eq(slug.as_str())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
