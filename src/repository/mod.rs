use chrono::{NaiveDateTime, Utc};

use crate::db::{DbConnection, DbPool};
use crate::domain::history::{HistoryRecord, NewHistoryRecord};
use crate::domain::membership::{Membership, MembershipInsert};
use crate::domain::segment::{NewSegment, Segment};
use crate::domain::types::{SegmentDescription, SegmentSlug, UserId};
use crate::domain::user::{NewUser, User};

pub mod errors;
pub mod history;
pub mod membership;
pub mod segment;
pub mod user;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for segment entities.
pub trait SegmentReader {
    /// List every segment ordered by slug.
    fn list_segments(&self) -> RepositoryResult<Vec<Segment>>;
    /// Retrieve a segment by its slug.
    fn get_segment_by_slug(&self, slug: &SegmentSlug) -> RepositoryResult<Option<Segment>>;
}

/// Write operations for segment entities.
pub trait SegmentWriter {
    /// Persist a new segment.
    ///
    /// Fails with [`RepositoryError::AlreadyExists`] when the slug is taken.
    fn create_segment(&self, segment: &NewSegment) -> RepositoryResult<Segment>;
    /// Overwrite the description of a segment, returning the number of rows
    /// changed.
    fn update_segment_description(
        &self,
        slug: &SegmentSlug,
        description: Option<&SegmentDescription>,
    ) -> RepositoryResult<usize>;
    /// Delete a segment together with every membership referencing it.
    ///
    /// One `REMOVING` history record stamped with `removed_at` is written per
    /// membership removed. Returns the number of segment rows deleted.
    fn delete_segment(
        &self,
        slug: &SegmentSlug,
        removed_at: NaiveDateTime,
    ) -> RepositoryResult<usize>;
}

/// Read-only operations for user entities.
pub trait UserReader {
    /// List every user ordered by id.
    fn list_users(&self) -> RepositoryResult<Vec<User>>;
    /// Retrieve a user by its identifier.
    fn get_user_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;
}

/// Write operations for user entities.
pub trait UserWriter {
    /// Persist a new user and return it with its assigned identifier.
    fn create_user(&self, user: &NewUser) -> RepositoryResult<User>;
}

/// Read-only operations for user/segment memberships.
pub trait MembershipReader {
    /// Whether a membership row exists for the pair, expired or not.
    fn membership_exists(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<bool>;
    /// Memberships of the user with no deadline or a deadline after `now`.
    fn list_active_memberships(
        &self,
        user_id: UserId,
        now: NaiveDateTime,
    ) -> RepositoryResult<Vec<Membership>>;
}

/// Write operations for user/segment memberships.
pub trait MembershipWriter {
    /// Insert a membership row unless one already exists for the pair.
    fn add_membership(&self, membership: &Membership) -> RepositoryResult<MembershipInsert>;
    /// Delete the membership row for the pair, returning the rows removed.
    fn remove_membership(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<usize>;
}

/// Read-only access to the membership audit trail.
pub trait HistoryReader {
    /// History of a user ordered by action date, oldest first.
    fn list_history(&self, user_id: UserId) -> RepositoryResult<Vec<HistoryRecord>>;
}

/// Append-only access to the membership audit trail.
pub trait HistoryWriter {
    /// Append a single history record.
    fn append_history(&self, record: &NewHistoryRecord) -> RepositoryResult<usize>;

    /// Record that `slug` was added to the user now.
    fn record_add(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<usize> {
        let record = NewHistoryRecord::adding(user_id, slug.clone(), Utc::now().naive_utc());
        self.append_history(&record)
    }

    /// Record that `slug` was removed from the user now.
    fn record_remove(&self, user_id: UserId, slug: &SegmentSlug) -> RepositoryResult<usize> {
        let record = NewHistoryRecord::removing(user_id, slug.clone(), Utc::now().naive_utc());
        self.append_history(&record)
    }
}
