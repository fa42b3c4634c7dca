use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{SegmentSlug, UserId};

/// A user's membership in a segment, optionally bounded by a deadline.
///
/// At most one membership exists per `(user_id, slug)` pair. A membership
/// without a deadline never expires. Expired rows are not deleted; they are
/// filtered out when active segments are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Membership {
    pub user_id: UserId,
    pub slug: SegmentSlug,
    pub deadline: Option<NaiveDateTime>,
}

impl Membership {
    /// Whether the membership is still in effect at `now`.
    ///
    /// The deadline itself is exclusive: a membership whose deadline equals
    /// `now` is no longer active. `DieselRepository::list_active_memberships`
    /// evaluates the same rule in SQL and is what production reads use; the
    /// two must agree for every deadline accepted by the forms layer.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        self.deadline.is_none_or(|deadline| deadline > now)
    }
}

/// Outcome of inserting a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipInsert {
    /// A new row was written.
    Inserted,
    /// A row for the same `(user_id, slug)` pair already existed.
    AlreadyPresent,
}

/// A segment to attach to a user together with its optional deadline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SegmentAssignment {
    pub slug: SegmentSlug,
    pub deadline: Option<NaiveDateTime>,
}

impl From<Membership> for SegmentAssignment {
    fn from(membership: Membership) -> Self {
        Self {
            slug: membership.slug,
            deadline: membership.deadline,
        }
    }
}

/// Batch of membership changes applied to a single user.
///
/// Additions are applied first, in order, then removals, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentChanges {
    pub add: Vec<SegmentAssignment>,
    pub remove: Vec<SegmentSlug>,
}

/// Segments currently active for a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSegments {
    pub user_id: UserId,
    pub segments: Vec<SegmentAssignment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeDelta};

    fn membership(deadline: Option<NaiveDateTime>) -> Membership {
        Membership {
            user_id: UserId::new(1).unwrap(),
            slug: SegmentSlug::new("promo").unwrap(),
            deadline,
        }
    }

    #[test]
    fn membership_without_deadline_never_expires() {
        let far_future = DateTime::from_timestamp(32_503_680_000, 0)
            .unwrap()
            .naive_utc();
        assert!(membership(None).is_active_at(far_future));
    }

    #[test]
    fn deadline_is_exclusive() {
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap().naive_utc();
        assert!(!membership(Some(now)).is_active_at(now));
        assert!(membership(Some(now + TimeDelta::seconds(1))).is_active_at(now));
        assert!(!membership(Some(now - TimeDelta::seconds(1))).is_active_at(now));
    }
}
