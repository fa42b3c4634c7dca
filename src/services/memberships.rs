//! Segmentation policy: idempotent add/remove with an audit trail and
//! deadline-aware reads of a user's active segments.

use chrono::{NaiveDateTime, Utc};

use crate::domain::history::HistoryRecord;
use crate::domain::membership::{
    Membership, MembershipInsert, SegmentAssignment, SegmentChanges, UserSegments,
};
use crate::domain::types::{SegmentSlug, UserId};
use crate::repository::{
    HistoryReader, HistoryWriter, MembershipReader, MembershipWriter, UserReader,
};
use crate::services::users::get_user;

use super::{ServiceError, ServiceResult};

fn membership_exists<R>(user_id: UserId, slug: &SegmentSlug, repo: &R) -> ServiceResult<bool>
where
    R: MembershipReader,
{
    repo.membership_exists(user_id, slug).map_err(|e| {
        log::error!("Failed to check membership of user {user_id} in {slug}: {e}");
        ServiceError::ReadError
    })
}

/// Attach a segment to a user.
///
/// Returns `Ok(false)` without writing anything when a membership row for
/// the pair already exists, even if its deadline has passed. A history
/// record is written only after a row was actually inserted; if that write
/// fails the membership stays in place and the error is reported.
pub fn add_segment_to_user<R>(
    user_id: UserId,
    assignment: &SegmentAssignment,
    repo: &R,
) -> ServiceResult<bool>
where
    R: UserReader + MembershipReader + MembershipWriter + HistoryWriter,
{
    get_user(user_id, repo)?;

    let slug = &assignment.slug;
    if membership_exists(user_id, slug, repo)? {
        log::debug!("User {user_id} already has segment {slug}");
        return Ok(false);
    }

    let membership = Membership {
        user_id,
        slug: slug.clone(),
        deadline: assignment.deadline,
    };
    match repo.add_membership(&membership) {
        Ok(MembershipInsert::Inserted) => {}
        Ok(MembershipInsert::AlreadyPresent) => {
            log::debug!("User {user_id} gained segment {slug} concurrently");
            return Ok(false);
        }
        Err(e) => {
            log::error!("Failed to add segment {slug} to user {user_id}: {e}");
            return Err(ServiceError::WriteError);
        }
    }

    if let Err(e) = repo.record_add(user_id, slug) {
        log::error!("Failed to record adding of segment {slug} to user {user_id}: {e}");
        return Err(ServiceError::WriteError);
    }

    log::info!("Added segment {slug} to user {user_id}");
    Ok(true)
}

/// Detach a segment from a user.
///
/// Returns `Ok(false)` without writing anything when the user has no
/// membership row for the slug.
pub fn remove_segment_from_user<R>(
    user_id: UserId,
    slug: &SegmentSlug,
    repo: &R,
) -> ServiceResult<bool>
where
    R: UserReader + MembershipReader + MembershipWriter + HistoryWriter,
{
    get_user(user_id, repo)?;

    if !membership_exists(user_id, slug, repo)? {
        log::debug!("User {user_id} has no segment {slug}");
        return Ok(false);
    }

    match repo.remove_membership(user_id, slug) {
        Ok(0) => {
            log::debug!("Segment {slug} of user {user_id} was removed concurrently");
            return Ok(false);
        }
        Ok(_) => {}
        Err(e) => {
            log::error!("Failed to remove segment {slug} from user {user_id}: {e}");
            return Err(ServiceError::WriteError);
        }
    }

    if let Err(e) = repo.record_remove(user_id, slug) {
        log::error!("Failed to record removal of segment {slug} from user {user_id}: {e}");
        return Err(ServiceError::WriteError);
    }

    log::info!("Removed segment {slug} from user {user_id}");
    Ok(true)
}

/// Apply a batch of additions then removals to one user.
///
/// Stops at the first failing step. Steps applied before it are kept: the
/// batch is not atomic.
pub fn change_segments_of_user<R>(
    user_id: UserId,
    changes: &SegmentChanges,
    repo: &R,
) -> ServiceResult<()>
where
    R: UserReader + MembershipReader + MembershipWriter + HistoryWriter,
{
    get_user(user_id, repo)?;

    for assignment in &changes.add {
        add_segment_to_user(user_id, assignment, repo)?;
    }

    for slug in &changes.remove {
        remove_segment_from_user(user_id, slug, repo)?;
    }

    Ok(())
}

/// Segments of the user that are active at `now`.
pub fn get_active_segments_of_user_at<R>(
    user_id: UserId,
    now: NaiveDateTime,
    repo: &R,
) -> ServiceResult<UserSegments>
where
    R: UserReader + MembershipReader,
{
    get_user(user_id, repo)?;

    match repo.list_active_memberships(user_id, now) {
        Ok(memberships) => Ok(UserSegments {
            user_id,
            segments: memberships
                .into_iter()
                .map(SegmentAssignment::from)
                .collect(),
        }),
        Err(e) => {
            log::error!("Failed to list active segments of user {user_id}: {e}");
            Err(ServiceError::ReadError)
        }
    }
}

/// Segments of the user that are active right now.
pub fn get_active_segments_of_user<R>(user_id: UserId, repo: &R) -> ServiceResult<UserSegments>
where
    R: UserReader + MembershipReader,
{
    get_active_segments_of_user_at(user_id, Utc::now().naive_utc(), repo)
}

/// Audit trail of a user's membership changes, oldest first.
pub fn list_user_history<R>(user_id: UserId, repo: &R) -> ServiceResult<Vec<HistoryRecord>>
where
    R: UserReader + HistoryReader,
{
    get_user(user_id, repo)?;

    repo.list_history(user_id).map_err(|e| {
        log::error!("Failed to list history of user {user_id}: {e}");
        ServiceError::ReadError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{OperationType, UserName};
    use crate::domain::user::User;
    use crate::repository::test::TestRepository;
    use chrono::{DateTime, TimeDelta};

    fn user_id() -> UserId {
        UserId::new(1).unwrap()
    }

    fn sample_user() -> User {
        User {
            id: user_id(),
            name: UserName::new("Alice").unwrap(),
        }
    }

    fn repo() -> TestRepository {
        TestRepository::new(vec![sample_user()], vec![])
    }

    fn slug(value: &str) -> SegmentSlug {
        SegmentSlug::new(value).unwrap()
    }

    fn assignment(value: &str, deadline: Option<NaiveDateTime>) -> SegmentAssignment {
        SegmentAssignment {
            slug: slug(value),
            deadline,
        }
    }

    fn epoch(seconds: i64) -> NaiveDateTime {
        DateTime::from_timestamp(seconds, 0).unwrap().naive_utc()
    }

    #[test]
    fn adding_twice_writes_one_row_and_one_history_record() {
        let repo = repo();

        assert!(add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap());
        assert!(!add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap());

        assert_eq!(repo.membership_count(), 1);
        let history = repo.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].operation_type, OperationType::Adding);
        assert_eq!(history[0].slug, "promo");
    }

    #[test]
    fn removing_a_non_member_is_a_silent_no_op() {
        let repo = repo();

        assert!(!remove_segment_from_user(user_id(), &slug("promo"), &repo).unwrap());
        assert!(repo.history().is_empty());
    }

    #[test]
    fn removing_a_member_records_history() {
        let repo = repo();
        add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap();

        assert!(remove_segment_from_user(user_id(), &slug("promo"), &repo).unwrap());

        assert_eq!(repo.membership_count(), 0);
        let operations = repo
            .history()
            .into_iter()
            .map(|r| r.operation_type)
            .collect::<Vec<_>>();
        assert_eq!(
            operations,
            vec![OperationType::Adding, OperationType::Removing]
        );
    }

    #[test]
    fn re_adding_after_removal_behaves_like_first_add() {
        let repo = repo();
        add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap();
        remove_segment_from_user(user_id(), &slug("promo"), &repo).unwrap();

        assert!(add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap());
        assert_eq!(repo.membership_count(), 1);
        assert_eq!(repo.history().len(), 3);
    }

    #[test]
    fn unknown_user_is_not_found() {
        let repo = repo();
        let unknown = UserId::new(999_999).unwrap();

        let err = add_segment_to_user(unknown, &assignment("promo", None), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("user"));
        let err = remove_segment_from_user(unknown, &slug("promo"), &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("user"));
        let err = get_active_segments_of_user(unknown, &repo).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("user"));
        assert!(repo.history().is_empty());
    }

    #[test]
    fn expired_membership_is_hidden_but_kept() {
        let now = epoch(1_700_000_000);
        let repo = repo();
        add_segment_to_user(
            user_id(),
            &assignment("promo", Some(now - TimeDelta::days(1))),
            &repo,
        )
        .unwrap();

        let active = get_active_segments_of_user_at(user_id(), now, &repo).unwrap();

        assert!(active.segments.is_empty());
        assert_eq!(repo.membership_count(), 1);
    }

    #[test]
    fn adding_over_an_expired_membership_is_a_no_op() {
        let now = Utc::now().naive_utc();
        let repo = repo().with_membership(user_id(), "promo", Some(now - TimeDelta::days(1)));

        assert!(!add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap());
        assert!(
            get_active_segments_of_user(user_id(), &repo)
                .unwrap()
                .segments
                .is_empty()
        );
        assert!(repo.history().is_empty());
    }

    #[test]
    fn membership_without_deadline_stays_active() {
        let repo = repo();
        add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap();

        let far_future = epoch(32_503_680_000);
        let active = get_active_segments_of_user_at(user_id(), far_future, &repo).unwrap();

        assert_eq!(active.segments, vec![assignment("promo", None)]);
    }

    #[test]
    fn future_deadline_is_reported_with_segment() {
        let now = epoch(1_700_000_000);
        let deadline = now + TimeDelta::hours(2);
        let repo = repo();
        add_segment_to_user(user_id(), &assignment("promo", Some(deadline)), &repo).unwrap();

        let active = get_active_segments_of_user_at(user_id(), now, &repo).unwrap();

        assert_eq!(active.user_id, user_id());
        assert_eq!(active.segments, vec![assignment("promo", Some(deadline))]);
    }

    #[test]
    fn user_without_memberships_has_empty_segment_list() {
        let repo = repo();
        let active = get_active_segments_of_user(user_id(), &repo).unwrap();
        assert_eq!(active.user_id, user_id());
        assert!(active.segments.is_empty());
    }

    #[test]
    fn batch_applies_additions_before_removals() {
        let repo = repo();
        let changes = SegmentChanges {
            add: vec![assignment("promo", None)],
            remove: vec![slug("promo")],
        };

        change_segments_of_user(user_id(), &changes, &repo).unwrap();

        assert_eq!(repo.membership_count(), 0);
        assert_eq!(repo.history().len(), 2);
    }

    #[test]
    fn failing_step_leaves_earlier_steps_applied() {
        let repo = repo().failing_membership_insert("beta");
        let changes = SegmentChanges {
            add: vec![
                assignment("alpha", None),
                assignment("beta", None),
                assignment("gamma", None),
            ],
            remove: vec![],
        };

        let err = change_segments_of_user(user_id(), &changes, &repo).unwrap_err();
        assert_eq!(err, ServiceError::WriteError);

        let active = get_active_segments_of_user(user_id(), &repo).unwrap();
        let slugs = active
            .segments
            .iter()
            .map(|s| s.slug.as_str())
            .collect::<Vec<_>>();
        assert_eq!(slugs, vec!["alpha"]);
    }

    #[test]
    fn history_failure_is_reported_but_membership_is_kept() {
        let repo = repo().failing_history();

        let err = add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap_err();

        assert_eq!(err, ServiceError::WriteError);
        assert_eq!(repo.membership_count(), 1);
    }

    #[test]
    fn insert_conflict_after_check_is_a_no_op() {
        let repo = repo()
            .with_membership(user_id(), "promo", None)
            .stale_membership_checks();

        assert!(!add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap());

        assert_eq!(repo.membership_count(), 1);
        assert!(repo.history().is_empty());
    }

    #[test]
    fn concurrent_removal_after_check_is_a_no_op() {
        let repo = repo().stale_membership_checks();

        assert!(!remove_segment_from_user(user_id(), &slug("promo"), &repo).unwrap());

        assert_eq!(repo.membership_count(), 0);
        assert!(repo.history().is_empty());
    }

    #[test]
    fn empty_batch_for_unknown_user_is_not_found() {
        let repo = repo();
        let err = change_segments_of_user(
            UserId::new(2).unwrap(),
            &SegmentChanges::default(),
            &repo,
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("user"));
    }

    #[test]
    fn history_lists_changes_of_the_user() {
        let repo = repo();
        add_segment_to_user(user_id(), &assignment("promo", None), &repo).unwrap();

        let history = list_user_history(user_id(), &repo).unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].user_id, user_id());
    }
}
