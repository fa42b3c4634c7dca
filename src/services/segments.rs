use chrono::Utc;

use crate::domain::segment::{NewSegment, Segment};
use crate::domain::types::{SegmentDescription, SegmentSlug};
use crate::repository::{RepositoryError, SegmentReader, SegmentWriter};

use super::{ServiceError, ServiceResult};

fn find_segment<R>(slug: &SegmentSlug, repo: &R) -> ServiceResult<Segment>
where
    R: SegmentReader,
{
    match repo.get_segment_by_slug(slug) {
        Ok(Some(segment)) => Ok(segment),
        Ok(None) => Err(ServiceError::NotFound("segment")),
        Err(e) => {
            log::error!("Failed to get segment {slug}: {e}");
            Err(ServiceError::ReadError)
        }
    }
}

/// All segments ordered by slug. Empty when the catalog is empty.
pub fn list_segments<R>(repo: &R) -> ServiceResult<Vec<Segment>>
where
    R: SegmentReader,
{
    repo.list_segments().map_err(|e| {
        log::error!("Failed to list segments: {e}");
        ServiceError::ReadError
    })
}

pub fn get_segment<R>(slug: &SegmentSlug, repo: &R) -> ServiceResult<Segment>
where
    R: SegmentReader,
{
    find_segment(slug, repo)
}

/// Create a segment and return its slug.
///
/// The lookup beforehand only produces a friendlier error; the unique index
/// on `segments.slug` decides the race between concurrent creates.
pub fn create_segment<R>(segment: NewSegment, repo: &R) -> ServiceResult<SegmentSlug>
where
    R: SegmentReader + SegmentWriter,
{
    match repo.get_segment_by_slug(&segment.slug) {
        Ok(None) => {}
        Ok(Some(_)) => return Err(ServiceError::AlreadyExists("segment")),
        Err(e) => {
            log::error!("Failed to check segment {}: {e}", segment.slug);
            return Err(ServiceError::ReadError);
        }
    }

    match repo.create_segment(&segment) {
        Ok(created) => {
            log::info!("Created segment {}", created.slug);
            Ok(created.slug)
        }
        Err(RepositoryError::AlreadyExists) => Err(ServiceError::AlreadyExists("segment")),
        Err(e) => {
            log::error!("Failed to create segment {}: {e}", segment.slug);
            Err(ServiceError::WriteError)
        }
    }
}

/// Replace the description of a segment. `id` and `slug` never change.
pub fn update_segment<R>(
    slug: &SegmentSlug,
    description: Option<SegmentDescription>,
    repo: &R,
) -> ServiceResult<Segment>
where
    R: SegmentReader + SegmentWriter,
{
    let existing = find_segment(slug, repo)?;

    match repo.update_segment_description(slug, description.as_ref()) {
        // Deleted between the lookup and the update.
        Ok(0) => Err(ServiceError::NotFound("segment")),
        Ok(_) => {
            log::info!("Updated segment {slug}");
            Ok(Segment {
                description,
                ..existing
            })
        }
        Err(e) => {
            log::error!("Failed to update segment {slug}: {e}");
            Err(ServiceError::WriteError)
        }
    }
}

/// Delete a segment and return the value that was removed.
///
/// Memberships referencing the slug are removed in the same transaction and
/// each removal is written to the history log.
pub fn delete_segment<R>(slug: &SegmentSlug, repo: &R) -> ServiceResult<Segment>
where
    R: SegmentReader + SegmentWriter,
{
    let existing = find_segment(slug, repo)?;

    match repo.delete_segment(slug, Utc::now().naive_utc()) {
        Ok(0) => Err(ServiceError::NotFound("segment")),
        Ok(_) => {
            log::info!("Deleted segment {slug}");
            Ok(existing)
        }
        Err(e) => {
            log::error!("Failed to delete segment {slug}: {e}");
            Err(ServiceError::WriteError)
        }
    }
}
