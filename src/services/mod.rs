//! Business operations of the segmentation service.
//!
//! Services are plain functions generic over the repository traits they
//! need, so the HTTP layer stays a thin wrapper and tests can substitute the
//! in-memory repository.

pub mod errors;
pub mod memberships;
pub mod segments;
pub mod users;

pub use errors::{ServiceError, ServiceResult};
