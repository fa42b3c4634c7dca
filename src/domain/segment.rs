use serde::{Deserialize, Serialize};

use crate::domain::types::{SegmentDescription, SegmentId, SegmentSlug};

/// A named category users can belong to.
///
/// `id` and `slug` are fixed at creation; only the description changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub slug: SegmentSlug,
    pub description: Option<SegmentDescription>,
}

/// Data required to insert a new [`Segment`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSegment {
    pub slug: SegmentSlug,
    pub description: Option<SegmentDescription>,
}
