use serde::{Deserialize, Serialize};

use crate::domain::segment::Segment;
use crate::domain::types::SegmentSlug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDto {
    pub id: i32,
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Segment> for SegmentDto {
    fn from(value: Segment) -> Self {
        Self {
            id: value.id.get(),
            slug: value.slug.into_inner(),
            description: value.description.map(String::from),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSegmentResponseDto {
    pub slug: String,
}

impl From<SegmentSlug> for CreateSegmentResponseDto {
    fn from(value: SegmentSlug) -> Self {
        Self {
            slug: value.into_inner(),
        }
    }
}
