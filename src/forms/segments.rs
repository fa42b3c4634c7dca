use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::segment::NewSegment;
use crate::domain::types::{SegmentDescription, SegmentSlug, TypeConstraintError};

#[derive(Deserialize, Validate)]
pub struct CreateSegmentForm {
    #[validate(length(min = 1, max = 255))]
    pub slug: String,
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateSegmentFormPayload {
    pub slug: SegmentSlug,
    pub description: Option<SegmentDescription>,
}

impl CreateSegmentFormPayload {
    pub fn into_new_segment(self) -> NewSegment {
        NewSegment {
            slug: self.slug,
            description: self.description,
        }
    }
}

#[derive(Deserialize, Validate)]
pub struct UpdateSegmentForm {
    #[validate(length(max = 1024))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateSegmentFormPayload {
    pub description: Option<SegmentDescription>,
}

#[derive(Debug, Error)]
pub enum SegmentFormError {
    #[error("Segment form validation failed: {0}")]
    Validation(String),
    #[error("Segment form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for SegmentFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for SegmentFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

fn optional_description(
    value: Option<String>,
) -> Result<Option<SegmentDescription>, TypeConstraintError> {
    Ok(value
        .map(SegmentDescription::optional)
        .transpose()?
        .flatten())
}

impl TryFrom<CreateSegmentForm> for CreateSegmentFormPayload {
    type Error = SegmentFormError;

    fn try_from(value: CreateSegmentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            slug: SegmentSlug::new(value.slug)?,
            description: optional_description(value.description)?,
        })
    }
}

impl TryFrom<UpdateSegmentForm> for UpdateSegmentFormPayload {
    type Error = SegmentFormError;

    fn try_from(value: UpdateSegmentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            description: optional_description(value.description)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_segment_trims_slug_and_drops_blank_description() {
        let form = CreateSegmentForm {
            slug: " AVITO_DISCOUNT_30 ".to_string(),
            description: Some("   ".to_string()),
        };

        let payload: CreateSegmentFormPayload = form.try_into().unwrap();
        assert_eq!(payload.slug, "AVITO_DISCOUNT_30");
        assert_eq!(payload.description, None);
    }

    #[test]
    fn create_segment_rejects_blank_slug() {
        let form = CreateSegmentForm {
            slug: "  ".to_string(),
            description: None,
        };

        let payload: Result<CreateSegmentFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(SegmentFormError::TypeConstraint(_))));
    }

    #[test]
    fn create_segment_rejects_missing_slug() {
        let form = CreateSegmentForm {
            slug: String::new(),
            description: None,
        };

        let payload: Result<CreateSegmentFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(SegmentFormError::Validation(_))));
    }

    #[test]
    fn update_segment_keeps_description() {
        let form = UpdateSegmentForm {
            description: Some("Voice messages".to_string()),
        };

        let payload: UpdateSegmentFormPayload = form.try_into().unwrap();
        assert_eq!(payload.description.as_deref(), Some("Voice messages"));
    }
}
