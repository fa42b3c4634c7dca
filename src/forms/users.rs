use std::ops::RangeInclusive;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::membership::{SegmentAssignment, SegmentChanges};
use crate::domain::types::{SegmentSlug, TypeConstraintError, UserName};
use crate::domain::user::NewUser;

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Years that keep the stored `YYYY-MM-DD` text in chronological order.
const DEADLINE_YEARS: RangeInclusive<i32> = 0..=9999;

/// Parse a membership deadline.
///
/// Accepts `YYYY-MM-DD HH:MM:SS` (UTC), RFC 3339 with an offset, or a bare
/// date meaning midnight UTC. Blank input means "no deadline". Deadlines
/// whose UTC year falls outside `0..=9999` are rejected.
pub fn parse_deadline(value: &str) -> Result<Option<NaiveDateTime>, TypeConstraintError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }

    let deadline = parse_date_time(value)
        .ok_or_else(|| TypeConstraintError::InvalidValue(format!("deadline_date: {value}")))?;

    if !DEADLINE_YEARS.contains(&deadline.year()) {
        return Err(TypeConstraintError::InvalidValue(format!(
            "deadline_date out of range: {value}"
        )));
    }

    Ok(Some(deadline))
}

fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    if let Ok(deadline) = DateTime::parse_from_rfc3339(value) {
        return Some(deadline.naive_utc());
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[derive(Deserialize, Validate)]
pub struct CreateUserForm {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUserFormPayload {
    pub name: UserName,
}

impl CreateUserFormPayload {
    pub fn into_new_user(self) -> NewUser {
        NewUser { name: self.name }
    }
}

#[derive(Deserialize, Validate)]
pub struct SegmentWithDeadlineForm {
    #[validate(length(min = 1, max = 255))]
    pub slug: String,
    #[serde(default)]
    pub deadline_date: Option<String>,
}

#[derive(Deserialize, Validate)]
pub struct ChangeSegmentsForm {
    #[serde(default)]
    #[validate(nested)]
    pub add_to_user: Vec<SegmentWithDeadlineForm>,
    #[serde(default)]
    pub take_from_user: Vec<String>,
}

#[derive(Debug, Error)]
pub enum UserFormError {
    #[error("User form validation failed: {0}")]
    Validation(String),
    #[error("User form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl From<ValidationErrors> for UserFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for UserFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CreateUserForm> for CreateUserFormPayload {
    type Error = UserFormError;

    fn try_from(value: CreateUserForm) -> Result<Self, Self::Error> {
        value.validate()?;
        Ok(Self {
            name: UserName::new(value.name)?,
        })
    }
}

impl TryFrom<SegmentWithDeadlineForm> for SegmentAssignment {
    type Error = UserFormError;

    fn try_from(value: SegmentWithDeadlineForm) -> Result<Self, Self::Error> {
        let deadline = match value.deadline_date {
            Some(deadline) => parse_deadline(&deadline)?,
            None => None,
        };
        Ok(Self {
            slug: SegmentSlug::new(value.slug)?,
            deadline,
        })
    }
}

impl TryFrom<ChangeSegmentsForm> for SegmentChanges {
    type Error = UserFormError;

    fn try_from(value: ChangeSegmentsForm) -> Result<Self, Self::Error> {
        value.validate()?;
        let add = value
            .add_to_user
            .into_iter()
            .map(SegmentAssignment::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let remove = value
            .take_from_user
            .into_iter()
            .map(SegmentSlug::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { add, remove })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(date: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn parses_supported_deadline_formats() {
        assert_eq!(
            parse_deadline("2023-09-01 12:30:00").unwrap(),
            Some(at("2023-09-01 12:30:00"))
        );
        assert_eq!(
            parse_deadline("2023-09-01T15:30:00+03:00").unwrap(),
            Some(at("2023-09-01 12:30:00"))
        );
        assert_eq!(
            parse_deadline("2023-09-01").unwrap(),
            Some(at("2023-09-01 00:00:00"))
        );
        assert_eq!(parse_deadline("  ").unwrap(), None);
    }

    #[test]
    fn rejects_garbage_deadline() {
        assert!(parse_deadline("next tuesday").is_err());
    }

    #[test]
    fn rejects_deadline_past_year_9999() {
        assert_eq!(
            parse_deadline("9999-12-31 23:59:59").unwrap(),
            Some(at("9999-12-31 23:59:59"))
        );
        assert_eq!(
            parse_deadline("9999-12-31T23:59:59+01:00").unwrap(),
            Some(at("9999-12-31 22:59:59"))
        );
        // Converts to 10000-01-01 00:59:59 UTC.
        assert!(matches!(
            parse_deadline("9999-12-31T23:59:59-01:00"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
        assert!(matches!(
            parse_deadline("+10000-01-01 00:00:00"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
    }

    #[test]
    fn change_form_builds_ordered_changes() {
        let form = ChangeSegmentsForm {
            add_to_user: vec![
                SegmentWithDeadlineForm {
                    slug: "AVITO_VOICE_MESSAGES".to_string(),
                    deadline_date: None,
                },
                SegmentWithDeadlineForm {
                    slug: "AVITO_DISCOUNT_30".to_string(),
                    deadline_date: Some("2030-01-01".to_string()),
                },
            ],
            take_from_user: vec!["AVITO_PERFORMANCE_VAS".to_string()],
        };

        let changes: SegmentChanges = form.try_into().unwrap();

        assert_eq!(changes.add.len(), 2);
        assert_eq!(changes.add[0].slug, "AVITO_VOICE_MESSAGES");
        assert_eq!(changes.add[1].deadline, Some(at("2030-01-01 00:00:00")));
        assert_eq!(changes.remove[0], "AVITO_PERFORMANCE_VAS");
    }

    #[test]
    fn change_form_rejects_blank_removal() {
        let form = ChangeSegmentsForm {
            add_to_user: vec![],
            take_from_user: vec![" ".to_string()],
        };

        let changes: Result<SegmentChanges, _> = form.try_into();
        assert!(matches!(changes, Err(UserFormError::TypeConstraint(_))));
    }

    #[test]
    fn create_user_requires_name() {
        let form = CreateUserForm {
            name: String::new(),
        };
        let payload: Result<CreateUserFormPayload, _> = form.try_into();
        assert!(matches!(payload, Err(UserFormError::Validation(_))));
    }
}
