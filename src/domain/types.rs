//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers and text values are enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// A string exceeded the maximum allowed length.
    #[error("{0} must be at most {1} characters long")]
    TooLong(&'static str, usize),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr, $max_len:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Maximum number of characters accepted.
            pub const MAX_LEN: usize = $max_len;

            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                if inner.as_str().chars().count() > Self::MAX_LEN {
                    return Err(TypeConstraintError::TooLong($field, Self::MAX_LEN));
                }
                Ok(Self(inner.into_inner()))
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

id_newtype!(SegmentId, "Unique identifier for a segment.", "segment_id");
id_newtype!(UserId, "Unique identifier for a user.", "user_id");
id_newtype!(
    HistoryId,
    "Unique identifier for a history record.",
    "history_id"
);

non_empty_string_newtype!(
    SegmentSlug,
    "User-chosen segment identifier enforcing non-empty values.",
    "slug",
    255
);
non_empty_string_newtype!(
    SegmentDescription,
    "Free-form segment description enforcing non-empty values.",
    "description",
    1024
);
non_empty_string_newtype!(UserName, "User display name.", "name", 255);

impl SegmentDescription {
    /// Treats empty or whitespace-only input as "no description".
    pub fn optional<S: Into<String>>(value: S) -> Result<Option<Self>, TypeConstraintError> {
        match Self::new(value) {
            Ok(description) => Ok(Some(description)),
            Err(TypeConstraintError::EmptyString(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Kind of membership change stored in the history log.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationType {
    Adding,
    Removing,
}

impl OperationType {
    /// String representation used in persistence.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adding => "ADDING",
            Self::Removing => "REMOVING",
        }
    }
}

impl Display for OperationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for OperationType {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "ADDING" => Ok(Self::Adding),
            "REMOVING" => Ok(Self::Removing),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "operation type: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for OperationType {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<OperationType> for String {
    fn from(value: OperationType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_slugs() {
        let slug = SegmentSlug::new("  AVITO_VOICE_MESSAGES ").unwrap();
        assert_eq!(slug.as_str(), "AVITO_VOICE_MESSAGES");
    }

    #[test]
    fn rejects_empty_slugs() {
        let err = SegmentSlug::new("   ").unwrap_err();
        assert_eq!(err, TypeConstraintError::EmptyString("slug"));
    }

    #[test]
    fn rejects_overlong_names() {
        let err = UserName::new("x".repeat(UserName::MAX_LEN + 1)).unwrap_err();
        assert_eq!(err, TypeConstraintError::TooLong("name", UserName::MAX_LEN));
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = UserId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("user_id"));
    }

    #[test]
    fn blank_description_is_absent() {
        assert_eq!(SegmentDescription::optional("  ").unwrap(), None);
        let description = SegmentDescription::optional(" promo ").unwrap().unwrap();
        assert_eq!(description, "promo");
    }

    #[test]
    fn operation_type_round_trips_through_storage_string() {
        assert_eq!(
            OperationType::try_from("REMOVING").unwrap(),
            OperationType::Removing
        );
        assert!(OperationType::try_from("RENAMING").is_err());
        assert_eq!(String::from(OperationType::Adding), "ADDING");
    }

    #[test]
    fn slug_deserialization_is_validated() {
        let err = serde_json::from_str::<SegmentSlug>("\"  \"");
        assert!(err.is_err());
    }
}
