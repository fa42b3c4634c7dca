//! Error conversion glue between layers.
//!
//! The domain layer must not depend on service error types, so conversions
//! into [`ServiceError`] live here.

use crate::domain::types::TypeConstraintError;
use crate::services::errors::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::InvalidInput(val.to_string())
    }
}

#[cfg(feature = "server")]
mod forms {
    use crate::forms::segments::SegmentFormError;
    use crate::forms::users::UserFormError;
    use crate::services::errors::ServiceError;

    impl From<SegmentFormError> for ServiceError {
        fn from(val: SegmentFormError) -> Self {
            ServiceError::InvalidInput(val.to_string())
        }
    }

    impl From<UserFormError> for ServiceError {
        fn from(val: UserFormError) -> Self {
            ServiceError::InvalidInput(val.to_string())
        }
    }
}
