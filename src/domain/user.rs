use serde::{Deserialize, Serialize};

use crate::domain::types::{UserId, UserName};

/// A user that can be assigned to segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: UserName,
}

/// Data required to insert a new [`User`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewUser {
    pub name: UserName,
}
