//! Request bodies accepted by the HTTP layer and their validated payloads.

pub mod segments;
pub mod users;
