//! Domain entities and value objects independent of persistence.

pub mod history;
pub mod membership;
pub mod segment;
pub mod types;
pub mod user;
