//! Diesel row types and service configuration.

pub mod config;
pub mod history;
pub mod membership;
pub mod segment;
pub mod user;
