//! Business logic services

pub mod groups;
pub mod sessions;
