//! API route handlers

pub mod auth;
pub mod cards;
pub mod groups;
pub mod selections;
pub mod sessions;
pub mod stats;
