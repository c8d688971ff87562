//! CLI command handlers.

pub mod classify;
pub mod config;
pub mod landing;
pub mod reviews;
pub mod search;
