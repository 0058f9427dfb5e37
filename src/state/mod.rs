/// State management module
///
/// This module holds all client-side application state:
/// - Shared data structures (data.rs)
/// - File metadata reference table (files.rs)
/// - Mapping tree and current selection (mappings.rs)
/// - Login flag and user profile (auth.rs)

pub mod auth;
pub mod data;
pub mod files;
pub mod mappings;
