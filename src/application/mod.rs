//! Application services and repository seams.

pub mod auth;
pub mod error;
pub mod feed;
pub mod keys;
pub mod links;
pub mod repos;
