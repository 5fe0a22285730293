//! GraphQL link feed: filtered, windowed and sorted links with authenticated posting.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
