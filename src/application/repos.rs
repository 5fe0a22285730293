//! Repository traits describing persistence adapters.

use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::{LinkRecord, UserRecord};
use crate::domain::feed::{FeedWindow, LinkOrderTerm};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("duplicate record violates unique constraint `{constraint}`")]
    Duplicate { constraint: String },
    #[error("resource not found")]
    NotFound,
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
    #[error("integrity error: {message}")]
    Integrity { message: String },
    #[error("database timeout")]
    Timeout,
}

impl RepoError {
    pub fn from_persistence(err: impl std::fmt::Display) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Substring filter over link description and url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkQueryFilter {
    pub search: Option<String>,
}

impl LinkQueryFilter {
    /// Empty search strings do not filter.
    pub fn from_search(search: Option<&str>) -> Self {
        Self {
            search: search
                .filter(|value| !value.is_empty())
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateLinkParams {
    pub description: String,
    pub url: String,
    pub posted_by_id: i32,
}

#[async_trait]
pub trait LinksRepo: Send + Sync {
    async fn list_links(
        &self,
        filter: &LinkQueryFilter,
        order: &[LinkOrderTerm],
        window: FeedWindow,
    ) -> Result<Vec<LinkRecord>, RepoError>;

    async fn count_links(&self, filter: &LinkQueryFilter) -> Result<u64, RepoError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<LinkRecord>, RepoError>;
}

#[async_trait]
pub trait LinksWriteRepo: Send + Sync {
    async fn create_link(&self, params: CreateLinkParams) -> Result<LinkRecord, RepoError>;
}

/// Batched relation lookups keyed by link id.
#[async_trait]
pub trait LinkRelationsRepo: Send + Sync {
    /// Authors of the given links. Links without an author are absent from the map.
    async fn posted_by_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, UserRecord>, RepoError>;

    /// Voters of the given links ordered by user id. Links without votes are
    /// absent from the map.
    async fn voters_for_links(
        &self,
        link_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<UserRecord>>, RepoError>;
}

#[async_trait]
pub trait HealthRepo: Send + Sync {
    async fn health_check(&self) -> Result<(), RepoError>;
}
